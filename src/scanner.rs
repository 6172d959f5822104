use std::io;
use std::process::Command;

use ignore::WalkBuilder;

use crate::error::{Error, Result};

/// Collect the raw path list. The configured find command is spawned
/// once and its stdout read to completion before tree construction;
/// if it cannot be run, fall back to an internal gitignore-aware walk
/// of the current directory.
pub fn collect(cmd: &str) -> Result<Vec<String>> {
    match run_command(cmd) {
        Ok(lines) => Ok(lines),
        Err(err) => {
            eprintln!("treepick: {err}; falling back to internal walk");
            Ok(walk_cwd())
        }
    }
}

fn run_command(cmd: &str) -> Result<Vec<String>> {
    let mut parts = cmd.split_whitespace();
    let program = parts.next().ok_or_else(|| Error::Producer {
        cmd: cmd.to_string(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
    })?;

    let output = Command::new(program)
        .args(parts)
        .output()
        .map_err(|source| Error::Producer {
            cmd: cmd.to_string(),
            source,
        })?;
    if !output.status.success() {
        return Err(Error::Producer {
            cmd: cmd.to_string(),
            source: io::Error::other(format!("exited with {}", output.status)),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect())
}

/// Walk the current directory the way the find command would have,
/// marking directories with a trailing slash. Walk errors are
/// warnings, not failures.
fn walk_cwd() -> Vec<String> {
    let mut lines = Vec::new();
    for result in WalkBuilder::new(".").build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("treepick: walk warning: {err}");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        let mut line = entry.path().to_string_lossy().into_owned();
        if is_dir && !line.ends_with('/') {
            line.push('/');
        }
        lines.push(line);
    }
    lines.sort();
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_missing_command_falls_back_to_the_walk() {
        // The fallback walks the test process's working directory,
        // which always contains at least Cargo.toml.
        let lines = collect("definitely-not-a-real-command-xyz").unwrap();
        assert!(lines.iter().any(|l| l.ends_with("Cargo.toml")));
    }

    #[test]
    fn command_output_is_split_into_lines() {
        let lines = run_command("printf a\\nb/\\n").unwrap();
        assert_eq!(lines, vec!["a", "b/"]);
    }

    #[test]
    fn an_empty_command_is_a_producer_error() {
        assert!(matches!(
            run_command("   "),
            Err(Error::Producer { .. })
        ));
    }
}
