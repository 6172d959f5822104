mod cache;
mod cli;
mod error;
mod matcher;
mod scanner;
mod tree;
mod tui;
mod view;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let lines = scanner::collect(&args.cmd)?;
    let tree = tree::Tree::build(lines.iter().map(String::as_str), args.collapse);

    let matcher = matcher::Matcher::new(args.case_sensitive);
    let cache = cache::MatchCache::new(args.cache_capacity);
    let mut session = tui::Session::new(tree, matcher, cache);

    let picked = tui::run(&mut session, args.height.get())?;

    // Diagnostics only after the terminal is back to normal.
    if session.skipped() > 0 {
        eprintln!(
            "treepick: skipped {} unparsable line(s) from `{}`",
            session.skipped(),
            args.cmd
        );
    }

    match picked {
        Some(path) => {
            println!("{path}");
            Ok(())
        }
        None => std::process::exit(1),
    }
}
