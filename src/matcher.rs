//! Subsequence fuzzy scoring for root-relative candidate paths.

/// Points per matched character.
const SCORE_MATCH: i32 = 16;
/// Extra points when a matched character directly follows the
/// previously matched one.
const BONUS_CONSECUTIVE: i32 = 8;
/// Extra points when a matched character sits at the start of the
/// candidate or right after a separator/word boundary.
const BONUS_BOUNDARY: i32 = 12;
/// Extra points when the whole query fits inside the final path
/// segment. A basename hit is a far stronger signal than characters
/// scattered across the directory part.
const BONUS_FINAL_SEGMENT: i32 = 32;
/// Points lost per character before the first match.
const PENALTY_EARLINESS: i32 = 1;
/// One point lost per this many candidate characters, so shorter
/// candidates outrank longer ones at equal match quality.
const PENALTY_LENGTH_EVERY: i32 = 2;

/// A successful match: ordered rank plus the matched character
/// offsets (char indices into the candidate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub score: i32,
    pub positions: Vec<usize>,
}

pub struct Matcher {
    case_sensitive: bool,
}

impl Matcher {
    pub fn new(case_sensitive: bool) -> Matcher {
        Matcher { case_sensitive }
    }

    /// Score `candidate` against `query`. The query's characters must
    /// occur in order within the candidate, not necessarily
    /// contiguously; `None` means no such subsequence exists. An
    /// empty query matches everything at a neutral baseline.
    ///
    /// Single forward pass per attempted span, linear in candidate
    /// length.
    pub fn score(&self, candidate: &str, query: &str) -> Option<Match> {
        if query.is_empty() {
            return Some(Match {
                score: 0,
                positions: Vec::new(),
            });
        }

        let (seg_byte, seg_chars) = match candidate.rfind('/') {
            Some(i) => (i + 1, candidate[..i + 1].chars().count()),
            None => (0, 0),
        };

        // Prefer a match confined to the final segment; fall back to
        // the whole path. When the candidate has no separator the
        // first attempt already covers the whole string.
        let (raw, positions) = self
            .match_span(&candidate[seg_byte..], query)
            .map(|(raw, positions)| {
                let shifted = positions.into_iter().map(|p| p + seg_chars).collect();
                (raw + BONUS_FINAL_SEGMENT, shifted)
            })
            .or_else(|| {
                if seg_byte > 0 {
                    self.match_span(candidate, query)
                } else {
                    None
                }
            })?;

        let length_penalty = candidate.chars().count() as i32 / PENALTY_LENGTH_EVERY;
        Some(Match {
            score: raw - length_penalty,
            positions,
        })
    }

    /// Greedy left-to-right subsequence match of `query` within
    /// `text`. Returns the span score (before length penalty) and the
    /// matched char offsets into `text`.
    fn match_span(&self, text: &str, query: &str) -> Option<(i32, Vec<usize>)> {
        let mut positions = Vec::new();
        let mut score = 0i32;
        let mut wanted = query.chars().map(|c| self.fold(c)).peekable();
        let mut prev_was_match = false;
        let mut prev_char: Option<char> = None;

        for (i, c) in text.chars().enumerate() {
            let Some(&q) = wanted.peek() else { break };
            if self.fold(c) == q {
                wanted.next();
                score += SCORE_MATCH;
                if prev_was_match {
                    score += BONUS_CONSECUTIVE;
                }
                if prev_char.is_none_or(is_boundary) {
                    score += BONUS_BOUNDARY;
                }
                positions.push(i);
                prev_was_match = true;
            } else {
                prev_was_match = false;
            }
            prev_char = Some(c);
        }

        if wanted.peek().is_some() {
            return None;
        }
        let first = positions.first().copied().unwrap_or(0) as i32;
        Some((score - first * PENALTY_EARLINESS, positions))
    }

    fn fold(&self, c: char) -> char {
        if self.case_sensitive {
            c
        } else {
            c.to_lowercase().next().unwrap_or(c)
        }
    }
}

fn is_boundary(c: char) -> bool {
    matches!(c, '/' | '.' | '_' | '-' | ' ')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn score_of(candidate: &str, query: &str) -> Option<i32> {
        Matcher::new(false).score(candidate, query).map(|m| m.score)
    }

    #[test]
    fn empty_query_matches_everything_at_baseline() {
        let m = Matcher::new(false);
        for candidate in ["", "a", "src/bayes/blend.c", "X Y Z"] {
            let hit = m.score(candidate, "").unwrap();
            assert_eq!(hit.score, 0);
            assert!(hit.positions.is_empty());
        }
    }

    #[test]
    fn subsequence_must_be_in_order() {
        let m = Matcher::new(false);
        assert!(m.score("blend.c", "bld").is_some());
        assert!(m.score("blend.c", "dlb").is_none());
        assert!(m.score("blend.c", "xyz").is_none());
    }

    #[test]
    fn matching_is_case_insensitive_by_default() {
        assert!(score_of("README.md", "readme").is_some());
        assert!(Matcher::new(true).score("README.md", "readme").is_none());
        assert!(Matcher::new(true).score("README.md", "README").is_some());
    }

    #[test]
    fn contiguous_runs_beat_scattered_matches() {
        // Same three characters, same boundary context.
        assert!(score_of("xx/abc", "abc") > score_of("xx/axbxc", "abc"));
    }

    #[test]
    fn segment_start_beats_mid_word() {
        assert!(score_of("dir/log.txt", "log") > score_of("dir/blogs.x", "log"));
    }

    #[test]
    fn shorter_candidate_wins_at_equal_quality() {
        assert!(score_of("a.c", "a.c") > score_of("deeply/nested/a.c", "a.c"));
    }

    #[test]
    fn earlier_match_wins() {
        assert!(score_of("abcdef00", "ab") > score_of("00abcdef", "ab"));
    }

    #[test]
    fn basename_hit_outranks_path_scatter() {
        // `a.c` fits b.c's sibling exactly but only scatters across
        // the directory part of b.c itself.
        let a = score_of("src/cakes/a.c", "a.c").unwrap();
        let b = score_of("src/cakes/b.c", "a.c").unwrap();
        assert!(a > b, "exact suffix {a} should beat subsequence-only {b}");
    }

    #[test]
    fn positions_point_at_the_query_characters() {
        let m = Matcher::new(false);
        let hit = m.score("src/cakes/a.c", "a.c").unwrap();
        // Final-segment match: `a.c` at the basename.
        assert_eq!(hit.positions, vec![10, 11, 12]);

        let hit = m.score("src/cakes/b.c", "a.c").unwrap();
        // Whole-path fallback: the `a` of cakes, then `.c`.
        assert_eq!(hit.positions, vec![5, 11, 12]);
    }

    #[test]
    fn no_match_reports_nothing() {
        assert!(Matcher::new(false).score("x.txt", "a.c").is_none());
    }

    proptest! {
        #[test]
        fn empty_query_always_matches(candidate in "\\PC{0,40}") {
            prop_assert!(Matcher::new(false).score(&candidate, "").is_some());
        }

        #[test]
        fn candidate_matches_itself(candidate in "[a-z./_-]{1,30}") {
            prop_assert!(Matcher::new(false).score(&candidate, &candidate).is_some());
        }

        #[test]
        fn positions_are_strictly_increasing_and_valid(
            candidate in "[a-zA-Z./_-]{0,30}",
            query in "[a-z.]{0,6}",
        ) {
            let m = Matcher::new(false);
            if let Some(hit) = m.score(&candidate, &query) {
                let chars: Vec<char> = candidate.chars().collect();
                prop_assert_eq!(hit.positions.len(), query.chars().count());
                for window in hit.positions.windows(2) {
                    prop_assert!(window[0] < window[1]);
                }
                for (&p, q) in hit.positions.iter().zip(query.chars()) {
                    prop_assert!(p < chars.len());
                    prop_assert_eq!(
                        chars[p].to_lowercase().next().unwrap_or(chars[p]),
                        q.to_lowercase().next().unwrap_or(q)
                    );
                }
            }
        }

        #[test]
        fn scoring_is_deterministic(
            candidate in "[a-z./]{0,30}",
            query in "[a-z.]{0,6}",
        ) {
            let m = Matcher::new(false);
            prop_assert_eq!(m.score(&candidate, &query), m.score(&candidate, &query));
        }
    }
}
