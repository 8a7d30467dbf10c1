//! Core normalization engine.
//!
//! Data flows one direction: raw basename -> season/episode split -> tail
//! tokenization over a shrinking remainder -> title cleanup -> name
//! assembly, or escalation to the unparsed set.

pub mod builder;
pub mod dictionaries;
pub mod engine;
pub mod episode;
pub mod scanner;
pub mod state;
pub mod title;
pub mod tokenizer;

/// Collapse repeated whitespace and trim the ends.
pub fn dedup_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_spaces() {
        assert_eq!(dedup_spaces("  a   b  c "), "a b c");
        assert_eq!(dedup_spaces(""), "");
    }
}
