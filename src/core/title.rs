//! Title fragment cleanup.
//!
//! Whatever the tail tokenizer leaves behind is the episode title, minus
//! the punctuation damage done by separator normalization and token
//! removal.

use crate::Result;
use regex::Regex;

pub struct TitleCleaner {
    empty_brackets_re: Regex,
    edge_re: Regex,
    part_re: Regex,
    initial_re: Regex,
    trailing_h_re: Regex,
}

impl TitleCleaner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            empty_brackets_re: Regex::new(r"\[\s*\]")?,
            edge_re: Regex::new(r"^\W+|\W+$")?,
            part_re: Regex::new(r"(?i)\bPart ?(\d)\b")?,
            initial_re: Regex::new(r"\bK\b(\s)")?,
            trailing_h_re: Regex::new(r"\s+[Hh]$")?,
        })
    }

    /// Clean a leftover title fragment.
    ///
    /// Returns `None` when normalization leaves nothing usable; an absent
    /// title is not an error.
    pub fn clean(&self, fragment: &str) -> Option<String> {
        // Empty bracket pairs are what extras extraction leaves behind.
        let title = self.empty_brackets_re.replace_all(fragment, "");
        let title = self.edge_re.replace_all(&title, "");
        let title = self.part_re.replace_all(&title, "Part $1");
        // A lone "K" before a space is a middle initial: Dwight K -> K.
        let title = self.initial_re.replace_all(&title, "K.$1");
        let title = title.replace("WUPHF com", "WUPHF.com");
        let title = super::dedup_spaces(&title);
        // Codec removal can leave an orphan trailing H.
        let title = self.trailing_h_re.replace(&title, "").trim().to_string();

        if title.chars().count() <= 1 {
            None
        } else {
            Some(title)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> TitleCleaner {
        TitleCleaner::new().unwrap()
    }

    #[test]
    fn test_plain_title_passes_through() {
        assert_eq!(cleaner().clean("Classy Christmas").as_deref(), Some("Classy Christmas"));
    }

    #[test]
    fn test_part_numbers_spaced() {
        assert_eq!(cleaner().clean("Part1 Part2").as_deref(), Some("Part 1 Part 2"));
    }

    #[test]
    fn test_middle_initial_rejoined() {
        assert_eq!(
            cleaner().clean("Dwight K Schrute").as_deref(),
            Some("Dwight K. Schrute")
        );
    }

    #[test]
    fn test_known_phrase_restored() {
        assert_eq!(cleaner().clean("WUPHF com").as_deref(), Some("WUPHF.com"));
    }

    #[test]
    fn test_trailing_orphan_h_dropped() {
        assert_eq!(cleaner().clean("Classy Christmas H").as_deref(), Some("Classy Christmas"));
    }

    #[test]
    fn test_stray_separators_trimmed() {
        assert_eq!(
            cleaner().clean("- Classy Christmas - - ").as_deref(),
            Some("Classy Christmas")
        );
    }

    #[test]
    fn test_empty_brackets_dropped() {
        assert_eq!(cleaner().clean("Title [][] [ ]").as_deref(), Some("Title"));
    }

    #[test]
    fn test_empty_fragment_is_absent() {
        assert_eq!(cleaner().clean(""), None);
        assert_eq!(cleaner().clean(" - "), None);
    }

    #[test]
    fn test_single_letter_is_absent() {
        assert_eq!(cleaner().clean("H"), None);
        assert_eq!(cleaner().clean("x"), None);
    }
}
