//! Extraction working state.
//!
//! A name is processed by threading an [`ExtractionState`] through the
//! pipeline steps: the remainder only ever shrinks, and each metadata slot
//! is write-once. Once an extractor fills a slot, later extractors leave it
//! alone, which prevents double-matching (audio codec text re-matching the
//! video codec pattern, for example).

use std::ops::Range;

use super::dedup_spaces;
use super::episode::EpisodeMarker;

/// Metadata fields extracted from one filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub season: u16,
    pub episode_start: u16,
    pub episode_end: Option<u16>,
    pub resolution: Option<String>,
    pub provider: Option<String>,
    pub source: Option<String>,
    pub audio_codec: Option<String>,
    pub video_codec: Option<String>,
    pub release_group: Option<String>,
    pub extended: bool,
    pub title: Option<String>,
}

/// Mutable working value while one name is processed.
#[derive(Debug, Clone)]
pub struct ExtractionState {
    /// Shrinking remainder of the filename stem.
    pub remainder: String,
    /// Fields extracted so far.
    pub fields: ParsedFields,
}

impl ExtractionState {
    /// Start a new extraction from a detected episode marker and the text
    /// after it.
    pub fn new(marker: EpisodeMarker, remainder: String) -> Self {
        Self {
            remainder,
            fields: ParsedFields {
                season: marker.season,
                episode_start: marker.episode_start,
                episode_end: marker.episode_end,
                ..Default::default()
            },
        }
    }

    /// Remove a matched span from the remainder and collapse the resulting
    /// whitespace. Extractors never re-insert text.
    pub fn remove_span(&mut self, range: Range<usize>) {
        self.remainder.replace_range(range, "");
        self.remainder = dedup_spaces(&self.remainder);
    }

    /// Trim stray separators from both ends of the remainder.
    pub fn trim_separators(&mut self) {
        self.remainder = self
            .remainder
            .trim_matches(|c: char| matches!(c, ' ' | '-' | '.' | '_'))
            .to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker() -> EpisodeMarker {
        EpisodeMarker {
            season: 7,
            episode_start: 11,
            episode_end: Some(12),
        }
    }

    #[test]
    fn test_new_carries_marker_fields() {
        let state = ExtractionState::new(marker(), "rest".to_string());
        assert_eq!(state.fields.season, 7);
        assert_eq!(state.fields.episode_start, 11);
        assert_eq!(state.fields.episode_end, Some(12));
        assert!(state.fields.resolution.is_none());
    }

    #[test]
    fn test_remove_span_collapses_whitespace() {
        let mut state = ExtractionState::new(marker(), "a b c".to_string());
        state.remove_span(2..3);
        assert_eq!(state.remainder, "a c");
    }

    #[test]
    fn test_trim_separators() {
        let mut state = ExtractionState::new(marker(), " -. title .- ".to_string());
        state.trim_separators();
        assert_eq!(state.remainder, "title");
    }
}
