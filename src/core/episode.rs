//! Season/episode marker detection.
//!
//! A recognizable marker is the hard precondition for the whole pipeline:
//! without one the name cannot be confidently restructured and must be
//! escalated instead of guessed.

use crate::Result;
use regex::Regex;

/// A detected season/episode marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeMarker {
    pub season: u16,
    pub episode_start: u16,
    pub episode_end: Option<u16>,
}

/// Detector for `SxxEyy` markers with optional contiguous ranges.
pub struct EpisodeDetector {
    marker_re: Regex,
}

impl EpisodeDetector {
    pub fn new() -> Result<Self> {
        // Single form SxxEyy, or a range SxxEyy-Ezz / SxxEyyEzz / SxxEyy Ezz.
        // 1-2 digit season, 1-3 digit episode, case-insensitive.
        let marker_re = Regex::new(r"(?i)\bS(\d{1,2})E(\d{1,3})(?:[-. ]?E?(\d{1,3}))?\b")?;
        Ok(Self { marker_re })
    }

    /// Detect the first episode marker in `text`.
    ///
    /// On match, returns the marker and the text after it, trimmed of
    /// leading separators. Returns `None` when the name carries no
    /// recognizable marker.
    pub fn detect(&self, text: &str) -> Option<(EpisodeMarker, String)> {
        let caps = self.marker_re.captures(text)?;

        let season: u16 = caps[1].parse().ok()?;
        let episode_start: u16 = caps[2].parse().ok()?;
        let mut episode_end: Option<u16> = caps.get(3).and_then(|m| m.as_str().parse().ok());

        // A backwards range is noise, not a marker we can trust. Keep the
        // start episode and drop the range.
        if let Some(end) = episode_end {
            if end < episode_start {
                tracing::warn!(
                    "Dropping backwards episode range E{:02}-E{:02} in '{}'",
                    episode_start,
                    end,
                    text
                );
                episode_end = None;
            }
        }

        let remainder = text[caps.get(0)?.end()..]
            .trim_matches(|c: char| matches!(c, ' ' | '-' | '.' | '_'))
            .to_string();

        Some((
            EpisodeMarker {
                season,
                episode_start,
                episode_end,
            },
            remainder,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> EpisodeDetector {
        EpisodeDetector::new().unwrap()
    }

    #[test]
    fn test_single_marker() {
        let (marker, rest) = detector().detect("Show S03E10 Part1").unwrap();
        assert_eq!(marker.season, 3);
        assert_eq!(marker.episode_start, 10);
        assert_eq!(marker.episode_end, None);
        assert_eq!(rest, "Part1");
    }

    #[test]
    fn test_range_with_dash() {
        let (marker, rest) = detector().detect("Show S07E11-E12 Classy Christmas").unwrap();
        assert_eq!(marker.season, 7);
        assert_eq!(marker.episode_start, 11);
        assert_eq!(marker.episode_end, Some(12));
        assert_eq!(rest, "Classy Christmas");
    }

    #[test]
    fn test_range_without_separator() {
        let (marker, _) = detector().detect("Show S01E01E02").unwrap();
        assert_eq!(marker.episode_end, Some(2));
    }

    #[test]
    fn test_range_with_space() {
        let (marker, _) = detector().detect("Show S01E01 E02 Title").unwrap();
        assert_eq!(marker.episode_end, Some(2));
    }

    #[test]
    fn test_case_insensitive() {
        let (marker, _) = detector().detect("show s05e09 title").unwrap();
        assert_eq!(marker.season, 5);
        assert_eq!(marker.episode_start, 9);
    }

    #[test]
    fn test_three_digit_episode() {
        let (marker, _) = detector().detect("Show S02E100").unwrap();
        assert_eq!(marker.episode_start, 100);
    }

    #[test]
    fn test_resolution_not_mistaken_for_range() {
        let (marker, rest) = detector().detect("Show S03E10 1080p").unwrap();
        assert_eq!(marker.episode_end, None);
        assert_eq!(rest, "1080p");
    }

    #[test]
    fn test_backwards_range_dropped() {
        let (marker, _) = detector().detect("Show S01E05-E03").unwrap();
        assert_eq!(marker.episode_start, 5);
        assert_eq!(marker.episode_end, None);
    }

    #[test]
    fn test_no_marker() {
        assert!(detector().detect("randomfile no markers").is_none());
        assert!(detector().detect("Movie 2019 1080p").is_none());
    }
}
