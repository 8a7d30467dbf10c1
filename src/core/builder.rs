//! Canonical name assembly.
//!
//! Template: `<Show> - <EpisodeToken> [- <Title>] [- Extended]
//! [- <Resolution> - <Extras>]` where the extras block is
//! `[provider][source][audio][video][group]` in that fixed order.

use crate::core::state::ParsedFields;

/// Episode token: `S07E11` or `S07E11-E12` for a range.
pub fn episode_token(season: u16, episode_start: u16, episode_end: Option<u16>) -> String {
    match episode_end {
        Some(end) => format!("S{:02}E{:02}-E{:02}", season, episode_start, end),
        None => format!("S{:02}E{:02}", season, episode_start),
    }
}

/// Bracketed extras block; empty string when no field is present.
fn extras_block(fields: &ParsedFields) -> String {
    [
        &fields.provider,
        &fields.source,
        &fields.audio_codec,
        &fields.video_codec,
        &fields.release_group,
    ]
    .iter()
    .filter_map(|f| f.as_deref())
    .map(|t| format!("[{t}]"))
    .collect()
}

/// Assemble the canonical basename (without extension) for a parsed name.
///
/// The show name is a configuration constant supplied by the caller, never
/// discovered from the filename.
pub fn build_basename(show_name: &str, fields: &ParsedFields) -> String {
    let mut parts = vec![
        show_name.to_string(),
        episode_token(fields.season, fields.episode_start, fields.episode_end),
    ];
    if let Some(title) = &fields.title {
        parts.push(title.clone());
    }
    if fields.extended {
        parts.push("Extended".to_string());
    }

    let mut name = parts.join(" - ");
    let extras = extras_block(fields);
    match (&fields.resolution, extras.is_empty()) {
        (Some(res), false) => name = format!("{name} - {res} - {extras}"),
        (Some(res), true) => name = format!("{name} - {res}"),
        (None, false) => name = format!("{name} - {extras}"),
        (None, true) => {}
    }

    super::dedup_spaces(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ParsedFields {
        ParsedFields {
            season: 7,
            episode_start: 11,
            episode_end: Some(12),
            resolution: Some("1080p".to_string()),
            provider: Some("PCOK".to_string()),
            source: Some("WEB-DL".to_string()),
            audio_codec: Some("DDP5.1".to_string()),
            video_codec: Some("x264".to_string()),
            release_group: Some("FLUX".to_string()),
            extended: true,
            title: Some("Classy Christmas".to_string()),
        }
    }

    #[test]
    fn test_episode_token_single_and_range() {
        assert_eq!(episode_token(1, 5, None), "S01E05");
        assert_eq!(episode_token(7, 11, Some(12)), "S07E11-E12");
    }

    #[test]
    fn test_full_assembly() {
        assert_eq!(
            build_basename("The Office (US)", &fields()),
            "The Office (US) - S07E11-E12 - Classy Christmas - Extended - 1080p - \
             [PCOK][WEB-DL][DDP5.1][x264][FLUX]"
        );
    }

    #[test]
    fn test_extras_segment_omitted_when_empty() {
        let fields = ParsedFields {
            season: 1,
            episode_start: 1,
            ..Default::default()
        };
        assert_eq!(build_basename("Show", &fields), "Show - S01E01");
    }

    #[test]
    fn test_resolution_without_extras() {
        let fields = ParsedFields {
            season: 2,
            episode_start: 3,
            resolution: Some("720p".to_string()),
            ..Default::default()
        };
        assert_eq!(build_basename("Show", &fields), "Show - S02E03 - 720p");
    }

    #[test]
    fn test_extras_without_resolution() {
        let fields = ParsedFields {
            season: 2,
            episode_start: 3,
            video_codec: Some("x265".to_string()),
            release_group: Some("GRP".to_string()),
            ..Default::default()
        };
        assert_eq!(build_basename("Show", &fields), "Show - S02E03 - [x265][GRP]");
    }

    #[test]
    fn test_absent_fields_skipped_in_extras_order() {
        let fields = ParsedFields {
            season: 1,
            episode_start: 1,
            source: Some("HDTV".to_string()),
            release_group: Some("LOL".to_string()),
            resolution: Some("720p".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_basename("Show", &fields),
            "Show - S01E01 - 720p - [HDTV][LOL]"
        );
    }
}
