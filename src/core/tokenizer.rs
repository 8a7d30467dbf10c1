//! Edition extraction and right-to-left tail tokenization.
//!
//! Technical tags cluster at the filename tail in a roughly consistent
//! relative order (group innermost, resolution outermost). The tokenizer
//! peels them off in a fixed precedence order, each step removing at most
//! one match, so a looser field like a provider can never consume a
//! stricter field's text.

use crate::core::dictionaries::{
    canonical_video_codec, is_reserved_token, AudioCanon, AUDIO_PATTERNS, PROVIDERS, SOURCES,
    VIDEO_CODEC_PATTERNS,
};
use crate::core::state::ExtractionState;
use crate::Result;
use regex::Regex;

pub struct TailTokenizer {
    edition_re: Regex,
    web_dl_re: Regex,
    web_rip_re: Regex,
    group_dash_re: Regex,
    group_bracket_re: Regex,
    video_codec_res: Vec<Regex>,
    audio_res: Vec<(Regex, AudioCanon)>,
    source_res: Vec<(Regex, &'static str)>,
    provider_res: Vec<(Regex, &'static str)>,
    resolution_re: Regex,
    orphan_h_re: Regex,
}

impl TailTokenizer {
    pub fn new() -> Result<Self> {
        let video_codec_res = VIDEO_CODEC_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let audio_res = AUDIO_PATTERNS
            .iter()
            .map(|(p, canon)| Regex::new(p).map(|re| (re, *canon)))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let source_res = SOURCES
            .iter()
            .map(|(alias, canon)| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(alias))).map(|re| (re, *canon))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let provider_res = PROVIDERS
            .iter()
            .map(|(alias, canon)| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(alias))).map(|re| (re, *canon))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            edition_re: Regex::new(r"(?i)\b(EXTENDED CUT|EXTENDED|SUPERFAN(?: EPISODES)?)\b")?,
            web_dl_re: Regex::new(r"(?i)\bWEB[- ]?DL\b")?,
            web_rip_re: Regex::new(r"(?i)\bWEB[- ]?Rip\b")?,
            group_dash_re: Regex::new(r"-([A-Za-z0-9]{2,12})\s*$")?,
            group_bracket_re: Regex::new(r"\[([A-Za-z0-9]{2,12})\]\s*$")?,
            video_codec_res,
            audio_res,
            source_res,
            provider_res,
            resolution_re: Regex::new(r"(?i)\b(\d{3,4}p)\b")?,
            orphan_h_re: Regex::new(r"\s+[Hh]$")?,
        })
    }

    /// Detect and strip edition markers anywhere in the remainder.
    ///
    /// All synonym occurrences are removed but only one boolean is set;
    /// conflicting edition signals resolve to "any match wins".
    pub fn extract_edition(&self, state: &mut ExtractionState) {
        if self.edition_re.is_match(&state.remainder) {
            state.fields.extended = true;
            state.remainder = super::dedup_spaces(
                &self.edition_re.replace_all(&state.remainder, "").into_owned(),
            );
        }
    }

    /// Strip trailing technical tokens in fixed precedence order:
    /// group, video codec, audio codec, source, provider, resolution.
    /// Whatever remains is the title fragment.
    pub fn strip_tail(&self, state: &mut ExtractionState) {
        self.unify_web_tokens(state);
        self.take_release_group(state);
        self.take_video_codec(state);
        self.take_audio_codec(state);
        self.take_source(state);
        self.take_provider(state);
        self.take_resolution(state);
        state.trim_separators();
    }

    /// Unify WEB token spacing so source recognition sees one spelling.
    fn unify_web_tokens(&self, state: &mut ExtractionState) {
        let unified = self.web_dl_re.replace_all(&state.remainder, "WEB-DL");
        state.remainder = self
            .web_rip_re
            .replace_all(&unified, "WEBRip")
            .into_owned();
    }

    /// A trailing `-TOKEN` at the absolute end of the string, or a trailing
    /// `[TOKEN]` left over from an already-normalized name. Tokens claimed
    /// by the dictionaries are left for the stricter extractors.
    fn take_release_group(&self, state: &mut ExtractionState) {
        if state.fields.release_group.is_some() {
            return;
        }

        if let Some(caps) = self.group_dash_re.captures(&state.remainder) {
            let token = caps[1].to_string();
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let range = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
            // "WEB-DL" at the tail is a source token, not "-DL" group.
            let after_web = token.eq_ignore_ascii_case("dl")
                && state.remainder[..start].to_uppercase().ends_with("WEB");
            if !is_reserved_token(&token) && !after_web {
                state.fields.release_group = Some(token);
                state.remove_span(range);
                state.trim_separators();
                return;
            }
        }

        if let Some(caps) = self.group_bracket_re.captures(&state.remainder) {
            let token = caps[1].to_string();
            let range = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
            if !is_reserved_token(&token) {
                state.fields.release_group = Some(token);
                state.remove_span(range);
                state.trim_separators();
            }
        }
    }

    fn take_video_codec(&self, state: &mut ExtractionState) {
        if state.fields.video_codec.is_none() {
            for re in &self.video_codec_res {
                let found = re.find(&state.remainder).map(|m| (m.as_str().to_string(), m.range()));
                if let Some((token, range)) = found {
                    if let Some(canon) = canonical_video_codec(&token) {
                        state.fields.video_codec = Some(canon.to_string());
                    }
                    state.remove_span(range);
                    break;
                }
            }
        }

        // Removing the digits of "H 264" leaves a lone trailing H behind.
        state.remainder = self
            .orphan_h_re
            .replace(&state.remainder, "")
            .trim_end()
            .to_string();
    }

    fn take_audio_codec(&self, state: &mut ExtractionState) {
        if state.fields.audio_codec.is_some() {
            return;
        }
        for (re, canon) in &self.audio_res {
            let found = re
                .captures(&state.remainder)
                .map(|caps| (canon(&caps), caps.get(0).map(|m| m.range()).unwrap_or(0..0)));
            if let Some((value, range)) = found {
                state.fields.audio_codec = Some(value);
                state.remove_span(range);
                break;
            }
        }
    }

    fn take_source(&self, state: &mut ExtractionState) {
        if state.fields.source.is_some() {
            return;
        }
        for (re, canon) in &self.source_res {
            let range = re.find(&state.remainder).map(|m| m.range());
            if let Some(range) = range {
                state.fields.source = Some((*canon).to_string());
                state.remove_span(range);
                break;
            }
        }
    }

    fn take_provider(&self, state: &mut ExtractionState) {
        if state.fields.provider.is_some() {
            return;
        }
        for (re, canon) in &self.provider_res {
            let range = re.find(&state.remainder).map(|m| m.range());
            if let Some(range) = range {
                state.fields.provider = Some((*canon).to_string());
                state.remove_span(range);
                break;
            }
        }
    }

    fn take_resolution(&self, state: &mut ExtractionState) {
        if state.fields.resolution.is_some() {
            return;
        }
        let range = self.resolution_re.find(&state.remainder).map(|m| m.range());
        if let Some(range) = range {
            // Kept verbatim, not bucketed, so the canonical name round-trips.
            state.fields.resolution = Some(state.remainder[range.clone()].to_string());
            state.remove_span(range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::episode::EpisodeMarker;

    fn state(remainder: &str) -> ExtractionState {
        ExtractionState::new(
            EpisodeMarker {
                season: 1,
                episode_start: 1,
                episode_end: None,
            },
            remainder.to_string(),
        )
    }

    fn tokenizer() -> TailTokenizer {
        TailTokenizer::new().unwrap()
    }

    #[test]
    fn test_edition_extended_cut() {
        let mut s = state("Classy Christmas Extended Cut 1080p");
        tokenizer().extract_edition(&mut s);
        assert!(s.fields.extended);
        assert_eq!(s.remainder, "Classy Christmas 1080p");
    }

    #[test]
    fn test_edition_multiple_synonyms_all_removed() {
        let mut s = state("EXTENDED Superfan Episodes Title");
        tokenizer().extract_edition(&mut s);
        assert!(s.fields.extended);
        assert_eq!(s.remainder, "Title");
    }

    #[test]
    fn test_edition_absent() {
        let mut s = state("Plain Title");
        tokenizer().extract_edition(&mut s);
        assert!(!s.fields.extended);
        assert_eq!(s.remainder, "Plain Title");
    }

    #[test]
    fn test_full_tail() {
        let mut s = state("Classy Christmas 1080p PCOK WEB-DL DDP5 1 H 264-FLUX");
        tokenizer().strip_tail(&mut s);

        assert_eq!(s.fields.release_group.as_deref(), Some("FLUX"));
        assert_eq!(s.fields.video_codec.as_deref(), Some("x264"));
        assert_eq!(s.fields.audio_codec.as_deref(), Some("DDP5.1"));
        assert_eq!(s.fields.source.as_deref(), Some("WEB-DL"));
        assert_eq!(s.fields.provider.as_deref(), Some("PCOK"));
        assert_eq!(s.fields.resolution.as_deref(), Some("1080p"));
        assert_eq!(s.remainder, "Classy Christmas");
    }

    #[test]
    fn test_group_requires_trailing_dash() {
        let mut s = state("Title 720p FLUX");
        tokenizer().strip_tail(&mut s);
        assert_eq!(s.fields.release_group, None);
    }

    #[test]
    fn test_trailing_web_dl_not_captured_as_group() {
        let mut s = state("Title 1080p AMZN WEB-DL");
        tokenizer().strip_tail(&mut s);
        assert_eq!(s.fields.release_group, None);
        assert_eq!(s.fields.source.as_deref(), Some("WEB-DL"));
        assert_eq!(s.fields.provider.as_deref(), Some("AMZN"));
    }

    #[test]
    fn test_bracketed_group_from_canonical_name() {
        let mut s = state("Title 1080p [PCOK][WEB-DL][x264][FLUX]");
        tokenizer().strip_tail(&mut s);
        assert_eq!(s.fields.release_group.as_deref(), Some("FLUX"));
        assert_eq!(s.fields.video_codec.as_deref(), Some("x264"));
        assert_eq!(s.fields.source.as_deref(), Some("WEB-DL"));
        assert_eq!(s.fields.provider.as_deref(), Some("PCOK"));
    }

    #[test]
    fn test_bracketed_reserved_token_not_a_group() {
        let mut s = state("Title 720p [WEBRip]");
        tokenizer().strip_tail(&mut s);
        assert_eq!(s.fields.release_group, None);
        assert_eq!(s.fields.source.as_deref(), Some("WEBRip"));
    }

    #[test]
    fn test_video_codec_variants() {
        for (raw, canon) in [
            ("Title 720p x265-GRP", "x265"),
            ("Title 720p HEVC-GRP", "x265"),
            ("Title 720p H 265-GRP", "x265"),
            ("Title 720p AVC-GRP", "x264"),
            ("Title 720p H264-GRP", "x264"),
            ("Title 720p AV1-GRP", "AV1"),
        ] {
            let mut s = state(raw);
            tokenizer().strip_tail(&mut s);
            assert_eq!(s.fields.video_codec.as_deref(), Some(canon), "input: {raw}");
            assert_eq!(s.remainder, "Title", "input: {raw}");
        }
    }

    #[test]
    fn test_audio_priority_ddp_before_others() {
        let mut s = state("Title DDP5 1 DTS");
        tokenizer().strip_tail(&mut s);
        assert_eq!(s.fields.audio_codec.as_deref(), Some("DDP5.1"));
    }

    #[test]
    fn test_source_spacing_variants() {
        for raw in ["Title WEB DL", "Title WEBDL", "Title WEB-DL"] {
            let mut s = state(raw);
            tokenizer().strip_tail(&mut s);
            assert_eq!(s.fields.source.as_deref(), Some("WEB-DL"), "input: {raw}");
        }
        let mut s = state("Title WEB Rip");
        tokenizer().strip_tail(&mut s);
        assert_eq!(s.fields.source.as_deref(), Some("WEBRip"));
    }

    #[test]
    fn test_provider_alias_canonicalized() {
        let mut s = state("Title PEACOCK 720p");
        tokenizer().strip_tail(&mut s);
        assert_eq!(s.fields.provider.as_deref(), Some("PCOK"));
    }

    #[test]
    fn test_fields_are_write_once() {
        let mut s = state("Title 1080p 720p");
        s.fields.resolution = Some("2160p".to_string());
        tokenizer().strip_tail(&mut s);
        assert_eq!(s.fields.resolution.as_deref(), Some("2160p"));
    }
}
