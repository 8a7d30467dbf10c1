//! Token dictionaries shared by the extractors.
//!
//! All tables are ordered: extractors try entries first to last and stop at
//! the first match, so the order here is the precedence order.

/// Provider aliases in match order. Several raw aliases may map to the same
/// canonical token (PEACOCK and PCOK are both PCOK).
pub const PROVIDERS: &[(&str, &str)] = &[
    ("PCOK", "PCOK"),
    ("NF", "NF"),
    ("AMZN", "AMZN"),
    ("HULU", "HULU"),
    ("MAX", "MAX"),
    ("DSNP", "DSNP"),
    ("ITUNES", "iTunes"),
    ("APPLETV", "AppleTV"),
    ("PEACOCK", "PCOK"),
    ("PARAMOUNT", "PARAMOUNT"),
];

/// Source/distribution aliases in match order. Spacing variants such as
/// `WEB DL` are unified before this table is consulted.
pub const SOURCES: &[(&str, &str)] = &[
    ("WEB-DL", "WEB-DL"),
    ("WEBRIP", "WEBRip"),
    ("BLURAY", "BluRay"),
    ("BDRIP", "BDRip"),
    ("HDTV", "HDTV"),
];

/// Video codec token patterns in match order. The bare digit forms run
/// before the `H`-prefixed forms, so `H 264` loses its digits first and the
/// orphan `H` is cleaned up separately.
pub const VIDEO_CODEC_PATTERNS: &[&str] = &[
    r"(?i)\bx?264\b",
    r"(?i)\bx?265\b",
    r"(?i)\bAV1\b",
    r"(?i)\bH[. ]?264\b",
    r"(?i)\bH[. ]?265\b",
    r"(?i)\bHEVC\b",
    r"(?i)\bAVC\b",
];

/// Normalize a matched video codec token: HEVC family -> x265, AVC family
/// -> x264, AV1 stays AV1.
pub fn canonical_video_codec(token: &str) -> Option<&'static str> {
    let upper = token.to_uppercase();
    if upper.contains("265") || upper.contains("HEVC") {
        Some("x265")
    } else if upper.contains("264") || upper.contains("AVC") {
        Some("x264")
    } else if upper.contains("AV1") {
        Some("AV1")
    } else {
        None
    }
}

/// Canonicalizer applied to an audio pattern match.
pub type AudioCanon = fn(&regex::Captures<'_>) -> String;

fn ddp_channels(caps: &regex::Captures<'_>) -> String {
    format!("DDP{}.{}", &caps[2], &caps[3])
}

fn eac3(_: &regex::Captures<'_>) -> String {
    "EAC3".to_string()
}

fn ac3(_: &regex::Captures<'_>) -> String {
    "AC3".to_string()
}

fn dts(caps: &regex::Captures<'_>) -> String {
    let upper = caps[0].to_uppercase();
    if upper.contains("HD") || upper.contains("MA") {
        "DTS-HD MA".to_string()
    } else {
        "DTS".to_string()
    }
}

fn truehd(_: &regex::Captures<'_>) -> String {
    "TrueHD".to_string()
}

fn atmos(_: &regex::Captures<'_>) -> String {
    "Atmos".to_string()
}

/// Audio codec patterns in priority order: Dolby-Digital-Plus channel pairs
/// first, then the fixed-token codecs. First match wins.
pub const AUDIO_PATTERNS: &[(&str, AudioCanon)] = &[
    (r"(?i)\b(DD\+|DDP|DD)[ .]?(\d)[ .]?(\d)\b", ddp_channels),
    (r"(?i)\bEAC3\b", eac3),
    (r"(?i)\bAC3\b", ac3),
    (r"(?i)\bDTS(?:-?HD)?(?: ?MA)?\b", dts),
    (r"(?i)\bTRUEHD\b", truehd),
    (r"(?i)\bATMOS\b", atmos),
];

/// Exact tokens that must never be captured as a release group.
const VIDEO_TOKENS: &[&str] = &["X264", "X265", "H264", "H265", "264", "265", "HEVC", "AVC", "AV1"];
const AUDIO_TOKENS: &[&str] = &["EAC3", "AC3", "DTS", "TRUEHD", "ATMOS"];

/// Whether a bare token is already claimed by one of the dictionaries.
///
/// The release-group extractor consults this so that a trailing `[WEBRip]`
/// or `[NF]` from a previously-normalized name is left for the stricter
/// extractors instead of being swallowed as a group.
pub fn is_reserved_token(token: &str) -> bool {
    let upper = token.to_uppercase();

    if PROVIDERS
        .iter()
        .any(|(alias, canon)| upper == *alias || token.eq_ignore_ascii_case(canon))
    {
        return true;
    }
    if SOURCES
        .iter()
        .any(|(alias, canon)| upper == *alias || token.eq_ignore_ascii_case(canon))
    {
        return true;
    }
    if VIDEO_TOKENS.contains(&upper.as_str()) || AUDIO_TOKENS.contains(&upper.as_str()) {
        return true;
    }
    if upper.starts_with("DDP") && upper[3..].chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    // Resolution shaped: 3-4 digits followed by "p"
    if let Some(digits) = upper.strip_suffix('P') {
        if (3..=4).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
    }

    false
}
