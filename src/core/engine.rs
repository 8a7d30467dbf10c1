//! Pipeline orchestration and batch resolution.
//!
//! `Normalizer` wires the detector, tokenizer, title cleaner and builder
//! into one pure basename -> basename transformation, and layers the batch
//! contract on top: local resolution first, then an optional external
//! fallback for the unparsed set, then duplicate-target detection. Every
//! failure is per-name; one unparseable name never aborts the batch.

use std::collections::HashMap;
use std::path::PathBuf;

use regex::Regex;

use crate::core::builder::build_basename;
use crate::core::episode::EpisodeDetector;
use crate::core::state::{ExtractionState, ParsedFields};
use crate::core::title::TitleCleaner;
use crate::core::tokenizer::TailTokenizer;
use crate::models::plan::{RenameMapping, Unresolved};
use crate::{Error, Result};

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Canonical show name; supplied by the caller, never discovered from
    /// the filename.
    pub show_name: String,
    /// Recognized media extensions, without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            show_name: "The Office (US)".to_string(),
            extensions: vec!["mkv".to_string(), "mp4".to_string(), "m4v".to_string()],
        }
    }
}

/// External fallback collaborator contract: a batch of unparsed basenames
/// in, a partial old -> new mapping out. A test double can substitute a
/// deterministic stub.
pub trait FallbackResolver {
    fn resolve(
        &self,
        unparsed: &[String],
    ) -> impl std::future::Future<Output = Result<HashMap<String, String>>> + Send;
}

/// A name the local pipeline could not parse, kept untouched for the
/// fallback collaborator.
#[derive(Debug, Clone)]
pub struct UnparsedName {
    pub path: PathBuf,
    pub basename: String,
}

/// Result of the local (pure) pass over a batch.
#[derive(Debug, Default)]
pub struct LocalBatch {
    pub mappings: Vec<RenameMapping>,
    pub unparsed: Vec<UnparsedName>,
}

/// Result of a full batch resolution, fallback included.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub mappings: Vec<RenameMapping>,
    pub unresolved: Vec<Unresolved>,
}

/// The normalization engine.
pub struct Normalizer {
    config: EngineConfig,
    detector: EpisodeDetector,
    tokenizer: TailTokenizer,
    cleaner: TitleCleaner,
    extension_re: Regex,
}

impl Normalizer {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let alternatives = config
            .extensions
            .iter()
            .map(|e| regex::escape(e))
            .collect::<Vec<_>>()
            .join("|");
        let extension_re = Regex::new(&format!(r"(?i)\.({alternatives})$"))?;

        Ok(Self {
            config,
            detector: EpisodeDetector::new()?,
            tokenizer: TailTokenizer::new()?,
            cleaner: TitleCleaner::new()?,
            extension_re,
        })
    }

    /// Configured show name.
    pub fn show_name(&self) -> &str {
        &self.config.show_name
    }

    /// Split a basename into stem and extension. The extension is kept
    /// verbatim (leading dot included) so it can be re-appended unchanged.
    pub fn split_extension<'a>(&self, basename: &'a str) -> (&'a str, &'a str) {
        match self.extension_re.find(basename) {
            Some(m) => (&basename[..m.start()], m.as_str()),
            None => (basename, ""),
        }
    }

    /// Parse a basename into structured fields.
    ///
    /// Fails with [`Error::NoEpisodeMarker`] when the name carries no
    /// recognizable season/episode marker; such names are never guessed at.
    pub fn parse(&self, basename: &str) -> Result<ParsedFields> {
        let (stem, _ext) = self.split_extension(basename);

        // Unify separators for detection; the original text is not needed
        // again, everything before the marker is discarded.
        let work = super::dedup_spaces(&stem.replace(['_', '.'], " "));

        let (marker, remainder) = self
            .detector
            .detect(&work)
            .ok_or_else(|| Error::NoEpisodeMarker(basename.to_string()))?;

        let mut state = ExtractionState::new(marker, remainder);
        self.tokenizer.extract_edition(&mut state);
        self.tokenizer.strip_tail(&mut state);
        state.fields.title = self.cleaner.clean(&state.remainder);

        Ok(state.fields)
    }

    /// Normalize one basename into its canonical form, extension preserved.
    pub fn normalize(&self, basename: &str) -> Result<String> {
        let (_stem, ext) = self.split_extension(basename);
        let fields = self.parse(basename)?;
        Ok(format!(
            "{}{}",
            build_basename(&self.config.show_name, &fields),
            ext
        ))
    }

    /// Run the pure local pass over a batch of `(path, basename)` pairs.
    ///
    /// Already-canonical names are skipped (no mapping entry); names with no
    /// episode marker land in the unparsed set, untouched.
    pub fn normalize_batch(&self, inputs: &[(PathBuf, String)]) -> LocalBatch {
        let mut batch = LocalBatch::default();

        for (path, basename) in inputs {
            match self.normalize(basename) {
                Ok(new_basename) if new_basename != *basename => {
                    batch.mappings.push(RenameMapping {
                        old_path: path.clone(),
                        new_basename,
                    });
                }
                Ok(_) => {
                    tracing::debug!("Already canonical: {}", basename);
                }
                Err(e) => {
                    tracing::debug!("Unparsed ({}): {}", e, basename);
                    batch.unparsed.push(UnparsedName {
                        path: path.clone(),
                        basename: basename.clone(),
                    });
                }
            }
        }

        batch
    }

    /// Resolve a batch end to end: local pass, optional fallback for the
    /// unparsed set, then duplicate-target detection.
    ///
    /// An unavailable fallback is treated as an empty mapping; affected
    /// names are reported unresolved, never silently dropped.
    pub async fn resolve_batch<F: FallbackResolver>(
        &self,
        inputs: &[(PathBuf, String)],
        fallback: Option<&F>,
    ) -> BatchOutcome {
        let local = self.normalize_batch(inputs);
        let mut outcome = BatchOutcome {
            mappings: local.mappings,
            unresolved: Vec::new(),
        };

        let mut proposals: HashMap<String, String> = HashMap::new();
        if let Some(resolver) = fallback {
            if !local.unparsed.is_empty() {
                let basenames: Vec<String> =
                    local.unparsed.iter().map(|u| u.basename.clone()).collect();
                match resolver.resolve(&basenames).await {
                    Ok(mapping) => proposals = mapping,
                    Err(e) => tracing::warn!("Fallback unavailable, keeping names unresolved: {}", e),
                }
            }
        }

        for unparsed in local.unparsed {
            match proposals.get(&unparsed.basename) {
                Some(proposed) if self.accepts_proposal(&unparsed.basename, proposed) => {
                    outcome.mappings.push(RenameMapping {
                        old_path: unparsed.path,
                        new_basename: proposed.clone(),
                    });
                }
                Some(proposed) => {
                    outcome.unresolved.push(Unresolved {
                        basename: unparsed.basename,
                        reason: format!("fallback proposal rejected: {proposed}"),
                    });
                }
                None => {
                    outcome.unresolved.push(Unresolved {
                        basename: unparsed.basename,
                        reason: "NoEpisodeMarker".to_string(),
                    });
                }
            }
        }

        withdraw_duplicate_targets(&mut outcome);
        outcome
    }

    /// Validate a fallback proposal: old and new must differ and the
    /// extension must be preserved verbatim. Field-level correctness is the
    /// collaborator's responsibility, not checked here.
    fn accepts_proposal(&self, old_basename: &str, new_basename: &str) -> bool {
        if old_basename == new_basename {
            return false;
        }
        let (_, old_ext) = self.split_extension(old_basename);
        let (_, new_ext) = self.split_extension(new_basename);
        old_ext == new_ext
    }
}

/// Two old names mapping to the same target path is a conflict that must
/// surface before any apply step: all involved mappings are withdrawn and
/// reported.
fn withdraw_duplicate_targets(outcome: &mut BatchOutcome) {
    let mut counts: HashMap<PathBuf, usize> = HashMap::new();
    for mapping in &outcome.mappings {
        *counts.entry(mapping.target_path()).or_insert(0) += 1;
    }

    let (kept, withdrawn): (Vec<_>, Vec<_>) = outcome
        .mappings
        .drain(..)
        .partition(|m| counts[&m.target_path()] == 1);

    outcome.mappings = kept;
    for mapping in withdrawn {
        let basename = mapping
            .old_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| mapping.old_path.display().to_string());
        tracing::warn!(
            "Target collision: {} -> {}",
            basename,
            mapping.new_basename
        );
        outcome.unresolved.push(Unresolved {
            basename,
            reason: format!("target collision: {}", mapping.new_basename),
        });
    }
}
