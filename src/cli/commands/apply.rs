//! Apply command: execute the renames in a plan file.
//!
//! A proposed rename is skipped, never forced, when a filesystem entry
//! already exists at the target path. Duplicate targets within one plan
//! are rejected before any rename runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::models::plan::{Plan, PLAN_VERSION};
use crate::utils::fs::move_file;
use crate::{Error, Result};

/// Outcome counts of one apply run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub renamed: usize,
    pub skipped_existing: usize,
    pub missing_source: usize,
}

/// Read and validate a plan file.
pub fn read_plan(plan_file: &Path) -> Result<Plan> {
    let content = std::fs::read_to_string(plan_file)
        .map_err(|e| Error::InvalidPlanFile(format!("{}: {}", plan_file.display(), e)))?;
    let plan: Plan = serde_json::from_str(&content)
        .map_err(|e| Error::InvalidPlanFile(format!("{}: {}", plan_file.display(), e)))?;

    if plan.version != PLAN_VERSION {
        return Err(Error::PlanValidationError(format!(
            "unsupported plan version {}",
            plan.version
        )));
    }
    Ok(plan)
}

/// Apply the renames in a plan.
///
/// Fails before touching the filesystem when two mappings resolve to the
/// same target path.
pub fn apply_plan(plan: &Plan, dry_run: bool) -> Result<ApplySummary> {
    // Plan files are external input: re-check for duplicate targets even
    // though the engine withdraws them at plan time.
    let mut targets: HashMap<PathBuf, &Path> = HashMap::new();
    for mapping in &plan.mappings {
        if let Some(first) = targets.insert(mapping.target_path(), &mapping.old_path) {
            return Err(Error::TargetCollision(format!(
                "{} and {} both map to {}",
                first.display(),
                mapping.old_path.display(),
                mapping.new_basename
            )));
        }
    }

    let pb = ProgressBar::new(plan.mappings.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut summary = ApplySummary::default();
    for mapping in &plan.mappings {
        pb.set_message(mapping.new_basename.clone());
        pb.inc(1);

        if !mapping.old_path.exists() {
            tracing::warn!("Source missing, skipping: {}", mapping.old_path.display());
            summary.missing_source += 1;
            continue;
        }

        let target = mapping.target_path();
        if target.exists() {
            tracing::warn!("Target exists, skipping: {}", target.display());
            summary.skipped_existing += 1;
            continue;
        }

        if dry_run {
            tracing::info!(
                "(dry-run) {} -> {}",
                mapping.old_path.display(),
                mapping.new_basename
            );
            summary.renamed += 1;
            continue;
        }

        move_file(&mapping.old_path, &target)?;
        summary.renamed += 1;
    }
    pb.finish_and_clear();

    Ok(summary)
}

/// Apply a plan file.
pub async fn apply(plan_file: &Path, dry_run: bool) -> Result<()> {
    let plan = read_plan(plan_file)?;

    if dry_run {
        println!("{}", "[DRY-RUN] No files will be renamed.".bold().yellow());
    }
    println!(
        "Applying {} renames from {}...",
        plan.mappings.len(),
        plan_file.display()
    );

    let summary = apply_plan(&plan, dry_run)?;

    println!();
    println!(
        "{} renamed, {} skipped (target exists), {} missing.",
        summary.renamed.to_string().green(),
        summary.skipped_existing,
        summary.missing_source
    );
    if !plan.unresolved.is_empty() {
        println!(
            "{} names in the plan remain unresolved.",
            plan.unresolved.len().to_string().yellow()
        );
    }

    Ok(())
}
