//! Plan command: scan, normalize, and write a rename plan.

use std::path::{Path, PathBuf};

use chrono::Utc;
use colored::Colorize;
use uuid::Uuid;

use crate::core::engine::{EngineConfig, Normalizer};
use crate::core::scanner::scan_directory;
use crate::models::config::load_config;
use crate::models::plan::{Plan, PLAN_VERSION};
use crate::services::llm::LlmClient;
use crate::Result;

/// Generate a rename plan for every media file under `source`.
pub async fn plan(
    source: &Path,
    output: Option<&Path>,
    show_name: Option<&str>,
    use_llm: bool,
) -> Result<()> {
    let mut config = load_config();
    if let Some(name) = show_name {
        config.show_name = name.to_string();
    }

    let files = scan_directory(source, &config.extensions)?;
    println!("Found {} media files.", files.len());

    let normalizer = Normalizer::new(EngineConfig {
        show_name: config.show_name.clone(),
        extensions: config.extensions.clone(),
    })?;

    let inputs: Vec<(PathBuf, String)> = files
        .into_iter()
        .map(|f| (f.path, f.basename))
        .collect();

    let outcome = if use_llm {
        let client = LlmClient::new(config.fallback.clone())?;
        normalizer.resolve_batch(&inputs, Some(&client)).await
    } else {
        normalizer.resolve_batch(&inputs, None::<&LlmClient>).await
    };

    let plan = Plan {
        version: PLAN_VERSION.to_string(),
        plan_id: Uuid::new_v4().to_string(),
        created_at: Utc::now().to_rfc3339(),
        show_name: config.show_name,
        source_path: source.to_path_buf(),
        mappings: outcome.mappings,
        unresolved: outcome.unresolved,
    };

    println!();
    println!("{}", "Proposed rename plan:".bold());
    for mapping in &plan.mappings {
        let old = mapping
            .old_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("  {}", old);
        println!("  {} {}", "->".green(), mapping.new_basename);
    }
    if !plan.unresolved.is_empty() {
        println!();
        println!("{}", "Unresolved:".bold().yellow());
        for item in &plan.unresolved {
            println!("  {} ({})", item.basename, item.reason);
        }
    }

    let output_path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("rename_plan.json"));
    std::fs::write(&output_path, serde_json::to_string_pretty(&plan)?)?;

    println!();
    println!(
        "Wrote {} with {} mappings, {} unresolved.",
        output_path.display().to_string().cyan(),
        plan.mappings.len(),
        plan.unresolved.len()
    );
    println!("Run {} to rename.", "scene-renamer apply".bold());

    Ok(())
}
