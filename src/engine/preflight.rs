//! Pre-flight checks
//!
//! Everything verified before the first step starts: requirements resolve,
//! input files exist, step references exist. Each check enumerates every
//! problem it finds instead of stopping at the first one.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::engine::step_runner::run_quiet;
use crate::workflow::{Artifact, Pipeline, Requirement, Step};

/// Whether a single requirement is available.
///
/// With a `check` command the requirement resolves when that command exits
/// 0; otherwise it resolves when an executable of that name is on PATH.
pub async fn is_resolved(requirement: &Requirement, working_dir: &Path) -> bool {
    match &requirement.check {
        Some(check) => match run_quiet(check, working_dir).await {
            Ok(code) => code == 0,
            Err(e) => {
                debug!("Check for {} could not run: {}", requirement.name, e);
                false
            }
        },
        None => match which::which(&requirement.name) {
            Ok(path) => {
                debug!("Resolved {} at {}", requirement.name, path.display());
                true
            }
            Err(_) => false,
        },
    }
}

/// Names of all requirements that don't resolve, in configured order
pub async fn unresolved_requirements(pipeline: &Pipeline) -> Vec<String> {
    let mut missing = Vec::new();
    for requirement in &pipeline.config.requirements.packages {
        if !is_resolved(requirement, &pipeline.base_dir).await {
            missing.push(requirement.name.clone());
        }
    }
    missing
}

/// Every configured input that is absent on disk, resolved to full paths
pub fn missing_inputs(pipeline: &Pipeline) -> Vec<PathBuf> {
    missing_artifacts(&pipeline.config.inputs, &pipeline.base_dir)
}

pub fn missing_artifacts(artifacts: &[Artifact], base_dir: &Path) -> Vec<PathBuf> {
    artifacts
        .iter()
        .map(|a| base_dir.join(&a.path))
        .filter(|p| !p.exists())
        .collect()
}

/// Every step whose executable or script is absent on disk
pub fn missing_step_references(steps: &[Step]) -> Vec<PathBuf> {
    steps
        .iter()
        .filter(|s| !s.reference.exists())
        .map(|s| s.reference.clone())
        .collect()
}
