//! Pipeline loader
//!
//! Locate and load the pipeline configuration, resolving the base directory
//! that step references and artifact paths are relative to.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::pipeline_config::{Pipeline, PipelineConfig};

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pipeline.yaml";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error in {file}: {error}")]
    Yaml {
        file: String,
        error: serde_yaml::Error,
    },

    #[error("Pipeline config not found: {0}")]
    NotFound(PathBuf),
}

pub struct PipelineLoader;

impl PipelineLoader {
    /// Load an explicit config file, or `pipeline.yaml` from `cwd`, or the
    /// built-in reference workflow rooted at `cwd`.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Pipeline, LoadError> {
        match explicit {
            Some(path) => {
                let path = cwd.join(path);
                if !path.exists() {
                    return Err(LoadError::NotFound(path));
                }
                Self::load_file(&path, cwd)
            }
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if candidate.exists() {
                    Self::load_file(&candidate, cwd)
                } else {
                    debug!("No {} in {}, using built-in workflow", DEFAULT_CONFIG_FILE, cwd.display());
                    Ok(Pipeline::new(PipelineConfig::reference(), cwd))
                }
            }
        }
    }

    /// Load a config file; its parent directory becomes the base directory.
    pub fn load_file(path: &Path, cwd: &Path) -> Result<Pipeline, LoadError> {
        let path = cwd.join(path);
        let config = PipelineConfig::load(&path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());

        debug!(
            "Loaded pipeline '{}' from {} (base: {})",
            config.name,
            path.display(),
            base_dir.display()
        );

        Ok(Pipeline {
            config,
            base_dir,
            source: Some(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_default_file_from_cwd() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"
name: from-file
steps:
  - description: one
    run: one.sh
"#,
        )
        .unwrap();

        let pipeline = PipelineLoader::load(None, dir.path()).unwrap();
        assert_eq!(pipeline.config.name, "from-file");
        assert_eq!(pipeline.base_dir, dir.path());
        assert_eq!(pipeline.source, Some(dir.path().join(DEFAULT_CONFIG_FILE)));
    }

    #[test]
    fn test_fallback_to_reference() {
        let dir = tempdir().unwrap();

        let pipeline = PipelineLoader::load(None, dir.path()).unwrap();
        assert_eq!(pipeline.config, PipelineConfig::reference());
        assert!(pipeline.source.is_none());
    }

    #[test]
    fn test_explicit_file_sets_base_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("custom.yaml"), "name: custom").unwrap();

        let pipeline =
            PipelineLoader::load(Some(Path::new("nested/custom.yaml")), dir.path()).unwrap();
        assert_eq!(pipeline.config.name, "custom");
        assert_eq!(pipeline.base_dir, nested);
    }

    #[test]
    fn test_explicit_file_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");

        let err = PipelineLoader::load(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(p) if p == missing));
    }

    #[test]
    fn test_invalid_yaml_names_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "steps: [unclosed").unwrap();

        let err = PipelineLoader::load(Some(&path), dir.path()).unwrap_err();
        assert!(err.to_string().contains("bad.yaml"));
    }
}
