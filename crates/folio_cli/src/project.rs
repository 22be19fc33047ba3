//! Project scaffolding

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::FolioConfig;

/// Sample content: six related skills, an experience timeline, projects
pub const SAMPLE_CONTENT: &str = include_str!("../assets/portfolio.toml");

/// Write folio.toml and a sample content file into `path`
pub fn create_project(path: &Path, force: bool) -> Result<()> {
    let config_path = path.join("folio.toml");
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let config = FolioConfig::default();
    fs::write(&config_path, config.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let content_path = path.join(&config.content.path);
    if content_path.exists() && !force {
        tracing::info!(path = %content_path.display(), "keeping existing content file");
    } else {
        fs::write(&content_path, SAMPLE_CONTENT)
            .with_context(|| format!("Failed to write {}", content_path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_content_is_valid() {
        let portfolio: folio_core::Portfolio = toml::from_str(SAMPLE_CONTENT).unwrap();
        let portfolio = portfolio.validated().unwrap();
        assert_eq!(portfolio.skills.len(), 6);
        assert!(portfolio.unresolved_related().is_empty());
        assert!(!portfolio.experience.entries.is_empty());
        assert!(portfolio.projects.items.len() > 1);
    }

    #[test]
    fn test_create_then_load() {
        let dir = tempfile::tempdir().unwrap();
        create_project(dir.path(), false).unwrap();

        let config = FolioConfig::load_from_dir(dir.path()).unwrap();
        let portfolio = config.load_content(dir.path()).unwrap();
        assert_eq!(portfolio.skills.len(), 6);
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        create_project(dir.path(), false).unwrap();
        assert!(create_project(dir.path(), false).is_err());
        assert!(create_project(dir.path(), true).is_ok());
    }
}
