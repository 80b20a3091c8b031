use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct Config {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve the data directory (`override_dir`, else the platform data dir) and create it.
    pub fn load(override_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match override_dir {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "healthbook")
                .context("Could not determine home directory")?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join("healthbook.db");

        Ok(Config { db_path, data_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_with_override_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("data");
        let config = Config::load(Some(dir.clone())).unwrap();
        assert!(dir.is_dir());
        assert_eq!(config.data_dir, dir);
        assert_eq!(config.db_path, dir.join("healthbook.db"));
    }
}
