//! Config file bootstrap.

use anyhow::Context;
use boleta_client::ClientConfig;
use std::path::{Path, PathBuf};

/// Writes the effective configuration to `config_path` or the platform
/// default. Refuses to replace an existing file unless `force` is set.
pub fn init(config_path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = config_path
        .or_else(ClientConfig::default_config_path)
        .context("no config directory available, pass --config")?;

    let written = write_config(&path, force)?;
    println!("Wrote {}", written.display());
    Ok(())
}

fn write_config(path: &Path, force: bool) -> anyhow::Result<PathBuf> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let config = ClientConfig::load(Some(path.to_path_buf())).context("loading configuration")?;
    config.save(Some(path.to_path_buf()))?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_config_then_refuse_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("boleta.toml");

        write_config(&path, false).unwrap();
        let saved = ClientConfig::from_file(&path).unwrap();
        assert_eq!(saved.display.currency_code, "PEN");

        let err = write_config(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        assert!(write_config(&path, true).is_ok());
    }
}
