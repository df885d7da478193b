use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, its `store` and `.backups` subdirectories, and an initial
/// `config.json` file with default settings.
///
/// # Arguments
/// - `zenwealth_home` - The directory that will be the root of data directory, e.g.
///   `$HOME/zenwealth`
///
/// # Errors
/// - Returns an error if the directory has already been initialized.
/// - Returns an error if any file operations fail.
pub fn init(zenwealth_home: &Path) -> Result<Out<()>> {
    let config = Config::create(zenwealth_home)
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the zenwealth directory at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("zw");
        let out = init(&home).unwrap();
        assert!(out.message().starts_with("Successfully created"));
        assert!(home.join("config.json").is_file());
        assert!(home.join("store").is_dir());
        assert!(home.join(".backups").is_dir());
    }

    #[test]
    fn test_init_twice() {
        let dir = TempDir::new().unwrap();
        init(dir.path()).unwrap();
        let e = init(dir.path()).unwrap_err();
        assert_eq!(e.to_string(), "Configuration error");
        assert!(format!("{e:#}").contains("already exists"));
    }
}
