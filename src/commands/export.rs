//! Export command handler.

use crate::args::ExportArgs;
use crate::backup::{write_json, EXPORT};
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

/// Writes every transaction, in repository order, to a pretty-printed JSON file that `import` can
/// read back.
///
/// With `--out` the file is written exactly there. Otherwise it goes to the backups directory as
/// `export.YYYY-MM-DD-NNN.json` and older exports beyond `backup_copies` are removed.
///
/// Returns the path of the written file.
///
/// # Errors
/// - Returns an error if the file cannot be written.
pub fn export(config: Config, args: ExportArgs) -> Result<Out<PathBuf>> {
    let repo = config.repository().pub_result(ErrorType::Storage)?;
    let path = match args.out() {
        Some(out) => {
            write_json(out, repo.transactions())
                .with_context(|| format!("Unable to export to {}", out.display()))
                .pub_result(ErrorType::Storage)?;
            out.to_path_buf()
        }
        None => config
            .backup()
            .save_json(EXPORT, repo.transactions())
            .pub_result(ErrorType::Storage)?,
    };
    info!("Exported {} transactions", repo.len());
    Ok(Out::new(
        format!(
            "Exported {} to {}",
            plural(repo.len(), "transaction"),
            path.display()
        ),
        path,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{parse_import, ImportMode};

    #[test]
    fn test_export_to_backups() {
        let env = crate::test::TestEnv::new();
        let inserted = env.insert_scenario();
        let out = export(env.config(), ExportArgs::default()).unwrap();
        let path = out.structure().unwrap();

        assert!(path.starts_with(env.config().backups()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("export.") && name.ends_with("-001.json"));

        let raw = std::fs::read_to_string(path).unwrap();
        assert_eq!(parse_import(&raw, ImportMode::Strict).unwrap(), inserted);
    }

    #[test]
    fn test_export_to_path() {
        let env = crate::test::TestEnv::new();
        env.insert_scenario();
        let target = env.scratch().join("mine.json");
        let out = export(env.config(), ExportArgs::new(Some(target.clone()))).unwrap();
        assert_eq!(out.structure(), Some(&target));
        assert!(out.message().starts_with("Exported 3 transactions"));
        assert!(target.is_file());
    }

    #[test]
    fn test_export_empty() {
        let env = crate::test::TestEnv::new();
        let out = export(env.config(), ExportArgs::default()).unwrap();
        let raw = std::fs::read_to_string(out.structure().unwrap()).unwrap();
        assert_eq!(raw.trim(), "[]");
    }
}
