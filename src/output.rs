//! Backup and write of the regenerated README.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Sibling backup path: `README.md` → `README.bak.md`, `NOTES` → `NOTES.bak`.
pub fn default_backup_path(readme: &Path) -> PathBuf {
    let stem = readme
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match readme.extension() {
        Some(ext) => format!("{}.bak.{}", stem, ext.to_string_lossy()),
        None => format!("{}.bak", stem),
    };
    readme.with_file_name(name)
}

/// Copy the current README to `backup`, overwriting any previous backup.
pub fn backup(readme: &Path, backup: &Path) -> Result<()> {
    fs::copy(readme, backup).with_context(|| {
        format!(
            "failed to back up {} to {}",
            readme.display(),
            backup.display()
        )
    })?;
    info!(path = %backup.display(), "wrote backup");
    Ok(())
}

/// Write the fully rendered contents in one call.
pub fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote README");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_keeps_extension() {
        assert_eq!(
            default_backup_path(Path::new("README.md")),
            PathBuf::from("README.bak.md")
        );
        assert_eq!(
            default_backup_path(Path::new("docs/lalib/README.md")),
            PathBuf::from("docs/lalib/README.bak.md")
        );
    }

    #[test]
    fn backup_path_without_extension() {
        assert_eq!(
            default_backup_path(Path::new("docs/NOTES")),
            PathBuf::from("docs/NOTES.bak")
        );
    }

    #[test]
    fn backup_copies_previous_contents() {
        let dir = tempfile::TempDir::new().unwrap();
        let readme = dir.path().join("README.md");
        let bak = dir.path().join("README.bak.md");
        fs::write(&readme, "old\n").unwrap();

        backup(&readme, &bak).unwrap();
        write(&readme, "new\n").unwrap();

        assert_eq!(fs::read_to_string(&bak).unwrap(), "old\n");
        assert_eq!(fs::read_to_string(&readme).unwrap(), "new\n");
    }

    #[test]
    fn backup_of_missing_readme_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = backup(&dir.path().join("README.md"), &dir.path().join("README.bak.md"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to back up"));
    }
}
