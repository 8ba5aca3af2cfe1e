use anyhow::Result;
use std::path::{Path, PathBuf};

/// Folder containing the running binary (falls back to the working directory).
pub fn resolve_deployment_folder() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(dir) = exe_path.parent() {
            return dir.to_path_buf();
        }
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolve (and create) the log folder.
///
/// Order: explicit `log_dir` setting, the per-user data directory, then `logs/` next to the
/// binary.
pub fn resolve_log_folder(configured: Option<&Path>) -> Result<PathBuf> {
    let log_dir = match configured {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_local_dir()
            .map(|d| d.join("careerflow").join("logs"))
            .unwrap_or_else(|| resolve_deployment_folder().join("logs")),
    };

    std::fs::create_dir_all(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log folder {:?}: {}", log_dir, e))?;
    Ok(log_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_log_folder_is_created() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("nested").join("logs");
        let resolved = resolve_log_folder(Some(&target)).expect("resolve");
        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }
}
