// datacheck-core/src/infrastructure/fs.rs

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::infrastructure::error::InfrastructureError;

/// Writes `content` to `path` through a temporary sibling file that is then
/// renamed over the target, so readers never observe a half-written file.
/// Missing parent directories are created.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Joins `relative` onto `root`, refusing anything that could step outside
/// it (absolute paths, `..`, drive prefixes).
pub fn resolve_inside(root: &Path, relative: &str) -> Option<PathBuf> {
    let rel = Path::new(relative);
    if relative.is_empty() {
        return None;
    }
    let safe = rel
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    safe.then(|| root.join(rel))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_parents() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("nested/reports/out.html");

        atomic_write(&file_path, "<html></html>")?;

        assert_eq!(fs::read_to_string(file_path)?, "<html></html>");
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("report.html");

        atomic_write(&file_path, "first")?;
        atomic_write(&file_path, "second")?;

        assert_eq!(fs::read_to_string(&file_path)?, "second");
        // No temporary files left behind.
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_resolve_inside() {
        let root = Path::new("/srv/uploads");
        assert_eq!(
            resolve_inside(root, "data.csv"),
            Some(PathBuf::from("/srv/uploads/data.csv"))
        );
        assert_eq!(
            resolve_inside(root, "upload-ab12/data.csv"),
            Some(PathBuf::from("/srv/uploads/upload-ab12/data.csv"))
        );
        assert_eq!(resolve_inside(root, "../secret.csv"), None);
        assert_eq!(resolve_inside(root, "/etc/passwd"), None);
        assert_eq!(resolve_inside(root, ""), None);
    }
}
