//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Absolute paths are returned as-is when they exist. Relative names are
/// tried in cwd and then in each parent directory.
///
/// # Example
/// ```text
/// /home/user/site/public/posts/     ← cwd
/// /home/user/site/gaussholder.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    find_upward(&cwd, config_name)
}

/// Walk up from `start` looking for `name`.
fn find_upward(start: &Path, name: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_upward() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("gaussholder.toml"), "").unwrap();

        assert_eq!(
            find_upward(&nested, Path::new("gaussholder.toml")),
            Some(dir.path().join("gaussholder.toml"))
        );
    }

    #[test]
    fn test_find_upward_missing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            find_upward(dir.path(), Path::new("no-such-config-file.toml")),
            None
        );
    }

    #[test]
    fn test_find_absolute() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(find_config_file(&path), None);

        std::fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(&path), Some(path));
    }
}
