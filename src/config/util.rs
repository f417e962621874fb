//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`.
///
/// An absolute `config_name` that exists is returned as-is.
///
/// ```text
/// /home/user/site/src/pages/   ← start
/// /home/user/site/vitrine.toml ← found
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src/pages");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("vitrine.toml"), "").unwrap();

        let found = find_config_file(Path::new("vitrine.toml"), &nested).unwrap();
        assert_eq!(found, dir.path().join("vitrine.toml"));
    }

    #[test]
    fn test_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(find_config_file(Path::new("no-such-config-8f1c.toml"), dir.path()).is_none());
    }

    #[test]
    fn test_absolute() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        assert!(find_config_file(&path, dir.path()).is_none());
        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(&path, Path::new("/")), Some(path));
    }
}
