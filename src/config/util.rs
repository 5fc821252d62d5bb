//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find a config file by walking upward from `start`.
///
/// Absolute names are returned as-is if they exist.
///
/// ```text
/// /home/user/talk/decks/   ← start
/// /home/user/talk/slidewatch.toml   ← found
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_walks_upward() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("a/slidewatch.toml"), "").unwrap();

        let found = find_config_file(&nested, Path::new("slidewatch.toml")).unwrap();
        assert_eq!(found, temp.path().join("a/slidewatch.toml"));
    }

    #[test]
    fn test_find_config_ignores_directories() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("x/slidewatch.toml")).unwrap();
        std::fs::write(temp.path().join("slidewatch.toml"), "").unwrap();

        let found = find_config_file(&temp.path().join("x"), Path::new("slidewatch.toml"));
        assert_eq!(found, Some(temp.path().join("slidewatch.toml")));
    }

    #[test]
    fn test_find_config_absolute() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        assert_eq!(find_config_file(temp.path(), &path), None);

        std::fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(Path::new("/"), &path), Some(path));
    }
}
