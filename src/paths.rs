//! Local path helpers

use std::path::{Path, PathBuf};

/// Expand a leading `~` to the current user's home directory.
///
/// Only `~` on its own and `~/...` are expanded; `~user` forms and paths
/// without a leading tilde are returned unchanged. If the home directory
/// cannot be determined the path is returned as given.
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, dirs::home_dir().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        return home.to_path_buf();
    }

    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expands_home_prefix() {
        let home = Path::new("/home/alice");
        assert_eq!(
            expand_tilde_with("~/.ssh/id_ed25519", Some(home)),
            PathBuf::from("/home/alice/.ssh/id_ed25519")
        );
        assert_eq!(expand_tilde_with("~", Some(home)), home.to_path_buf());
    }

    #[test]
    fn test_leaves_other_paths_alone() {
        let home = Path::new("/home/alice");
        assert_eq!(
            expand_tilde_with("/etc/hosts", Some(home)),
            PathBuf::from("/etc/hosts")
        );
        assert_eq!(
            expand_tilde_with("~bob/file", Some(home)),
            PathBuf::from("~bob/file")
        );
        assert_eq!(
            expand_tilde_with("data/~/x", Some(home)),
            PathBuf::from("data/~/x")
        );
    }

    #[test]
    fn test_no_home_directory() {
        assert_eq!(expand_tilde_with("~/x", None), PathBuf::from("~/x"));
    }

    #[test]
    fn test_uses_real_home_directory() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/key"), home.join("key"));
        }
    }
}
