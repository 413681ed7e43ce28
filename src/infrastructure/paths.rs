//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Mount point of the host's home directory inside the sandbox.
const HOST_HOME: &str = "/host";

/// Directory for the plugin's trace output.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_HOME)
        .join(".local")
        .join("share")
        .join("zellij")
        .join("cinefind")
}

/// Maps a leading `~` to the sandbox's host mount.
///
/// ```rust
/// use cinefind::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dune.toml"), "/host/themes/dune.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_HOME.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_HOME}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_maps_to_host_mount() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("~/a/b.toml"), "/host/a/b.toml");
    }

    #[test]
    fn other_paths_are_unchanged() {
        assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
        assert_eq!(expand_tilde("~alice/theme.toml"), "~alice/theme.toml");
        assert_eq!(expand_tilde("themes/~/x"), "themes/~/x");
    }

    #[test]
    fn data_dir_is_under_zellij_share() {
        assert_eq!(get_data_dir(), PathBuf::from("/host/.local/share/zellij/cinefind"));
    }
}
