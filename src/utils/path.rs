use std::path::PathBuf;

/// Expands a leading `~/` using the platform home directory, so the
/// config file can carry portable paths.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}
