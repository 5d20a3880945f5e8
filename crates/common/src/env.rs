use std::path::Path;

pub const DEFAULT_PROFILE: &str = "prod";

pub trait EnvVars {
    fn load() -> Self;
    fn get_env_var(&self, key: &str) -> Option<String>;
}

/// Reads `key` from the process environment, falling back to `default`
/// when it is unset or not valid unicode.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// The active profile, taken from `ENV`.
pub fn profile() -> String {
    env_or("ENV", DEFAULT_PROFILE)
}

/// Loads `<config_dir>/.env` and, for the `local` profile, `<config_dir>/local.env`
/// on top of it. Variables already present in the process environment win.
/// Returns the files that were actually loaded.
pub fn load_profile_env(config_dir: impl AsRef<Path>) -> Vec<String> {
    let config_dir = config_dir.as_ref();
    // dotenv never overrides, so the more specific file goes first
    let mut files = Vec::new();
    if profile() == "local" {
        files.push(config_dir.join("local.env"));
    }
    files.push(config_dir.join(".env"));

    let mut loaded = Vec::new();
    for file in files {
        match dotenv::from_path(&file) {
            Ok(()) => loaded.push(file.display().to_string()),
            Err(e) => tracing::debug!("[load_profile_env] Skipping {}: {}", file.display(), e),
        }
    }
    loaded
}
