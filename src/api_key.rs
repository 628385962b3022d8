use std::env;
use std::path::Path;

pub const API_KEY_VAR: &str = "CR_API_KEY";

/// Resolve the API key: process environment first, then the `.env` file.
/// Returns `None` when neither source yields a non-empty value.
pub fn resolve_api_key(env_path: &Path) -> Option<String> {
    if let Ok(val) = env::var(API_KEY_VAR) {
        let trimmed = val.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    key_from_env_file(env_path)
}

/// Scan a dotenv-style file for the API key without touching process env.
pub fn key_from_env_file(path: &Path) -> Option<String> {
    let iter = dotenvy::from_path_iter(path).ok()?;
    for item in iter {
        let Ok((key, value)) = item else {
            continue;
        };
        if key == API_KEY_VAR {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}
