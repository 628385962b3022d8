use std::env;
use std::path::PathBuf;

const DEFAULT_CLAN_TAG: &str = "J2RGCRVG";
const DEFAULT_API_BASE: &str = "https://api.clashroyale.com/v1";

/// Runtime settings resolved from the environment, with the site repo's
/// layout as the default.
#[derive(Debug, Clone)]
pub struct Config {
    pub clan_tag: String,
    pub api_base: String,
    pub root: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let clan_tag = opt_env("CR_CLAN_TAG").unwrap_or_else(|| DEFAULT_CLAN_TAG.to_string());
        let api_base = opt_env("CR_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let root = opt_env("SITE_DATA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            clan_tag,
            api_base,
            root,
        }
    }

    pub fn roster_path(&self) -> PathBuf {
        self.root.join("src").join("_data").join("roster.json")
    }

    pub fn site_path(&self) -> PathBuf {
        self.root.join("src").join("_data").join("site.json")
    }

    pub fn extras_path(&self) -> PathBuf {
        self.root.join("roster-extra.json")
    }

    pub fn env_path(&self) -> PathBuf {
        self.root.join(".env")
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| {
        let trimmed = val.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
