use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of lore's machine-readable index of archived lists
    pub lists_url: String,
    /// Where the fetched list table is cached (tilde-expanded)
    pub cache_file: String,
    /// Maximum cache age in seconds before a refresh is attempted
    pub cache_ttl_secs: u64,
    /// Skip the network entirely and use the compiled-in list table
    pub use_builtin_table: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lists_url: "https://lore.kernel.org/lists.txt".to_string(),
            cache_file: default_cache_file(),
            cache_ttl_secs: 86400,
            use_builtin_table: false,
        }
    }
}

fn default_cache_file() -> String {
    dirs::cache_dir()
        .map(|p| p.join("lorifier.list").to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/.cache/lorifier.list".to_string())
}

impl Config {
    pub fn load() -> Self {
        let config_path = dirs::config_dir()
            .map(|p| p.join("lorifier/config.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/lorifier/config.toml"));

        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("config parse error: {e}"),
                },
                Err(e) => log::warn!("config read error: {e}"),
            }
        }

        Self::default()
    }

    pub fn cache_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.cache_file).into_owned())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
