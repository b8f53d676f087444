use std::{
    collections::HashMap,
    env, fs,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use directories::BaseDirs;
use log::warn;

/// Address the dev backend listens on; deployments override `API_ENDPOINT`.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/run";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(default_config_path())
    }

    pub fn load_from(config_path: PathBuf) -> Self {
        let mut map = default_map();

        // Read .jfpadrc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    match line.split_once('=') {
                        Some((k, v)) => {
                            map.insert(k.trim().to_string(), v.trim().to_string());
                        }
                        None => warn!("ignoring malformed config line: {line}"),
                    }
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    /// Endpoint execution requests are POSTed to.
    pub fn endpoint(&self) -> String {
        self.get("API_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Transport timeout in seconds.
    pub fn request_timeout(&self) -> u64 {
        match self.get("REQUEST_TIMEOUT") {
            Some(v) => v.parse::<u64>().unwrap_or_else(|_| {
                warn!("REQUEST_TIMEOUT is not a number: {v}");
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &["API_ENDPOINT", "REQUEST_TIMEOUT"];
    KEYS.contains(&k) || k.starts_with("JFPAD_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("jfpad").join(".jfpadrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("API_ENDPOINT".into(), DEFAULT_ENDPOINT.into());
    m.insert("REQUEST_TIMEOUT".into(), DEFAULT_TIMEOUT_SECS.to_string());
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_rc_file() {
        let cfg = Config::load_from(PathBuf::from("/nonexistent/.jfpadrc"));
        assert_eq!(cfg.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(cfg.request_timeout(), 60);
    }

    #[test]
    fn rc_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".jfpadrc");
        fs::write(
            &path,
            "# playground config\nAPI_ENDPOINT = http://example.test/run\nREQUEST_TIMEOUT=5\n",
        )
        .unwrap();
        let cfg = Config::load_from(path);
        assert_eq!(cfg.endpoint(), "http://example.test/run");
        assert_eq!(cfg.request_timeout(), 5);
    }

    #[test]
    fn malformed_timeout_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".jfpadrc");
        fs::write(&path, "REQUEST_TIMEOUT=soon\n").unwrap();
        let cfg = Config::load_from(path);
        assert_eq!(cfg.request_timeout(), 60);
    }
}
