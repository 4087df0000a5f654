use std::io;

use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(DEFAULT_WORKER_THREADS) }
    }
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file at `CONFIG_PATH` if it exists, otherwise `SERVER_HOST` / `SERVER_PORT`, then defaults.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_else(&config_path(), |key| std::env::var(key).ok())
    }

    /// Only a missing file falls back to `lookup`; unreadable, malformed or invalid files are errors.
    pub fn load_or_else<F>(path: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => parse(&content).map_err(|e| anyhow!("{path}: {e}"))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self { server: ServerConfig::from_lookup(lookup) },
            Err(e) => return Err(anyhow!("cannot read {path}: {e}")),
        };
        cfg.normalize_and_validate().map_err(|e| anyhow!("{path}: {e}"))?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()
    }
}

impl ServerConfig {
    /// Build from `SERVER_HOST`, `SERVER_PORT` and `TOKIO_WORKER_THREADS`; unparsable values use defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST").unwrap_or_else(default_host);
        let port = lookup("SERVER_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let worker_threads = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok());
        Self { host, port, worker_threads }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
            Some(_) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn server_section_overrides() {
        let mut cfg = parse("[server]\nhost = \"0.0.0.0\"\nport = 8088\nworker_threads = 2\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8088");
        assert_eq!(cfg.server.worker_threads, Some(2));
    }

    #[test]
    fn blank_host_and_zero_threads_are_normalized() {
        let mut cfg = parse("[server]\nhost = \"  \"\nworker_threads = 0\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    fn temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("icecream_{}_{}.toml", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let cfg = AppConfig::load_or_else(
            "/nonexistent/icecream-config.toml",
            env_of(&[("SERVER_HOST", "0.0.0.0"), ("SERVER_PORT", "8088")]),
        )
        .unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8088");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn missing_file_and_empty_env_uses_defaults() {
        let cfg = AppConfig::load_or_else("/nonexistent/icecream-config.toml", env_of(&[])).unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn unparsable_env_port_uses_default() {
        let server = ServerConfig::from_lookup(env_of(&[("SERVER_PORT", "abc"), ("TOKIO_WORKER_THREADS", "8")]));
        assert_eq!(server.port, 3000);
        assert_eq!(server.worker_threads, Some(8));
    }

    #[test]
    fn present_file_wins_over_env() {
        let path = temp_config("wins", "[server]\nport = 9000\n");
        let cfg = AppConfig::load_or_else(path.to_str().unwrap(), env_of(&[("SERVER_PORT", "8088")])).unwrap();
        assert_eq!(cfg.server.port, 9000);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn present_file_with_zero_port_is_an_error() {
        let path = temp_config("port0", "[server]\nport = 0\n");
        let res = AppConfig::load_or_else(path.to_str().unwrap(), env_of(&[("SERVER_PORT", "8088")]));
        assert!(res.is_err());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn present_malformed_file_is_an_error() {
        let path = temp_config("malformed", "[server\nport = 8088");
        let res = AppConfig::load_or_else(path.to_str().unwrap(), env_of(&[]));
        assert!(res.is_err());
        let _ = std::fs::remove_file(path);
    }
}
