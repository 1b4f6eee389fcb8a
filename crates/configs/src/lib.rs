use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub roster: RosterConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
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
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3000 }

/// How the roster hands out subject and student ids.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicyKind {
    /// `count + 1`; ids can repeat after a delete.
    #[default]
    Sequence,
    /// Monotonic per-collection counter, never reused.
    Counter,
}

impl IdPolicyKind {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sequence" => Ok(IdPolicyKind::Sequence),
            "counter" => Ok(IdPolicyKind::Counter),
            other => Err(anyhow!("roster.id_policy must be `sequence` or `counter`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RosterConfig {
    #[serde(default)]
    pub id_policy: IdPolicyKind,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_toml(&content)
}

pub fn parse_toml(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to environment variables
    /// when the file is missing or unreadable, then normalize.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(_) => Self::from_env()?,
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build a config from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`
    /// and `ROSTER_ID_POLICY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();
        if let Some(host) = lookup("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            cfg.server.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("SERVER_PORT `{port}` is not a valid port: {e}"))?;
        }
        cfg.server.worker_threads = lookup("TOKIO_WORKER_THREADS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .or(cfg.server.worker_threads);
        if let Some(policy) = lookup("ROSTER_ID_POLICY") {
            cfg.roster.id_policy = IdPolicyKind::parse(&policy)?;
        }
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let cfg = parse_toml("").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.roster.id_policy, IdPolicyKind::Sequence);
    }

    #[test]
    fn toml_sections_are_read() {
        let cfg = parse_toml(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8088
            worker_threads = 2

            [roster]
            id_policy = "counter"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8088");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.roster.id_policy, IdPolicyKind::Counter);
    }

    #[test]
    fn unknown_id_policy_is_rejected() {
        assert!(parse_toml("[roster]\nid_policy = \"random\"").is_err());
        assert!(IdPolicyKind::parse("random").is_err());
        assert_eq!(IdPolicyKind::parse(" Counter ").unwrap(), IdPolicyKind::Counter);
    }

    #[test]
    fn env_lookup_overrides_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "9000"),
            ("TOKIO_WORKER_THREADS", "8"),
            ("ROSTER_ID_POLICY", "counter"),
        ]))
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(8));
        assert_eq!(cfg.roster.id_policy, IdPolicyKind::Counter);
    }

    #[test]
    fn env_lookup_rejects_bad_port() {
        assert!(AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "http")])).is_err());
    }

    #[test]
    fn normalize_fills_blank_host_and_zero_threads() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn normalize_rejects_port_zero() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }
}
