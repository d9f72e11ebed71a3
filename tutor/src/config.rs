use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "phi3";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:3001/api/ask";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Where and how to reach the inference server.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl BackendConfig {
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

/// Startup configuration for the answer service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub backend: BackendConfig,
    pub max_upload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            backend: BackendConfig::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("TUTOR_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "TUTOR_BIND_ADDR",
                value: bind_addr.clone(),
                reason: e.to_string(),
            })?;

        let base_url = non_empty(lookup("OLLAMA_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "OLLAMA_BASE_URL",
                value: base_url,
                reason: "expected an http:// or https:// URL".to_string(),
            });
        }

        let model = non_empty(lookup("OLLAMA_MODEL")).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout = match non_empty(lookup("OLLAMA_TIMEOUT_SECS")) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                    key: "OLLAMA_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let max_upload_bytes = match non_empty(lookup("TUTOR_MAX_UPLOAD_BYTES")) {
            Some(raw) => raw.parse::<usize>().map_err(|e| ConfigError::Invalid {
                key: "TUTOR_MAX_UPLOAD_BYTES",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            bind_addr,
            backend: BackendConfig {
                base_url,
                model,
                timeout,
            },
            max_upload_bytes,
        })
    }
}

/// Settings for the terminal client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub service_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            service_url: non_empty(lookup("TUTOR_SERVICE_URL"))
                .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServiceConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.backend.model, "phi3");
        assert_eq!(
            config.backend.generate_url(),
            "http://localhost:11434/api/generate"
        );
        assert!(config.backend.timeout.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("TUTOR_BIND_ADDR", "127.0.0.1:8080"),
            ("OLLAMA_BASE_URL", "http://10.0.0.5:11434/"),
            ("OLLAMA_MODEL", "llama3"),
            ("OLLAMA_TIMEOUT_SECS", "90"),
            ("TUTOR_MAX_UPLOAD_BYTES", "1024"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.backend.model, "llama3");
        assert_eq!(config.backend.generate_url(), "http://10.0.0.5:11434/api/generate");
        assert_eq!(config.backend.timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("OLLAMA_MODEL", "   "),
            ("OLLAMA_TIMEOUT_SECS", ""),
        ]))
        .unwrap();
        assert_eq!(config.backend.model, DEFAULT_MODEL);
        assert!(config.backend.timeout.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        let err = ServiceConfig::from_lookup(lookup_from(&[("TUTOR_BIND_ADDR", "nowhere")]))
            .unwrap_err();
        assert!(err.to_string().contains("TUTOR_BIND_ADDR"));

        let err = ServiceConfig::from_lookup(lookup_from(&[("OLLAMA_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("OLLAMA_TIMEOUT_SECS"));

        let err = ServiceConfig::from_lookup(lookup_from(&[("OLLAMA_BASE_URL", "localhost:11434")]))
            .unwrap_err();
        assert!(err.to_string().contains("OLLAMA_BASE_URL"));
    }

    #[test]
    fn client_service_url() {
        assert_eq!(
            ClientConfig::from_lookup(lookup_from(&[])).service_url,
            DEFAULT_SERVICE_URL
        );
        assert_eq!(
            ClientConfig::from_lookup(lookup_from(&[("TUTOR_SERVICE_URL", "http://tutor:9000/api/ask")]))
                .service_url,
            "http://tutor:9000/api/ask"
        );
    }
}
