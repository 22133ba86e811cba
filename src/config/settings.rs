//! Application settings configuration
//!
//! Defines per-probe timeouts, the HTTP identity, and ping defaults.

use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Largest accepted timeout or grace period, in seconds
pub const MAX_TIMEOUT_SECS: f64 = 3600.0;

/// Seconds to `Duration`; out-of-range values saturate instead of panicking
fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.min(MAX_TIMEOUT_SECS)).unwrap_or(Duration::ZERO)
}

/// DNS probe settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DnsSettings {
    pub timeout_secs: f64,
}

impl Default for DnsSettings {
    fn default() -> Self {
        Self { timeout_secs: 2.5 }
    }
}

impl DnsSettings {
    pub fn timeout(&self) -> Duration {
        secs(self.timeout_secs)
    }
}

/// TCP probe settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TcpSettings {
    pub timeout_secs: f64,
}

impl Default for TcpSettings {
    fn default() -> Self {
        Self { timeout_secs: 2.5 }
    }
}

impl TcpSettings {
    pub fn timeout(&self) -> Duration {
        secs(self.timeout_secs)
    }
}

/// HTTP probe settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: f64,
    /// Extra time allowed on top of the client timeout before the probe gives up
    pub grace_secs: f64,
    pub user_agent: String,
    pub method: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 4.0,
            grace_secs: 0.5,
            user_agent: "netcheck/1.0".to_string(),
            method: "GET".to_string(),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        secs(self.timeout_secs)
    }

    pub fn deadline(&self) -> Duration {
        secs(self.timeout_secs + self.grace_secs)
    }
}

/// TLS probe settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TlsSettings {
    pub timeout_secs: f64,
    pub grace_secs: f64,
}

impl Default for TlsSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 3.5,
            grace_secs: 0.5,
        }
    }
}

impl TlsSettings {
    pub fn connect_timeout(&self) -> Duration {
        secs(self.timeout_secs)
    }

    pub fn deadline(&self) -> Duration {
        secs(self.timeout_secs + self.grace_secs)
    }
}

/// Ping probe settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PingSettings {
    pub count: u32,
    pub reply_timeout_secs: u64,
}

impl Default for PingSettings {
    fn default() -> Self {
        Self {
            count: 3,
            reply_timeout_secs: 2,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dns: DnsSettings,
    pub tcp: TcpSettings,
    pub http: HttpSettings,
    pub tls: TlsSettings,
    pub ping: PingSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply a single timeout to every probe
    pub fn with_timeout(mut self, timeout_secs: f64) -> Result<Self, ConfigError> {
        self.dns.timeout_secs = timeout_secs;
        self.tcp.timeout_secs = timeout_secs;
        self.http.timeout_secs = timeout_secs;
        self.tls.timeout_secs = timeout_secs;
        self.ping.reply_timeout_secs = timeout_secs.ceil().max(1.0) as u64;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let timeouts = [
            ("dns.timeout_secs", self.dns.timeout_secs),
            ("tcp.timeout_secs", self.tcp.timeout_secs),
            ("http.timeout_secs", self.http.timeout_secs),
            ("tls.timeout_secs", self.tls.timeout_secs),
        ];
        for (key, value) in timeouts {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("timeout must be positive, got {}", value),
                });
            }
            if value > MAX_TIMEOUT_SECS {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!(
                        "timeout must be at most {} seconds, got {}",
                        MAX_TIMEOUT_SECS, value
                    ),
                });
            }
        }

        let graces = [
            ("http.grace_secs", self.http.grace_secs),
            ("tls.grace_secs", self.tls.grace_secs),
        ];
        for (key, value) in graces {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("grace must not be negative, got {}", value),
                });
            }
            if value > MAX_TIMEOUT_SECS {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!(
                        "grace must be at most {} seconds, got {}",
                        MAX_TIMEOUT_SECS, value
                    ),
                });
            }
        }

        if self.ping.reply_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ping.reply_timeout_secs".to_string(),
                message: "timeout must be positive".to_string(),
            });
        }
        if self.ping.reply_timeout_secs as f64 > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidValue {
                key: "ping.reply_timeout_secs".to_string(),
                message: format!(
                    "timeout must be at most {} seconds, got {}",
                    MAX_TIMEOUT_SECS, self.ping.reply_timeout_secs
                ),
            });
        }

        if self.http.method.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "http.method".to_string(),
                message: "method must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
