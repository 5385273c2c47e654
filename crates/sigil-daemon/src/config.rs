// crates/sigil-daemon/src/config.rs
//
// Runtime configuration for the Sigil daemon.
// Loaded from a TOML file or populated with defaults, then overridden by
// `SIGIL_*` environment variables.

use std::collections::HashMap;
use std::fs;

use serde::Deserialize;
use thiserror::Error;

use sigil_rpc::RpcConfig;
use sigil_store::StoreDescriptor;

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: String, value: String },
}

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DaemonConfig {
    /// Host address for the RPC server.
    #[serde(default = "default_rpc_host")]
    pub rpc_host: String,

    /// Port for the RPC server.
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Base directory of the record store.
    #[serde(default = "default_store_uri")]
    pub store_uri: String,

    /// Database name beneath `store_uri`.
    #[serde(default = "default_store_database")]
    pub store_database: String,

    /// Collection the signed events are kept in.
    #[serde(default = "default_store_collection")]
    pub store_collection: String,

    /// Endpoint of the upstream signing service.
    #[serde(default = "default_signer_uri")]
    pub signer_uri: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_rpc_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_port() -> u16 {
    3030
}

fn default_store_uri() -> String {
    "~/.sigil/data".to_string()
}

fn default_store_database() -> String {
    "sigil".to_string()
}

fn default_store_collection() -> String {
    "signed_events".to_string()
}

fn default_signer_uri() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            rpc_host: default_rpc_host(),
            rpc_port: default_rpc_port(),
            store_uri: default_store_uri(),
            store_database: default_store_database(),
            store_collection: default_store_collection(),
            signer_uri: default_signer_uri(),
            log_level: default_log_level(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(path, &contents)
    }

    /// Load configuration from `path`, falling back to defaults only when the
    /// file does not exist. Any other read or parse failure is returned.
    ///
    /// The second value is true when the file was found and used.
    pub fn resolve(path: &str) -> Result<(Self, bool), ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok((config, true)),
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok((Self::default(), false))
            }
            Err(e) => Err(e),
        }
    }

    fn from_toml(path: &str, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Apply `SIGIL_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        let vars: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with("SIGIL_"))
            .collect();
        self.apply_overrides(&vars)
    }

    /// Apply overrides from an explicit variable map.
    pub fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> Result<(), ConfigError> {
        let string_fields: [(&str, &mut String); 6] = [
            ("SIGIL_RPC_HOST", &mut self.rpc_host),
            ("SIGIL_STORE_URI", &mut self.store_uri),
            ("SIGIL_STORE_DATABASE", &mut self.store_database),
            ("SIGIL_STORE_COLLECTION", &mut self.store_collection),
            ("SIGIL_SIGNER_URI", &mut self.signer_uri),
            ("SIGIL_LOG_LEVEL", &mut self.log_level),
        ];
        for (var, field) in string_fields {
            if let Some(value) = vars.get(var) {
                *field = value.clone();
            }
        }

        if let Some(value) = vars.get("SIGIL_RPC_PORT") {
            self.rpc_port = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "SIGIL_RPC_PORT".to_string(),
                value: value.clone(),
            })?;
        }

        Ok(())
    }

    /// RPC server settings.
    pub fn rpc_config(&self) -> RpcConfig {
        RpcConfig {
            host: self.rpc_host.clone(),
            port: self.rpc_port,
        }
    }

    /// Record store descriptor, with `~` expanded in the base URI.
    pub fn store_descriptor(&self) -> StoreDescriptor {
        StoreDescriptor::new(
            expand_tilde(&self.store_uri),
            self.store_database.clone(),
            self.store_collection.clone(),
        )
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = DaemonConfig::from_toml(
            "test.toml",
            r#"
                rpc_port = 9000
                signer_uri = "http://signer.internal:3000"
            "#,
        )
        .unwrap();
        assert_eq!(config.rpc_port, 9000);
        assert_eq!(config.signer_uri, "http://signer.internal:3000");
        assert_eq!(config.rpc_host, "127.0.0.1");
        assert_eq!(config.store_collection, "signed_events");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = DaemonConfig::from_toml("bad.toml", "rpc_port = \"not a port\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = DaemonConfig::load("/nonexistent/sigil/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_resolve_missing_file_uses_defaults() {
        let (config, found) = DaemonConfig::resolve("/nonexistent/sigil/config.toml").unwrap();
        assert!(!found);
        assert_eq!(config, DaemonConfig::default());
    }

    #[test]
    fn test_resolve_malformed_file_is_error() {
        let path = std::env::temp_dir().join(format!("sigil_config_{}.toml", std::process::id()));
        fs::write(&path, "rpc_port = \"not a port\"\n").unwrap();

        let result = DaemonConfig::resolve(&path.to_string_lossy());
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_resolve_reads_existing_file() {
        let path = std::env::temp_dir().join(format!("sigil_config_ok_{}.toml", std::process::id()));
        fs::write(&path, "rpc_port = 9100\n").unwrap();

        let result = DaemonConfig::resolve(&path.to_string_lossy());
        let _ = fs::remove_file(&path);
        let (config, found) = result.unwrap();
        assert!(found);
        assert_eq!(config.rpc_port, 9100);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = DaemonConfig::default();
        let vars = HashMap::from([
            ("SIGIL_RPC_PORT".to_string(), "4040".to_string()),
            ("SIGIL_STORE_DATABASE".to_string(), "prod".to_string()),
            ("SIGIL_SIGNER_URI".to_string(), "http://10.0.0.5:8545".to_string()),
        ]);
        config.apply_overrides(&vars).unwrap();

        assert_eq!(config.rpc_port, 4040);
        assert_eq!(config.store_database, "prod");
        assert_eq!(config.signer_uri, "http://10.0.0.5:8545");
        assert_eq!(config.rpc_host, default_rpc_host());
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = DaemonConfig::default();
        let vars = HashMap::from([("SIGIL_RPC_PORT".to_string(), "http".to_string())]);
        let err = config.apply_overrides(&vars).unwrap_err();
        assert_eq!(err.to_string(), "invalid value \"http\" for SIGIL_RPC_PORT");
        assert_eq!(config.rpc_port, 3030);
    }

    #[test]
    fn test_store_descriptor() {
        let config = DaemonConfig {
            store_uri: "/srv/sigil".to_string(),
            ..DaemonConfig::default()
        };
        let descriptor = config.store_descriptor();
        assert_eq!(descriptor.uri, "/srv/sigil");
        assert_eq!(descriptor.database, "sigil");
        assert_eq!(descriptor.collection, "signed_events");
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/lib/sigil"), "/var/lib/sigil");
    }
}
