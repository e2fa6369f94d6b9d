//! Configuration module for rcctl-service
//!
//! This module handles loading and parsing of configuration files,
//! including environment variable expansion of the rcctl path.

mod file;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::service::rcctl::DEFAULT_RCCTL;
use crate::service::{DesiredState, Ensure, ServiceDescriptor};

pub use file::{
    ConfigFile, ConfigPath, config_search_paths, find_config_file, load_config,
    load_config_from_path_or_default,
};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the rcctl utility
    /// Supports environment variable and tilde expansion
    #[serde(default = "default_rcctl")]
    pub rcctl: String,

    /// Service provider name; the platform default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Managed services keyed by name, in declaration order
    #[serde(default)]
    pub services: IndexMap<String, ServiceConfig>,
}

/// Desired state of a single service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Whether the service should be running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensure: Option<Ensure>,

    /// Whether the service should start at boot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,

    /// Daemon flags, compared verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,

    /// Use the provider's native restart
    #[serde(default, rename = "hasrestart")]
    pub has_restart: bool,

    /// Trust the exit status of the status command
    #[serde(default = "default_true", rename = "hasstatus")]
    pub has_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rcctl: default_rcctl(),
            provider: None,
            services: IndexMap::new(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            ensure: None,
            enable: None,
            flags: None,
            has_restart: false,
            has_status: true,
        }
    }
}

fn default_rcctl() -> String {
    DEFAULT_RCCTL.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Resolved path of the rcctl utility
    pub fn rcctl_path(&self) -> crate::Result<PathBuf> {
        expand_path(&self.rcctl).map(PathBuf::from)
    }

    /// Descriptor for `name`, taken from the service table when declared
    pub fn descriptor(&self, name: &str) -> ServiceDescriptor {
        match self.services.get(name) {
            Some(service) => service.descriptor(name),
            None => ServiceDescriptor::new(name),
        }
    }
}

impl ServiceConfig {
    /// Build the provider-facing descriptor
    pub fn descriptor(&self, name: &str) -> ServiceDescriptor {
        ServiceDescriptor {
            name: name.to_string(),
            flags: self.flags.clone(),
            has_status: self.has_status,
            has_restart: self.has_restart,
        }
    }

    /// Running and enablement targets
    pub fn desired_state(&self) -> DesiredState {
        DesiredState {
            ensure: self.ensure,
            enable: self.enable,
        }
    }
}

/// Expand environment variables and tilde in a path string
pub fn expand_path(path: &str) -> crate::Result<String> {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .map_err(|e| crate::Error::Config(format!("Failed to expand path '{}': {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.rcctl, "/usr/sbin/rcctl");
        assert!(config.provider.is_none());
        assert!(config.services.is_empty());
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
rcctl = "/usr/sbin/rcctl"
provider = "openbsd"

[services.httpd]
ensure = "running"
enable = true
flags = "-DSSL "
hasrestart = true

[services.sndiod]
ensure = "stopped"
enable = false
hasstatus = false
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.as_deref(), Some("openbsd"));
        assert_eq!(config.services.len(), 2);

        let httpd = config.services.get("httpd").unwrap();
        assert_eq!(httpd.ensure, Some(Ensure::Running));
        assert_eq!(httpd.enable, Some(true));
        assert_eq!(httpd.flags.as_deref(), Some("-DSSL "));
        assert!(httpd.has_restart);
        assert!(httpd.has_status);

        let sndiod = config.services.get("sndiod").unwrap();
        assert_eq!(sndiod.ensure, Some(Ensure::Stopped));
        assert_eq!(sndiod.enable, Some(false));
        assert!(sndiod.flags.is_none());
        assert!(!sndiod.has_restart);
        assert!(!sndiod.has_status);
    }

    #[test]
    fn test_services_keep_declaration_order() {
        let toml_str = r#"
[services.sndiod]
[services.httpd]
[services.ntpd]
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        let names: Vec<&str> = config.services.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["sndiod", "httpd", "ntpd"]);
    }

    #[test]
    fn test_parse_config_rejects_bad_ensure() {
        let toml_str = r#"
[services.httpd]
ensure = "paused"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_descriptor_from_service_table() {
        let mut config = Config::default();
        config.services.insert(
            "httpd".to_string(),
            ServiceConfig {
                flags: Some("-v".to_string()),
                has_restart: true,
                ..ServiceConfig::default()
            },
        );

        let httpd = config.descriptor("httpd");
        assert_eq!(httpd.flags.as_deref(), Some("-v"));
        assert!(httpd.has_restart);
        assert!(httpd.has_status);

        assert_eq!(config.descriptor("sshd"), ServiceDescriptor::new("sshd"));
    }

    #[test]
    fn test_desired_state() {
        let service = ServiceConfig {
            ensure: Some(Ensure::Running),
            enable: Some(true),
            ..ServiceConfig::default()
        };
        let desired = service.desired_state();
        assert_eq!(desired.ensure, Some(Ensure::Running));
        assert_eq!(desired.enable, Some(true));
    }

    #[test]
    fn test_rcctl_path_expands_env_var() {
        // SAFETY: This test runs in isolation and RCCTL_TEST_DIR is not used elsewhere
        unsafe { std::env::set_var("RCCTL_TEST_DIR", "/opt/sbin") };
        let config = Config {
            rcctl: "$RCCTL_TEST_DIR/rcctl".to_string(),
            ..Config::default()
        };
        assert_eq!(config.rcctl_path().unwrap(), PathBuf::from("/opt/sbin/rcctl"));
        unsafe { std::env::remove_var("RCCTL_TEST_DIR") };
    }

    #[test]
    fn test_rcctl_path_unknown_env_var() {
        let config = Config {
            rcctl: "$RCCTL_SERVICE_SURELY_UNSET/rcctl".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.rcctl_path(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_serialize_round_trip_skips_unset() {
        let mut config = Config::default();
        config
            .services
            .insert("sshd".to_string(), ServiceConfig::default());

        let text = toml::to_string(&config).unwrap();
        assert!(!text.contains("provider"));
        assert!(!text.contains("ensure"));
        assert!(text.contains("[services.sshd]"));
    }
}
