//! Command implementations for rcctl-service CLI

pub mod apply;
pub mod completion;
pub mod config;
pub mod control;
pub mod flags;
pub mod list;
pub mod status;
pub mod version;

use anyhow::{Context, Result};
use std::path::Path;
use std::rc::Rc;

use crate::config::{Config, load_config_from_path_or_default};
use crate::exec::{CommandRunner, SystemRunner};
use crate::service::registry::{self, ProviderContext, ProviderEntry};
use crate::service::{ServiceControl, ServiceDescriptor};

/// Configuration, provider and runner shared by the service commands
pub struct Session {
    pub config: Config,
    pub provider: &'static ProviderEntry,
    pub context: ProviderContext,
}

impl Session {
    /// Load configuration and select the provider for this platform
    pub fn load(config_path: Option<&Path>, provider: Option<&str>) -> Result<Self> {
        let config = load_config_from_path_or_default(config_path)
            .context("Failed to load configuration")?
            .config;
        Self::with_runner(config, provider, std::env::consts::OS, Rc::new(SystemRunner))
    }

    /// Build a session from an already loaded configuration
    ///
    /// A provider named on the command line wins over the configured one.
    pub fn with_runner(
        config: Config,
        provider: Option<&str>,
        os: &str,
        runner: Rc<dyn CommandRunner>,
    ) -> Result<Self> {
        let name = provider.or(config.provider.as_deref());
        let provider = registry::select(name, os)?;
        let context = ProviderContext::new(runner).with_command_path(config.rcctl_path()?);

        Ok(Self {
            config,
            provider,
            context,
        })
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.context.runner.as_ref()
    }

    /// Provider for a service declared in the configuration, or a bare one
    pub fn service(&self, name: &str) -> Result<Box<dyn ServiceControl>> {
        self.service_with(self.config.descriptor(name))
    }

    pub fn service_with(&self, descriptor: ServiceDescriptor) -> Result<Box<dyn ServiceControl>> {
        Ok(self.provider.new_provider(descriptor, &self.context)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::exec::fake::ScriptedRunner;

    pub(crate) fn session(config: Config, runner: &Rc<ScriptedRunner>) -> Session {
        Session::with_runner(config, None, "openbsd", runner.clone()).unwrap()
    }

    #[test]
    fn test_session_defaults_to_platform_provider() {
        let runner = Rc::new(ScriptedRunner::new());
        let session = session(Config::default(), &runner);
        assert_eq!(session.provider.name, "openbsd");
    }

    #[test]
    fn test_session_rejects_unsuitable_platform() {
        let runner = Rc::new(ScriptedRunner::new());
        let result = Session::with_runner(Config::default(), None, "linux", runner);
        assert!(result.is_err());
    }

    #[test]
    fn test_session_uses_configured_rcctl_and_descriptor() {
        let runner = Rc::new(ScriptedRunner::new());
        let mut config = Config {
            rcctl: "/usr/local/sbin/rcctl".to_string(),
            ..Config::default()
        };
        config.services.insert(
            "httpd".to_string(),
            ServiceConfig {
                has_restart: true,
                ..ServiceConfig::default()
            },
        );

        let session = session(config, &runner);
        let httpd = session.service("httpd").unwrap();

        assert_eq!(
            httpd.restart_command().unwrap().to_string(),
            "/usr/local/sbin/rcctl -f restart httpd"
        );
    }
}
