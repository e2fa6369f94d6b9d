//! Static provider registry
//!
//! Providers are registered in [`PROVIDERS`] together with the platforms
//! they are confined to and the platforms they are the default for.
//! Platform identifiers use the values of `std::env::consts::OS`.

use std::path::PathBuf;
use std::rc::Rc;

use super::rcctl::{self, Rcctl};
use super::{Feature, ServiceControl, ServiceDescriptor};
use crate::error::{Error, Result};
use crate::exec::CommandRunner;

/// Everything a provider needs besides the service descriptor
#[derive(Clone)]
pub struct ProviderContext {
    /// Runner used for every external command
    pub runner: Rc<dyn CommandRunner>,
    /// Override for the provider's control utility
    pub command_path: Option<PathBuf>,
}

impl ProviderContext {
    pub fn new(runner: Rc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            command_path: None,
        }
    }

    pub fn with_command_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.command_path = Some(path.into());
        self
    }
}

/// Builds a provider instance for one service
pub type Constructor = fn(ServiceDescriptor, &ProviderContext) -> Box<dyn ServiceControl>;

/// Enumerates the services a provider can see
pub type Enumerator = fn(&ProviderContext) -> Vec<ServiceDescriptor>;

/// Registration record of one provider
pub struct ProviderEntry {
    /// Registry name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Platforms the provider can run on
    pub confine_os: &'static [&'static str],
    /// Platforms where the provider is picked when none is requested
    pub default_for: &'static [&'static str],
    /// Optional features the provider implements
    pub features: &'static [Feature],
    construct: Constructor,
    enumerate: Enumerator,
}

impl ProviderEntry {
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn is_suitable(&self, os: &str) -> bool {
        self.confine_os.contains(&os)
    }

    pub fn is_default_for(&self, os: &str) -> bool {
        self.default_for.contains(&os)
    }

    /// Build a provider for `descriptor`
    ///
    /// Fails when the descriptor asks for flags and the provider cannot
    /// manage them.
    pub fn new_provider(
        &self,
        descriptor: ServiceDescriptor,
        ctx: &ProviderContext,
    ) -> Result<Box<dyn ServiceControl>> {
        if descriptor.flags.is_some() && !self.has_feature(Feature::Flaggable) {
            return Err(Error::Unsupported {
                provider: self.name.to_string(),
                feature: Feature::Flaggable,
            });
        }
        Ok((self.construct)(descriptor, ctx))
    }

    /// Enumerate installed services; never fails
    pub fn instances(&self, ctx: &ProviderContext) -> Vec<ServiceDescriptor> {
        (self.enumerate)(ctx)
    }
}

impl std::fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("name", &self.name)
            .field("confine_os", &self.confine_os)
            .field("default_for", &self.default_for)
            .field("features", &self.features)
            .finish_non_exhaustive()
    }
}

fn construct_rcctl(descriptor: ServiceDescriptor, ctx: &ProviderContext) -> Box<dyn ServiceControl> {
    let provider = Rcctl::new(descriptor, ctx.runner.clone());
    match &ctx.command_path {
        Some(path) => Box::new(provider.with_rcctl_path(path)),
        None => Box::new(provider),
    }
}

fn enumerate_rcctl(ctx: &ProviderContext) -> Vec<ServiceDescriptor> {
    let path = ctx
        .command_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(rcctl::DEFAULT_RCCTL));
    Rcctl::instances(&path, ctx.runner.as_ref())
}

/// All known providers
pub static PROVIDERS: &[ProviderEntry] = &[ProviderEntry {
    name: rcctl::PROVIDER_NAME,
    description: "Provider for OpenBSD's rc.d daemon control scripts",
    confine_os: &["openbsd"],
    default_for: &["openbsd"],
    features: &[Feature::Flaggable],
    construct: construct_rcctl,
    enumerate: enumerate_rcctl,
}];

/// Find a provider by name
pub fn lookup(name: &str) -> Option<&'static ProviderEntry> {
    PROVIDERS.iter().find(|entry| entry.name == name)
}

/// Default provider for a platform
pub fn default_for(os: &str) -> Option<&'static ProviderEntry> {
    PROVIDERS.iter().find(|entry| entry.is_default_for(os))
}

/// Resolve the provider to use on `os`
///
/// An explicitly named provider must exist and be suitable for the
/// platform; otherwise the platform default is used.
pub fn select(name: Option<&str>, os: &str) -> Result<&'static ProviderEntry> {
    let entry = match name {
        Some(name) => lookup(name).ok_or_else(|| Error::UnknownProvider(name.to_string()))?,
        None => default_for(os).ok_or_else(|| {
            Error::Config(format!("No default service provider for platform '{}'", os))
        })?,
    };

    if !entry.is_suitable(os) {
        return Err(Error::Unsuitable {
            provider: entry.name.to_string(),
            os: os.to_string(),
        });
    }

    tracing::debug!(provider = entry.name, os, "Selected service provider");
    Ok(entry)
}
