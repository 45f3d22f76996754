use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigSections, SectionOptions};
use crate::notifications::backend::NotificationBackend;
use crate::notifications::error::{BackendError, BackendResult};
use crate::notifications::{GmailBackend, PushoverBackend, StderrBackend, WebhookBackend};

type BackendConstructor = fn(&SectionOptions) -> BackendResult<Box<dyn NotificationBackend>>;

/// Fatal problems found while resolving configured backends
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Ambiguous backend '{name}': {count} implementations registered under this name")]
    AmbiguousBackend { name: String, count: usize },

    #[error("Failed to configure backend '{name}'")]
    Construction {
        name: String,
        #[source]
        source: BackendError,
    },
}

/// A backend implementation known to the registry
#[derive(Clone, Copy)]
pub struct BackendDescriptor {
    name: &'static str,
    constructor: BackendConstructor,
}

impl BackendDescriptor {
    /// Descriptor for a backend type, named after its section
    pub fn of<T>() -> Self
    where
        T: NotificationBackend + 'static,
    {
        Self {
            name: T::backend_name(),
            constructor: construct::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn construct(&self, options: &SectionOptions) -> BackendResult<Box<dyn NotificationBackend>> {
        (self.constructor)(options)
    }
}

impl fmt::Debug for BackendDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendDescriptor").field("name", &self.name).finish()
    }
}

fn construct<T>(options: &SectionOptions) -> BackendResult<Box<dyn NotificationBackend>>
where
    T: NotificationBackend + 'static,
{
    Ok(Box::new(T::from_options(options)?))
}

/// A configured backend, ready to be notified
pub struct BackendInstance {
    name: String,
    /// Command being reported; set by the dispatcher right before notifying
    pub command: Option<String>,
    backend: Box<dyn NotificationBackend>,
}

impl BackendInstance {
    pub fn new(name: impl Into<String>, backend: Box<dyn NotificationBackend>) -> Self {
        Self {
            name: name.into(),
            command: None,
            backend,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> &dyn NotificationBackend {
        self.backend.as_ref()
    }
}

impl fmt::Debug for BackendInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendInstance")
            .field("name", &self.name)
            .field("command", &self.command)
            .finish()
    }
}

/// Backends active for one run, in notification order
#[derive(Debug, Default)]
pub struct ActiveBackends {
    instances: Vec<BackendInstance>,
}

impl ActiveBackends {
    pub fn new(instances: Vec<BackendInstance>) -> Self {
        Self { instances }
    }

    pub fn names(&self) -> Vec<&str> {
        self.instances.iter().map(BackendInstance::name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&BackendInstance> {
        self.instances.iter().find(|instance| instance.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BackendInstance> {
        self.instances.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut BackendInstance> {
        self.instances.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Static table mapping section names to backend constructors
#[derive(Debug, Default, Clone)]
pub struct BackendRegistry {
    descriptors: Vec<BackendDescriptor>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every backend compiled into tyme
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register::<StderrBackend>()
            .register::<PushoverBackend>()
            .register::<GmailBackend>()
            .register::<WebhookBackend>();
        registry
    }

    /// Register a backend type with the registry
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: NotificationBackend + 'static,
    {
        self.register_descriptor(BackendDescriptor::of::<T>())
    }

    pub fn register_descriptor(&mut self, descriptor: BackendDescriptor) -> &mut Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Every registered descriptor, in registration order
    pub fn discover(&self) -> &[BackendDescriptor] {
        &self.descriptors
    }

    /// Instantiate one backend per configured section with a known name.
    ///
    /// Instances come out in registration order. Sections naming no
    /// registered backend are skipped. A configured name with more than one
    /// implementation, or a backend rejecting its options, fails the whole
    /// resolution so that no command runs half-configured.
    pub fn resolve(&self, sections: &ConfigSections) -> Result<ActiveBackends, RegistryError> {
        for name in sections.names() {
            if !self.descriptors.iter().any(|d| d.name == name) {
                debug!(section = %name, "ignoring section without a registered backend");
            }
        }

        let mut instances = Vec::new();
        for (index, descriptor) in self.descriptors.iter().enumerate() {
            // Handle each name once, at its first registration
            if self.descriptors[..index].iter().any(|d| d.name == descriptor.name) {
                continue;
            }
            let Some(section) = sections.get(descriptor.name) else {
                continue;
            };

            let count = self.descriptors.iter().filter(|d| d.name == descriptor.name).count();
            if count > 1 {
                return Err(RegistryError::AmbiguousBackend {
                    name: descriptor.name.to_string(),
                    count,
                });
            }

            let backend = descriptor
                .construct(&section.options)
                .map_err(|source| RegistryError::Construction {
                    name: descriptor.name.to_string(),
                    source,
                })?;
            debug!(backend = %descriptor.name, "loaded notification backend");
            instances.push(BackendInstance::new(descriptor.name, backend));
        }

        Ok(ActiveBackends::new(instances))
    }
}
