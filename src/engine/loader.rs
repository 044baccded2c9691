//! Module resolution for engine backends
//!
//! The original effect resolved its engine by injecting a script tag and
//! reading a global. Here the same step is a typed lookup: a loader resolves
//! a pinned [`EngineModule`] reference to an [`EngineFactory`], and backends
//! are linked into the binary and registered up front. Loaders run on the
//! controller's worker, so a slow or blocking resolution never stalls the
//! host.

use std::collections::HashMap;
use std::sync::Arc;

use super::noop::NoopEngineFactory;
use super::{EngineFactory, EngineModule};
use crate::{Error, Result};

/// Resolves module references to engine factories.
///
/// Implementations may block; resolution happens off the caller's thread. A
/// failed resolution surfaces as [`Error::EngineLoadError`] and leaves the
/// backdrop in its degraded, effect-less state.
pub trait EngineLoader: Send + Sync {
    fn load(&self, module: &EngineModule) -> Result<Arc<dyn EngineFactory>>;
}

/// A loader over compiled-in backends.
///
/// Factories are registered against exact module references; asking for an
/// unregistered module fails the same way a dead CDN would.
pub struct LinkedLoader {
    registry: HashMap<EngineModule, Arc<dyn EngineFactory>>,
}

impl LinkedLoader {
    pub fn new() -> Self {
        LinkedLoader {
            registry: HashMap::new(),
        }
    }

    /// A loader with the no-op backend registered for the default pin.
    /// Safe default for tests and headless environments.
    pub fn with_noop() -> Self {
        let mut loader = Self::new();
        loader.register(
            EngineModule::liquid_default(),
            Arc::new(NoopEngineFactory::new()),
        );
        loader
    }

    pub fn register(&mut self, module: EngineModule, factory: Arc<dyn EngineFactory>) {
        self.registry.insert(module, factory);
    }
}

impl Default for LinkedLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineLoader for LinkedLoader {
    fn load(&self, module: &EngineModule) -> Result<Arc<dyn EngineFactory>> {
        self.registry.get(module).cloned().ok_or_else(|| {
            Error::EngineLoadError(format!("no backend registered for {}", module))
        })
    }
}
