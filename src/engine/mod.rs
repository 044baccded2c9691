//! Effect engine boundary
//!
//! The liquid-surface engine is an external collaborator: it owns its render
//! loop, shaders and physics, and this crate only creates it, feeds it a
//! texture and tears it down. The boundary is typed as the exact capability
//! set the backdrop consumes, so any backend satisfying [`LiquidEngine`] can
//! run the effect and tests can substitute an inspectable no-op.

pub mod controller;
pub mod loader;
pub mod noop;

pub use controller::{CreateOutcome, EffectController};
pub use loader::{EngineLoader, LinkedLoader};
pub use noop::{EngineEvent, NoopEngineFactory};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::canvas::Canvas;
use crate::{Error, Result};

/// Material tuning applied to every engine instance. These are part of the
/// visual identity of the effect, not configuration.
pub const MATERIAL: Material = Material {
    metalness: 0.35,
    roughness: 0.45,
};

/// Fixed displacement scale applied to every engine instance
pub const DISPLACEMENT_SCALE: f32 = 2.0;

/// Rain is part of the engine's feature set but stays off for this effect
pub const RAIN_ENABLED: bool = false;

/// Surface material parameters understood by liquid engines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub metalness: f32,
    pub roughness: f32,
}

/// The operations the backdrop drives on a running engine instance.
///
/// All of them are fire-and-forget: the engine animates on its own and
/// reports nothing back. `dispose` releases GPU and DOM resources; the
/// instance must tolerate it being the last call at any point.
pub trait LiquidEngine: Send {
    /// Load a still image (a `data:` URL) as the effect texture
    fn load_image(&mut self, data_url: &str);

    /// Set surface material parameters
    fn set_material(&mut self, material: Material);

    /// Set the displacement intensity of the liquid surface
    fn set_displacement_scale(&mut self, scale: f32);

    /// Toggle the engine's rain feature
    fn set_rain(&mut self, enabled: bool);

    /// Tear the instance down and release its resources
    fn dispose(&mut self);
}

/// Creates engine instances bound to a canvas.
///
/// Loaders resolve a module reference to a factory; the factory then binds
/// one instance per canvas.
pub trait EngineFactory: Send + Sync + std::fmt::Debug {
    fn bind(&self, canvas: &Canvas) -> Result<Box<dyn LiquidEngine>>;
}

const CDN_BASE: &str = "https://cdn.jsdelivr.net/npm";

/// A versioned reference to an external engine module.
///
/// The version is pinned so the effect behaves identically across deploys;
/// loaders may resolve the reference however they like (compiled-in registry,
/// remote fetch), but the reference itself always names one exact build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineModule {
    pub package: String,
    pub version: String,
    pub path: String,
}

impl EngineModule {
    pub fn new(
        package: impl Into<String>,
        version: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        EngineModule {
            package: package.into(),
            version: version.into(),
            path: path.into(),
        }
    }

    /// The pinned liquid-surface build this crate is written against.
    pub fn liquid_default() -> Self {
        EngineModule::new(
            "threejs-components",
            "0.0.30",
            "build/backgrounds/liquid1.min.js",
        )
    }

    /// CDN URL for the pinned module.
    pub fn url(&self) -> Result<Url> {
        let raw = format!(
            "{}/{}@{}/{}",
            CDN_BASE, self.package, self.version, self.path
        );
        Url::parse(&raw).map_err(|e| Error::ConfigError(format!("bad module url {}: {}", raw, e)))
    }
}

impl std::fmt::Display for EngineModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}/{}", self.package, self.version, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_module_is_pinned() {
        let module = EngineModule::liquid_default();
        assert_eq!(module.package, "threejs-components");
        assert_eq!(module.version, "0.0.30");
        assert_eq!(
            module.url().unwrap().as_str(),
            "https://cdn.jsdelivr.net/npm/threejs-components@0.0.30/build/backgrounds/liquid1.min.js"
        );
    }

    #[test]
    fn module_display_names_exact_build() {
        let module = EngineModule::new("pkg", "1.2.3", "dist/effect.js");
        assert_eq!(module.to_string(), "pkg@1.2.3/dist/effect.js");
    }

    #[test]
    fn tuning_constants_match_the_effect() {
        assert_eq!(MATERIAL.metalness, 0.35);
        assert_eq!(MATERIAL.roughness, 0.45);
        assert_eq!(DISPLACEMENT_SCALE, 2.0);
        assert!(!RAIN_ENABLED);
    }
}
