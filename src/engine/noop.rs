//! Inspectable no-op engine backend
//!
//! Implements the engine contract without rendering anything. Every call is
//! recorded into a log shared with the factory, so tests can assert the exact
//! call sequence a lifecycle produced, including sequencing across instances
//! bound by the same factory.

use std::sync::{Arc, Mutex};

use super::{EngineFactory, LiquidEngine, Material};
use crate::canvas::Canvas;
use crate::Result;

/// One observed engine call
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Bound { canvas_id: String },
    ImageLoaded { bytes: usize },
    MaterialSet { metalness: f32, roughness: f32 },
    DisplacementSet(f32),
    RainSet(bool),
    Disposed,
}

/// Factory for no-op engines sharing one event log
#[derive(Debug)]
pub struct NoopEngineFactory {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl NoopEngineFactory {
    pub fn new() -> Self {
        NoopEngineFactory {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of every call observed so far, in order.
    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Default for NoopEngineFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineFactory for NoopEngineFactory {
    fn bind(&self, canvas: &Canvas) -> Result<Box<dyn LiquidEngine>> {
        if let Ok(mut events) = self.events.lock() {
            events.push(EngineEvent::Bound {
                canvas_id: canvas.id.clone(),
            });
        }
        Ok(Box::new(NoopLiquidEngine {
            events: Arc::clone(&self.events),
            disposed: false,
        }))
    }
}

/// Engine instance that only records what was asked of it
pub struct NoopLiquidEngine {
    events: Arc<Mutex<Vec<EngineEvent>>>,
    disposed: bool,
}

impl NoopLiquidEngine {
    fn record(&self, event: EngineEvent) {
        if self.disposed {
            return;
        }
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl LiquidEngine for NoopLiquidEngine {
    fn load_image(&mut self, data_url: &str) {
        self.record(EngineEvent::ImageLoaded {
            bytes: data_url.len(),
        });
    }

    fn set_material(&mut self, material: Material) {
        self.record(EngineEvent::MaterialSet {
            metalness: material.metalness,
            roughness: material.roughness,
        });
    }

    fn set_displacement_scale(&mut self, scale: f32) {
        self.record(EngineEvent::DisplacementSet(scale));
    }

    fn set_rain(&mut self, enabled: bool) {
        self.record(EngineEvent::RainSet(enabled));
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.record(EngineEvent::Disposed);
        self.disposed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;

    #[test]
    fn records_call_sequence() {
        let factory = NoopEngineFactory::new();
        let canvas = Canvas::full_viewport(Viewport::default());
        let mut engine = factory.bind(&canvas).unwrap();
        engine.set_material(Material {
            metalness: 0.35,
            roughness: 0.45,
        });
        engine.load_image("data:image/png;base64,AAAA");
        engine.dispose();

        let events = factory.events();
        assert_eq!(
            events[0],
            EngineEvent::Bound {
                canvas_id: "liquid-canvas".to_string()
            }
        );
        assert!(matches!(events[1], EngineEvent::MaterialSet { .. }));
        assert_eq!(events[2], EngineEvent::ImageLoaded { bytes: 26 });
        assert_eq!(events[3], EngineEvent::Disposed);
    }

    #[test]
    fn double_dispose_records_once() {
        let factory = NoopEngineFactory::new();
        let canvas = Canvas::full_viewport(Viewport::default());
        let mut engine = factory.bind(&canvas).unwrap();
        engine.dispose();
        engine.dispose();
        let disposals = factory
            .events()
            .iter()
            .filter(|e| **e == EngineEvent::Disposed)
            .count();
        assert_eq!(disposals, 1);
    }

    #[test]
    fn calls_after_dispose_are_dropped() {
        let factory = NoopEngineFactory::new();
        let canvas = Canvas::full_viewport(Viewport::default());
        let mut engine = factory.bind(&canvas).unwrap();
        engine.dispose();
        engine.load_image("data:image/png;base64,AAAA");
        assert_eq!(factory.events().len(), 2); // Bound + Disposed
    }
}
