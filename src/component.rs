//! Backdrop lifecycle component
//!
//! [`LiquidBackdrop`] owns the whole pipeline for one mounted backdrop: it
//! captures the viewport, composes the still image, and drives an
//! [`EffectController`] that binds the engine to the canvas. The component
//! moves through a fixed set of phases:
//!
//! `Unmounted -> Mounting -> Composing -> EffectLoading -> Running`
//!
//! with `Disposing` on the way back down and `Degraded` whenever composition
//! or the engine load fails. Degraded keeps the canvas shell mounted so the
//! host page stays visually intact, just without the animated surface.
//!
//! Configuration updates compare by value. An identical config is a no-op; a
//! changed one tears the engine instance down completely and rebuilds from
//! composition onward, reusing the viewport captured at mount.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::oneshot;

use crate::canvas::Canvas;
use crate::compose::{ComposedImage, Composer};
use crate::engine::{CreateOutcome, EffectController, EngineLoader, EngineModule};
use crate::{BackdropConfig, Result, Viewport};

/// Where the component currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No canvas, no engine, nothing composed
    Unmounted,
    /// Canvas created, composition not started yet
    Mounting,
    /// Rasterizing the still image
    Composing,
    /// Engine module resolving on the worker
    EffectLoading,
    /// Engine bound and animating
    Running,
    /// Composition or engine load failed; static canvas stays up
    Degraded,
    /// Tearing the engine instance down
    Disposing,
}

/// The animated-backdrop component.
///
/// Construction is free of side effects; nothing renders until [`mount`].
/// Dropping the component unmounts it, so an engine instance can never
/// outlive the component that created it.
///
/// [`mount`]: LiquidBackdrop::mount
pub struct LiquidBackdrop {
    config: BackdropConfig,
    composer: Composer,
    loader: Arc<dyn EngineLoader>,
    module: EngineModule,
    controller: Option<EffectController>,
    canvas: Option<Canvas>,
    viewport: Option<Viewport>,
    composed: Option<ComposedImage>,
    pending: Option<oneshot::Receiver<Result<CreateOutcome>>>,
    phase: Phase,
}

impl LiquidBackdrop {
    /// Create an unmounted backdrop pinned to the default engine module.
    pub fn new(config: BackdropConfig, loader: Arc<dyn EngineLoader>) -> Self {
        Self::with_module(config, loader, EngineModule::liquid_default())
    }

    /// Create an unmounted backdrop against a specific engine module.
    pub fn with_module(
        config: BackdropConfig,
        loader: Arc<dyn EngineLoader>,
        module: EngineModule,
    ) -> Self {
        LiquidBackdrop {
            config,
            composer: Composer::new(),
            loader,
            module,
            controller: None,
            canvas: None,
            viewport: None,
            composed: None,
            pending: None,
            phase: Phase::Unmounted,
        }
    }

    /// Mount into a viewport: capture geometry, compose, start the engine.
    ///
    /// Mounting an already-mounted backdrop unmounts it first. The viewport
    /// is captured once; later resizes do not re-compose, matching a hero
    /// surface that is laid out once per page load.
    pub fn mount(&mut self, viewport: Viewport) {
        if self.canvas.is_some() {
            self.unmount();
        }
        self.set_phase(Phase::Mounting);
        self.viewport = Some(viewport);
        self.canvas = Some(Canvas::full_viewport(viewport));
        self.start_effect();
    }

    /// Replace the configuration.
    ///
    /// Equal configs are ignored. A changed config on a mounted backdrop
    /// disposes the running engine instance, re-composes at the mount
    /// viewport and brings a fresh instance up on the same canvas.
    pub fn update(&mut self, config: BackdropConfig) {
        if config == self.config {
            return;
        }
        self.config = config;
        if self.canvas.is_none() {
            return;
        }
        debug!("backdrop config changed; rebuilding effect");
        if let Some(controller) = self.controller.take() {
            controller.dispose();
        }
        self.pending = None;
        self.start_effect();
    }

    /// Tear everything down. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if self.canvas.is_none() && self.controller.is_none() {
            self.phase = Phase::Unmounted;
            return;
        }
        self.set_phase(Phase::Disposing);
        if let Some(controller) = self.controller.take() {
            controller.dispose();
        }
        self.pending = None;
        self.composed = None;
        self.canvas = None;
        self.viewport = None;
        self.set_phase(Phase::Unmounted);
    }

    /// Wait for an in-flight engine create to conclude, then report the phase.
    ///
    /// Without a pending create this returns the current phase immediately.
    pub async fn settled(&mut self) -> Phase {
        if let Some(rx) = self.pending.take() {
            match rx.await {
                Ok(Ok(CreateOutcome::Created)) => self.set_phase(Phase::Running),
                Ok(Ok(outcome)) => {
                    debug!("engine create concluded without instance: {:?}", outcome)
                }
                Ok(Err(e)) => {
                    warn!("liquid engine unavailable, keeping the still image: {}", e);
                    self.set_phase(Phase::Degraded);
                }
                Err(_) => {
                    warn!("engine worker went away without reporting");
                    self.set_phase(Phase::Degraded);
                }
            }
        }
        self.phase()
    }

    /// Current phase, folding in live controller state.
    ///
    /// While a create is in flight the worker may finish at any moment, so
    /// `EffectLoading` is refined against the controller before reporting.
    pub fn phase(&self) -> Phase {
        if self.phase == Phase::EffectLoading {
            if let Some(controller) = &self.controller {
                if controller.is_running() {
                    return Phase::Running;
                }
                if controller.load_failed() {
                    return Phase::Degraded;
                }
            }
        }
        self.phase
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    /// The canvas shell, present from mount until unmount.
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// The most recent composition, if the last compose succeeded.
    pub fn composed(&self) -> Option<&ComposedImage> {
        self.composed.as_ref()
    }

    /// Compose the still image and hand it to a fresh engine instance.
    fn start_effect(&mut self) {
        let viewport = match self.viewport {
            Some(viewport) => viewport,
            None => return,
        };
        self.set_phase(Phase::Composing);
        match self.composer.compose(&self.config, viewport) {
            Ok(image) => {
                let controller =
                    EffectController::new(Arc::clone(&self.loader), self.module.clone());
                let rx = controller.create(self.canvas.as_ref(), &image);
                self.composed = Some(image);
                self.controller = Some(controller);
                self.pending = Some(rx);
                self.set_phase(Phase::EffectLoading);
            }
            Err(e) => {
                warn!("backdrop composition failed, leaving canvas static: {}", e);
                self.composed = None;
                self.set_phase(Phase::Degraded);
            }
        }
    }

    fn set_phase(&mut self, next: Phase) {
        if next != self.phase {
            debug!("backdrop phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
    }
}

impl Drop for LiquidBackdrop {
    fn drop(&mut self) {
        self.unmount();
    }
}
