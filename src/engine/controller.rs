//! Engine instance lifecycle
//!
//! One controller owns at most one live engine handle for one canvas. Module
//! resolution happens on a dedicated worker thread; the continuation
//! re-checks the controller's liveness under the state lock before binding,
//! so a load that finishes after `dispose` can never resurrect an instance.
//! Completion is reported through a oneshot the caller may await or ignore.

use std::sync::{Arc, Mutex};
use std::thread;

use log::debug;
use tokio::sync::oneshot;

use super::{
    EngineFactory, EngineLoader, EngineModule, LiquidEngine, DISPLACEMENT_SCALE, MATERIAL,
    RAIN_ENABLED,
};
use crate::canvas::Canvas;
use crate::compose::ComposedImage;
use crate::Result;

/// How a create request concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Engine bound, configured and fed the image
    Created,
    /// No canvas existed at call time; retry once one does
    NoCanvas,
    /// The controller was disposed before the module finished loading
    Stale,
}

struct EffectState {
    handle: Option<Box<dyn LiquidEngine>>,
    live: bool,
    pending: u32,
    load_failed: bool,
}

/// Drives create / update-image / dispose for one engine instance.
///
/// `dispose` is safe to call at any point, any number of times; in-flight
/// loads observe it and become no-ops. A replacement create always disposes
/// the prior handle before binding the new one.
pub struct EffectController {
    state: Arc<Mutex<EffectState>>,
    loader: Arc<dyn EngineLoader>,
    module: EngineModule,
}

impl EffectController {
    pub fn new(loader: Arc<dyn EngineLoader>, module: EngineModule) -> Self {
        EffectController {
            state: Arc::new(Mutex::new(EffectState {
                handle: None,
                live: true,
                pending: 0,
                load_failed: false,
            })),
            loader,
            module,
        }
    }

    /// Resolve the engine module on a worker and bind it to the canvas.
    ///
    /// Returns immediately; the receiver resolves when the attempt concludes.
    /// Module loads are not cancellable, so a dispose racing the load is
    /// handled by the continuation checking liveness before it binds.
    pub fn create(
        &self,
        canvas: Option<&Canvas>,
        image: &ComposedImage,
    ) -> oneshot::Receiver<Result<CreateOutcome>> {
        let (tx, rx) = oneshot::channel();

        let canvas = match canvas {
            Some(canvas) => canvas.clone(),
            None => {
                let _ = tx.send(Ok(CreateOutcome::NoCanvas));
                return rx;
            }
        };

        {
            let mut state = self.state.lock().unwrap();
            if !state.live {
                let _ = tx.send(Ok(CreateOutcome::Stale));
                return rx;
            }
            state.pending += 1;
        }

        let data_url = image.data_url();
        let loader = Arc::clone(&self.loader);
        let module = self.module.clone();
        let state = Arc::clone(&self.state);

        thread::spawn(move || {
            let loaded = loader.load(&module);
            let result = finish_create(&state, loaded, &canvas, &data_url);
            let _ = tx.send(result);
        });
        rx
    }

    /// Feed a new still image into the live handle, if any.
    pub fn update_image(&self, image: &ComposedImage) {
        let mut state = self.state.lock().unwrap();
        if let Some(handle) = state.handle.as_mut() {
            handle.load_image(&image.data_url());
        }
    }

    /// Tear down the engine instance and mark the controller dead.
    ///
    /// Missing or already-disposed handles make this a successful no-op.
    pub fn dispose(&self) {
        let mut state = self.state.lock().unwrap();
        state.live = false;
        if let Some(mut handle) = state.handle.take() {
            debug!("disposing engine instance");
            handle.dispose();
        }
    }

    pub fn is_live(&self) -> bool {
        self.state.lock().unwrap().live
    }

    /// A handle exists and the controller has not been disposed.
    pub fn is_running(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.live && state.handle.is_some()
    }

    /// A load is in flight.
    pub fn is_loading(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.live && state.pending > 0
    }

    /// The most recent load attempt failed and no handle exists.
    pub fn load_failed(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.load_failed && state.handle.is_none()
    }
}

impl Drop for EffectController {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Continuation of `create` once the loader resolved. Everything from the
/// liveness check to storing the handle happens under one lock acquisition,
/// so a dispose cannot interleave.
fn finish_create(
    state: &Arc<Mutex<EffectState>>,
    loaded: Result<Arc<dyn EngineFactory>>,
    canvas: &Canvas,
    data_url: &str,
) -> Result<CreateOutcome> {
    let mut state = state.lock().unwrap();
    state.pending = state.pending.saturating_sub(1);

    if !state.live {
        debug!("engine module load finished after dispose; dropping result");
        return Ok(CreateOutcome::Stale);
    }

    let factory = match loaded {
        Ok(factory) => factory,
        Err(e) => {
            state.load_failed = true;
            return Err(e);
        }
    };

    // Replacement path: the prior instance goes away before the new one binds
    if let Some(mut old) = state.handle.take() {
        old.dispose();
    }

    let mut engine = match factory.bind(canvas) {
        Ok(engine) => engine,
        Err(e) => {
            state.load_failed = true;
            return Err(e);
        }
    };
    engine.set_material(MATERIAL);
    engine.set_displacement_scale(DISPLACEMENT_SCALE);
    engine.set_rain(RAIN_ENABLED);
    engine.load_image(data_url);

    state.handle = Some(engine);
    state.load_failed = false;
    Ok(CreateOutcome::Created)
}
