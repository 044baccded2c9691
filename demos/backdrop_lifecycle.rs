//! Walks the backdrop component through mount, config update and unmount
//! against the inspectable no-op engine backend.
//! Run with: cargo run --example backdrop_lifecycle

use std::sync::Arc;

use liquidfx::engine::{EngineModule, LinkedLoader, NoopEngineFactory};
use liquidfx::{BackdropConfig, LiquidBackdrop, Viewport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("LiquidFX - Backdrop Lifecycle\n");

    let factory = Arc::new(NoopEngineFactory::new());
    let mut loader = LinkedLoader::new();
    loader.register(EngineModule::liquid_default(), factory.clone());

    let config = BackdropConfig {
        heading_lines: vec!["Liquid".to_string(), "Effect".to_string()],
        sub_label: Some("Interactive UI Component".to_string()),
        ..Default::default()
    };

    let mut backdrop = LiquidBackdrop::new(config, Arc::new(loader));
    println!("Phase after construction: {:?}", backdrop.phase());

    backdrop.mount(Viewport {
        width: 1280,
        height: 800,
        dpr: 1.0,
    });
    println!("Phase after mount:        {:?}", backdrop.phase());
    println!("Phase once settled:       {:?}", backdrop.settled().await);

    let mut changed = backdrop.config().clone();
    changed.tagline = Some("Scroll to explore".to_string());
    backdrop.update(changed);
    println!("Phase after update:       {:?}", backdrop.settled().await);

    backdrop.unmount();
    println!("Phase after unmount:      {:?}\n", backdrop.phase());

    println!("Engine backend saw:");
    for event in factory.events() {
        println!("  {:?}", event);
    }
    Ok(())
}
