use std::sync::Arc;

use liquidfx::engine::{EngineEvent, EngineModule, LinkedLoader, NoopEngineFactory};
use liquidfx::{BackdropConfig, LiquidBackdrop, Phase, Viewport};

fn config() -> BackdropConfig {
    BackdropConfig {
        heading_lines: vec!["Liquid".to_string(), "Effect".to_string()],
        sub_label: Some("Interactive UI Component".to_string()),
        tagline: Some("Scroll to explore".to_string()),
        ..Default::default()
    }
}

fn harness() -> (LiquidBackdrop, Arc<NoopEngineFactory>) {
    let factory = Arc::new(NoopEngineFactory::new());
    let mut loader = LinkedLoader::new();
    loader.register(EngineModule::liquid_default(), factory.clone());
    (LiquidBackdrop::new(config(), Arc::new(loader)), factory)
}

fn viewport(width: u32, height: u32) -> Viewport {
    Viewport {
        width,
        height,
        dpr: 1.0,
    }
}

fn first_index(events: &[EngineEvent], pred: impl Fn(&EngineEvent) -> bool) -> usize {
    events.iter().position(pred).expect("event missing")
}

#[tokio::test]
async fn mount_then_unmount_walks_the_lifecycle() {
    let (mut backdrop, factory) = harness();
    assert_eq!(backdrop.phase(), Phase::Unmounted);

    backdrop.mount(viewport(320, 200));
    assert_eq!(backdrop.settled().await, Phase::Running);
    assert_eq!(backdrop.composed().map(|i| (i.width, i.height)), Some((320, 200)));

    backdrop.unmount();
    assert_eq!(backdrop.phase(), Phase::Unmounted);
    assert!(backdrop.composed().is_none());

    let events = factory.events();
    let image = first_index(&events, |e| matches!(e, EngineEvent::ImageLoaded { .. }));
    let disposed = first_index(&events, |e| *e == EngineEvent::Disposed);
    assert!(image < disposed);
}

#[tokio::test]
async fn config_change_rebuilds_in_order() {
    let (mut backdrop, factory) = harness();
    backdrop.mount(viewport(320, 200));
    assert_eq!(backdrop.settled().await, Phase::Running);

    let mut changed = backdrop.config().clone();
    changed.heading_lines = vec!["Surface".to_string()];
    backdrop.update(changed);
    assert_eq!(backdrop.settled().await, Phase::Running);

    // The first instance is torn down strictly before the replacement binds
    let events = factory.events();
    let first_bind = first_index(&events, |e| matches!(e, EngineEvent::Bound { .. }));
    let disposed = first_index(&events, |e| *e == EngineEvent::Disposed);
    let second_bind = events
        .iter()
        .rposition(|e| matches!(e, EngineEvent::Bound { .. }))
        .expect("second bind missing");
    assert!(first_bind < disposed && disposed < second_bind);

    let loads = events
        .iter()
        .filter(|e| matches!(e, EngineEvent::ImageLoaded { .. }))
        .count();
    assert_eq!(loads, 2);
}

#[tokio::test]
async fn remount_replaces_viewport_and_instance() {
    let (mut backdrop, factory) = harness();
    backdrop.mount(viewport(320, 200));
    assert_eq!(backdrop.settled().await, Phase::Running);

    backdrop.mount(viewport(640, 400));
    assert_eq!(backdrop.settled().await, Phase::Running);
    assert_eq!(backdrop.composed().map(|i| (i.width, i.height)), Some((640, 400)));

    let events = factory.events();
    let disposed = first_index(&events, |e| *e == EngineEvent::Disposed);
    let second_bind = events
        .iter()
        .rposition(|e| matches!(e, EngineEvent::Bound { .. }))
        .expect("second bind missing");
    assert!(disposed < second_bind);
}

#[tokio::test]
async fn hero_scenario_runs_end_to_end() {
    let factory = Arc::new(NoopEngineFactory::new());
    let mut loader = LinkedLoader::new();
    loader.register(EngineModule::liquid_default(), factory.clone());

    let config = BackdropConfig {
        heading_lines: vec!["Liquid".to_string(), "Effect".to_string()],
        sub_label: Some("demo".to_string()),
        tagline: Some("built".to_string()),
        background_color: "#fafafa".to_string(),
        text_color: "#1d1d1f".to_string(),
    };
    let mut backdrop = LiquidBackdrop::new(config, Arc::new(loader));

    backdrop.mount(viewport(1280, 800));
    assert_eq!(backdrop.settled().await, Phase::Running);
    let image = backdrop.composed().expect("image composed");
    assert_eq!((image.width, image.height), (1280, 800));
    assert!(!image.png.is_empty());

    backdrop.unmount();
    let disposals = factory
        .events()
        .iter()
        .filter(|e| **e == EngineEvent::Disposed)
        .count();
    assert_eq!(disposals, 1);
}

#[tokio::test]
async fn engine_failure_keeps_the_still_image() {
    // Loader with no backend registered at all
    let backdrop_loader = Arc::new(LinkedLoader::new());
    let mut backdrop = LiquidBackdrop::new(config(), backdrop_loader);

    backdrop.mount(viewport(320, 200));
    assert_eq!(backdrop.settled().await, Phase::Degraded);

    // The composition survives; only the animated layer is missing
    assert!(backdrop.composed().is_some());
    assert!(backdrop.canvas().is_some());
}
