//! Runs a complete viewer session against the in-memory map surface:
//! startup fetch, per-boat toggles, hover, theme switch and bulk actions.

use regatta::{
    prelude::*,
    LayerEvent,
};

const TRACKS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"nom": "PRB", "rang": 2, "30m_cap": 210.0, "30m_vitesse": 18.4},
            "geometry": {"type": "LineString", "coordinates": [[-1.79, 46.49], [-2.5, 45.8], [-4.1, 44.9]]}
        },
        {
            "type": "Feature",
            "properties": {"nom": "Hublot", "rang": null},
            "geometry": {"type": "LineString", "coordinates": [[-1.79, 46.49], [-2.2, 45.5]]}
        },
        {
            "type": "Feature",
            "properties": {"nom": "Maitre CoQ V", "rang": 1, "30m_cap": 195.0, "30m_vitesse": 21.1},
            "geometry": {"type": "LineString", "coordinates": [[-1.79, 46.49], [-2.8, 45.1]]}
        }
    ]
}"#;

const FIXES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"nom": "PRB", "timestamp": "2024-11-12T07:00:00"},
            "geometry": {"type": "Point", "coordinates": [-2.5, 45.8]}
        },
        {
            "type": "Feature",
            "properties": {"nom": "Hublot", "timestamp": "2024-11-12T07:00:00"},
            "geometry": {"type": "Point", "coordinates": [-2.2, 45.5]}
        },
        {
            "type": "Feature",
            "properties": {"nom": "Maitre CoQ V", "timestamp": "2024-11-12T07:00:00"},
            "geometry": {"type": "Point", "coordinates": [-2.8, 45.1]}
        }
    ]
}"#;

fn print_state<S: TrackSource>(session: &ViewerSession<MemoryMap, S>) {
    let controller = session.controller();
    println!("  theme: {}", controller.theme());
    for button in controller.menu().buttons() {
        let marker = match button.state {
            ButtonState::Active => "[x]",
            ButtonState::Inactive => "[ ]",
        };
        println!("  {marker} {}", button.boat);
    }
    println!("  layers: {:?}", controller.map().layer_ids());
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = ViewerConfig::default();
    let source = StaticTrackSource::new(
        FeatureCollection::from_str(TRACKS)?,
        FeatureCollection::from_str(FIXES)?,
    );
    let map = MemoryMap::new(config.theme.style_url(), config.zoom);
    let mut session = ViewerSession::new(map, source, &config);

    if !session.start().await {
        println!("startup fetch failed, nothing to show");
        return Ok(());
    }
    println!("Session started, menu ordered by rank:");
    print_state(&session);

    println!("\nToggling the race leader:");
    session.toggle_boat("Maitre CoQ V")?;
    print_state(&session);

    println!("\nHovering its trajectory:");
    session.handle_event(&LayerEvent::PointerEnter {
        layer_id: "track-Maitre CoQ V".to_string(),
    })?;
    if let Some(text) = session.controller().panel().content() {
        println!("  panel: {text}");
    }
    session.handle_event(&LayerEvent::PointerLeave {
        layer_id: "track-Maitre CoQ V".to_string(),
    })?;

    println!("\nSwitching theme (snapshot, style swap, re-fetch, replay):");
    session.switch_theme().await?;
    print_state(&session);

    println!("\nShow all, then clear all:");
    session.show_all()?;
    print_state(&session);
    session.clear_all()?;
    print_state(&session);

    Ok(())
}
