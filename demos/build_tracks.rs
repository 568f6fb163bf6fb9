//! Rebuilds per-boat trajectory lines and the latest-fix roster from a raw
//! position-fix GeoJSON document.
//!
//! Usage: build_tracks <pointages.geojson> [output-dir]

use regatta::prelude::*;
use std::path::{Path, PathBuf};

fn write_collection(path: &Path, collection: &FeatureCollection) -> Result<()> {
    let features: Vec<_> = collection
        .features
        .iter()
        .map(|f| {
            serde_json::json!({
                "type": "Feature",
                "geometry": f.geometry,
                "properties": f.properties,
            })
        })
        .collect();
    let document = serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    });
    std::fs::write(path, serde_json::to_string_pretty(&document)?)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        eprintln!("usage: build_tracks <pointages.geojson> [output-dir]");
        std::process::exit(2);
    };
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let body = std::fs::read_to_string(&input)?;
    let fixes = FeatureCollection::from_str(&body)?;
    log::info!(
        "loaded {} fixes for {} boats",
        fixes.len(),
        fixes.boats().len()
    );

    let tracks = build_tracks(&fixes);
    let latest = latest_fixes(&fixes);

    let tracks_path = output_dir.join("trajectoire.geojson");
    let latest_path = output_dir.join("dernier_pointage.geojson");
    write_collection(&tracks_path, &tracks)?;
    write_collection(&latest_path, &latest)?;

    println!(
        "{} tracks -> {}, {} latest fixes -> {}",
        tracks.len(),
        tracks_path.display(),
        latest.len(),
        latest_path.display()
    );
    Ok(())
}
