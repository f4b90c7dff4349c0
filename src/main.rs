//! Demo: draws a small sampler and prints the recorded machine instructions as JSON.
//!
//! Usage: `gcanvas [config.json|config.toml]`. Without an argument the user config is
//! used when present, otherwise the defaults.

use anyhow::Context;
use gcanvas::{default_config_path, init_logging, recording_canvas, CanvasConfig, BUILD_DATE, VERSION};
use std::f64::consts::{PI, TAU};
use std::path::PathBuf;
use tracing::{info, warn};

fn load_config() -> anyhow::Result<CanvasConfig> {
    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        return CanvasConfig::load_from_file(&path)
            .with_context(|| format!("loading {}", path.display()));
    }

    match default_config_path() {
        Ok(path) if path.exists() => CanvasConfig::load_from_file(&path)
            .with_context(|| format!("loading {}", path.display())),
        _ => Ok(CanvasConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("gcanvas {} (built {})", VERSION, BUILD_DATE);

    let config = load_config()?;
    let mut canvas = recording_canvas(&config)?;

    canvas.stroke_rect(0.0, 0.0, 60.0, 40.0);

    canvas.save();
    canvas.translate(30.0, 20.0);
    canvas.begin_path();
    canvas.arc(0.0, 0.0, 12.0, 0.0, TAU, false);
    canvas.stroke();

    canvas.rotate(PI / 6.0);
    canvas.begin_path();
    canvas.move_to(-8.0, 0.0);
    canvas.bezier_curve_to(-4.0, 8.0, 4.0, -8.0, 8.0, 0.0);
    canvas.stroke();
    canvas.restore();

    let report = canvas.fill_rect(70.0, 0.0, 20.0, 20.0);
    info!("Pocket: {} passes, stop {:?}", report.passes, report.stop);

    match canvas.fill_text("GC", 5.0, 45.0) {
        Ok(report) => info!("Text: {} passes", report.passes),
        Err(err) => warn!("Skipping text: {}", err),
    }

    println!("{}", canvas.emitter().driver().to_json()?);
    Ok(())
}
