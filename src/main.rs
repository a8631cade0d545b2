//! Headless demo: replay clicks on a mask image and log the agent's walk
//!
//! Usage: `clicknav <mask.png> [config.ron|config.json] [x,y ...]`

use std::time::Duration;

use clicknav::prelude::*;

/// Simulated tick length (60 Hz)
const TICK: Duration = Duration::from_micros(16_667);
/// Give up on a click after this many ticks
const MAX_TICKS_PER_CLICK: u32 = 60 * 30;

fn parse_point(arg: &str) -> Result<Vec2, String> {
    let (x, y) = arg
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{arg}'"))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("bad x in '{arg}': {e}"))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("bad y in '{arg}': {e}"))?;
    Ok(Vec2::new(x, y))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(mask_path) = args.next() else {
        eprintln!("Usage: clicknav <mask.png> [config.ron|config.json] [x,y ...]");
        return Ok(());
    };

    let mut config = NavConfig::default();
    let mut clicks = Vec::new();
    for arg in args {
        if arg.ends_with(".ron") || arg.ends_with(".json") {
            config = NavConfig::load(&arg)?;
        } else {
            clicks.push(parse_point(&arg)?);
        }
    }

    let mut images = ImageStore::new();
    images.load(config.mask_key.clone(), &mask_path)?;

    // Spawn near the lower left, like the hub scene
    let (width, height) = images.dimensions(&config.mask_key).unwrap_or((0, 0));
    let spawn = Vec2::new(width as f32 * 0.12, height as f32 * 0.90);
    let mut scene = NavScene::new(&images, &config, spawn);

    for click in clicks {
        match scene.click(click) {
            Ok(destination) => log::info!("Click {click} -> heading to {destination}"),
            Err(e) => {
                log::info!("Click {click} rejected: {e}");
                continue;
            }
        }

        let mut ticks = 0;
        while scene.agent().is_moving() && ticks < MAX_TICKS_PER_CLICK {
            scene.tick(TICK);
            for event in scene.events.iter() {
                log::debug!("{event:?}");
            }
            ticks += 1;
        }

        let agent = scene.agent();
        log::info!(
            "Agent at {} facing {:?} after {ticks} ticks",
            agent.position(),
            agent.facing()
        );
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("clicknav error: {e}");
        std::process::exit(1);
    }
}
