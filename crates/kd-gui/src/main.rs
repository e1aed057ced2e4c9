//! Kindling window: macroquad entry point.
//!
//! Runs one simulation step per frame on the 960x640 virtual canvas, scaled
//! to fit the window.

use std::path::Path;

use kd_gui::app::{FrameControls, GameApp};
use kd_gui::input::{self, KeyboardInput};
use kd_gui::render::Sprites;
use kd_gui::theme::{CANVAS_H, CANVAS_W, palette, setup_virtual_canvas};
use kd_simulation::{SimConfig, TuningProfile};
use macroquad::prelude::*;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    Conf {
        window_title: "Kindling".to_owned(),
        window_width: CANVAS_W as i32,
        window_height: CANVAS_H as i32,
        window_resizable: true,
        ..Default::default()
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "kd_simulation=debug,kd_gui=debug"
    } else {
        "kd_simulation=info,kd_gui=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_config(args: &[String]) -> Result<SimConfig, String> {
    let profile_name = flag_value(args, "--profile").unwrap_or("classic");
    let profile = TuningProfile::by_name(profile_name).map_err(|e| e.to_string())?;
    let mut config = SimConfig::default()
        .with_profile(profile)
        .with_max_events(200);
    if let Some(seed) = flag_value(args, "--seed") {
        let seed = seed
            .parse::<u64>()
            .map_err(|e| format!("invalid --seed \"{seed}\": {e}"))?;
        config = config.with_seed(seed);
    }
    Ok(config)
}

#[macroquad::main(window_conf)]
async fn main() {
    // Parse CLI args: --assets <dir> --profile <name> --seed <n> --verbose
    let args: Vec<String> = std::env::args().collect();
    init_logging(args.iter().any(|a| a == "--verbose"));

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let sprites = match flag_value(&args, "--assets") {
        Some(dir) => Sprites::load(Path::new(dir)).await,
        None => Sprites::none(),
    };

    let mut app = match GameApp::new(config, sprites) {
        Ok(app) => app,
        Err(e) => {
            error!("failed to start simulation: {e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    loop {
        if input::escape_pressed() {
            break;
        }

        let controls = FrameControls {
            pause: input::pause_pressed(),
            restart: input::restart_pressed(),
            toggle_reach: input::reach_toggle_pressed(),
        };
        if let Err(e) = app.update(controls, &KeyboardInput, f64::from(get_frame_time())) {
            error!("simulation step failed: {e}");
            break;
        }

        // Letterbox bars, then the canvas
        clear_background(palette::BLACK);
        setup_virtual_canvas();
        app.draw();

        next_frame().await;
    }
}
