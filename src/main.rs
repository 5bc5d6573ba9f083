//! Spire of Ash entry point
//!
//! Runs a headless session driven by the demo pilot. Settings come from the
//! JSON file named by `SPIRE_SETTINGS` (default `spire_of_ash.json`).

use std::path::PathBuf;

use spire_of_ash::consts::{HEIGHT, WIDTH};
use spire_of_ash::platform::{AutoStart, DemoInput, StartPrompt, TitleScreen};
use spire_of_ash::renderer::HeadlessSurface;
use spire_of_ash::{Game, Result, Settings};

fn main() {
    env_logger::init();
    log::info!("Spire of Ash (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let path = std::env::var_os(Settings::PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(Settings::DEFAULT_PATH));
    let settings = Settings::load(&path)?;

    let surface = HeadlessSurface::new(WIDTH as u32, HEIGHT as u32, settings.pace)?;
    let input = DemoInput::new(settings.max_frames);
    let seed = settings.resolve_seed();

    if settings.title_screen {
        play(Game::new(seed, settings.target_fps, surface, input, TitleScreen));
    } else {
        play(Game::new(seed, settings.target_fps, surface, input, AutoStart));
    }
    Ok(())
}

fn play<P: StartPrompt>(mut game: Game<HeadlessSurface, DemoInput, P>) {
    let stats = game.run();
    println!(
        "frames: {}  deaths: {}  rooms: {}  best score: {}",
        stats.frames, stats.deaths, stats.rooms_entered, stats.best_score
    );
}
