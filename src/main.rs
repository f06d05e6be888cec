//! Traffic Racer entry point
//!
//! Runs a headless demo race: logs in a demo player, lets the autopilot drive
//! until the run ends, and prints the leaderboard. A windowed surface would
//! drive `App` the same way, feeding it keys and drawing `App::frame`.

use std::process::ExitCode;

use traffic_racer::consts::NOMINAL_FPS;
use traffic_racer::persistence::{JsonFileStore, RecordStore};
use traffic_racer::platform::Key;
use traffic_racer::renderer::tessellate;
use traffic_racer::{App, Screen, SimConfig};

const RECORDS_PATH: &str = "traffic_racer_records.json";
const CONFIG_ENV: &str = "TRAFFIC_RACER_CONFIG";
/// Give up on the demo after ten simulated minutes
const MAX_FRAMES: u32 = 10 * 60 * NOMINAL_FPS as u32;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Traffic Racer (headless) starting...");

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Invalid config {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => SimConfig::default(),
    };

    let store: Box<dyn RecordStore> = match JsonFileStore::open(RECORDS_PATH) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::error!("Could not open {RECORDS_PATH}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut app = match App::new(config, store, seed) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Invalid config: {e}");
            return ExitCode::FAILURE;
        }
    };

    for ch in "demo".chars() {
        app.text(ch);
    }
    app.key(Key::Tab, true);
    for ch in "demo".chars() {
        app.text(ch);
    }
    app.key(Key::Enter, true);

    let Some(session) = app.session_mut() else {
        log::error!("Demo login was refused");
        return ExitCode::FAILURE;
    };
    session.set_autopilot(true);

    let dt = 1.0 / NOMINAL_FPS;
    let mut frames = 0;
    while frames < MAX_FRAMES {
        app.update(dt);
        frames += 1;
        if let Screen::Race(session) = app.screen() {
            if session.state().game_over_settled() {
                log::info!(
                    "Demo run over after {frames} frames: score {}",
                    session.state().run.score
                );
                break;
            }
        }
    }
    let vertices = tessellate(&app.frame()).len();
    log::debug!("Last frame tessellated to {vertices} vertices");

    app.key(Key::Escape, true);
    let board = app.leaderboard();
    if let Some(best) = board.top_score() {
        log::info!("Best score on record: {best}");
    }
    println!("LEADERBOARD");
    for (i, entry) in board.entries.iter().enumerate() {
        let name = entry.display_name();
        println!("{:>2}. {name:<10} {:>8}", i + 1, entry.score);
    }
    ExitCode::SUCCESS
}
