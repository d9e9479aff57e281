//! Nova Strike headless runner
//!
//! Stands in for the windowing collaborator: drives the simulation at a
//! fixed 60 Hz with an autopilot, builds a draw list every frame and logs
//! how the run went.

use std::path::Path;

use nova_strike::consts::*;
use nova_strike::sim::{GamePhase, GameState, TickInput, TickOutcome, tick};
use nova_strike::{DrawList, Overlay, QualityPreset, Settings, Tuning};

/// Command-line options
struct Options {
    seed: u64,
    frames: u64,
    tuning_path: Option<String>,
    settings_path: Option<String>,
    font_path: Option<String>,
    quality: Option<QualityPreset>,
    dump: bool,
}

impl Options {
    fn parse() -> Self {
        let mut options = Options {
            seed: 0x5eed,
            frames: 60 * 120,
            tuning_path: None,
            settings_path: None,
            font_path: None,
            quality: None,
            dump: false,
        };

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(seed) => options.seed = seed,
                    None => log::warn!("--seed expects a number"),
                },
                "--frames" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(frames) => options.frames = frames,
                    None => log::warn!("--frames expects a number"),
                },
                "--tuning" => options.tuning_path = args.next(),
                "--settings" => options.settings_path = args.next(),
                "--font" => options.font_path = args.next(),
                "--quality" => match args.next().as_deref().and_then(QualityPreset::from_str) {
                    Some(quality) => options.quality = Some(quality),
                    None => log::warn!("--quality expects low, medium or high"),
                },
                "--dump" => options.dump = true,
                other => log::warn!("Ignoring unknown argument: {}", other),
            }
        }
        options
    }
}

/// Simple pilot: chase the lowest live enemy horizontally, dodge upward
/// when hurt, keep the trigger held, and press through menus
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    match state.phase {
        GamePhase::Menu => input.start = true,
        GamePhase::GameOver => input.acknowledge = true,
        GamePhase::Paused => input.resume = true,
        GamePhase::Playing => {
            input.shoot = true;

            let target = state
                .enemies
                .iter()
                .filter(|e| e.is_alive())
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
            if let Some(enemy) = target {
                let dx = enemy.pos.x - state.player.pos.x;
                input.left = dx < -8.0;
                input.right = dx > 8.0;
            }

            // Back off while low on health, otherwise drift toward the bottom
            if state.player.health < state.player.max_health / 3 {
                input.down = true;
            } else {
                input.up = state.player.pos.y > PLAYFIELD_HEIGHT - 60.0;
            }
        }
    }
    input
}

/// Read an optional config file; unreadable files fall back to defaults
fn read_config(path: Option<&str>) -> Option<String> {
    let path = path?;
    std::fs::read_to_string(path)
        .map_err(|e| log::warn!("Could not read {}: {}", path, e))
        .ok()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Nova Strike (headless) starting...");

    let options = Options::parse();

    let tuning_json = read_config(options.tuning_path.as_deref());
    let tuning = Tuning::load_or_default(tuning_json.as_deref());
    let settings_json = read_config(options.settings_path.as_deref());
    let mut settings = Settings::load_or_default(settings_json.as_deref());
    // A preset on the command line wins over the settings file
    if let Some(quality) = options.quality {
        settings.quality = quality;
    }

    // Asset availability is a plain flag; the UI degrades to placeholders
    let fonts_available = options
        .font_path
        .as_deref()
        .is_some_and(|path| Path::new(path).exists());
    if !fonts_available {
        log::warn!("Font unavailable, UI text will use placeholders");
    }

    let mut state = GameState::with_config(options.seed, tuning, settings);
    log::info!(
        "Seed {}, {} frames, {} quality",
        options.seed,
        options.frames,
        state.settings.quality.as_str()
    );

    let mut last_wave = 0;
    let mut sessions = 0u32;
    let mut best_score = 0u64;
    let mut last_frame = None;

    for frame in 0..=options.frames {
        // The run ends on an explicit exit signal, checked once per frame
        let input = if frame == options.frames {
            TickInput {
                exit: true,
                ..Default::default()
            }
        } else {
            autopilot(&state)
        };
        if input.start {
            sessions += 1;
            last_wave = 0;
        }

        if tick(&mut state, &input, FRAME_DT) == TickOutcome::ExitRequested {
            break;
        }

        let draw_list = DrawList::build(&state, fonts_available);
        if draw_list.hud.wave != last_wave && draw_list.show_hud() {
            last_wave = draw_list.hud.wave;
            log::info!(
                "Frame {}: wave {}, score {}, health {}",
                frame,
                draw_list.hud.wave,
                draw_list.hud.score,
                draw_list.hud.health
            );
        }
        if let Overlay::GameOver { final_score } = draw_list.overlay {
            best_score = best_score.max(final_score);
        }
        last_frame = Some(draw_list);
    }

    best_score = best_score.max(state.player.score);
    log::info!(
        "Done: {} session(s), best score {}, {} ticks simulated",
        sessions,
        best_score,
        state.time_ticks
    );

    if options.dump {
        if let Some(draw_list) = last_frame {
            match serde_json::to_string_pretty(&draw_list) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Could not serialize draw list: {}", e),
            }
        }
    }
}
