//! Skyclimb headless runner
//!
//! Drives the simulation with a scripted input pattern and prints the
//! resulting statistics record as JSON.
//!
//! Usage: `skyclimb [seed] [ticks] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use skyclimb::consts::SIM_DT;
    use skyclimb::sim::{GameEvent, GameState, tick};
    use skyclimb::{Settings, Statistics};

    env_logger::init();
    log::info!("Skyclimb (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(12345);
    let ticks: u64 = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(60 * 60);
    let settings = match args.next() {
        Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
        None => Settings::default(),
    };

    let mut state = GameState::new(seed, settings, Statistics::new());

    for i in 0..ticks {
        let input = scripted_input(i, state.phase);
        tick(&mut state, &input, SIM_DT)?;

        for event in &state.events {
            match event {
                GameEvent::Jumped => log::debug!("tick {}: jump at {:?}", i, state.player.pos()),
                GameEvent::Died {
                    cause,
                    new_highscore,
                } => log::info!(
                    "tick {}: died ({:?}), new highscore: {}",
                    i,
                    cause,
                    new_highscore
                ),
            }
        }
    }

    log::info!(
        "Finished {} ticks, current score {}, {} platform(s) live",
        ticks,
        state.stats.score,
        state.platforms.platforms().len()
    );
    println!("{}", state.stats.to_json()?);
    Ok(())
}

/// Walk back and forth, hop regularly, restart after every death
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(tick: u64, phase: skyclimb::sim::GamePhase) -> skyclimb::sim::TickInput {
    use skyclimb::sim::{GamePhase, TickInput};

    if phase == GamePhase::Ended {
        return TickInput {
            restart: true,
            ..Default::default()
        };
    }

    TickInput {
        horizontal: if (tick / 180) % 2 == 0 { 1 } else { -1 },
        jump: tick % 45 < 20,
        ..Default::default()
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No wasm host; the library is embedded by the page's own renderer
}
