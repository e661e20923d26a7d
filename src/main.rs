//! Air Hockey headless entry point
//!
//! Runs an attract-mode match: a scripted bot holds the player mallet, the
//! built-in opponent plays the other side, and every frame is stepped
//! without rendering. Usage: `air-hockey [seed] [progress-file]`.

use std::path::PathBuf;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use air_hockey::audio::{AudioManager, LogSink};
use air_hockey::persistence::JsonFileStore;
use air_hockey::sim::{Board, GameEvent, MatchPhase, Side, SimulationContext, TickInput};
use air_hockey::{Session, Settings};

/// Nominal frame length used to fake the host clock
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Player-side bot: chases the puck and swings through it toward the far goal
struct AttractBot {
    rng: Pcg32,
    aim_offset: f32,
}

impl AttractBot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            aim_offset: 0.0,
        }
    }

    fn target(&mut self, ctx: &SimulationContext) -> Vec2 {
        let puck = ctx.puck.pos;
        let home = ctx.board.mallet_home(Side::Player);

        // Re-roll the aim now and then so rallies don't loop forever
        if ctx.frame % 45 == 0 {
            self.aim_offset = self.rng.random_range(-0.6..0.6);
        }

        if puck.y < 0.0 {
            // Puck in the other half: guard the goal mouth
            Vec2::new(puck.x * 0.5, home.y + 2.0)
        } else {
            // Come from behind the puck so the hit points up the table
            let behind = Vec2::new(puck.x + self.aim_offset, puck.y + ctx.board.mallet_radius);
            let current = ctx.player.pos();
            current + (behind - current) * 0.3
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings_path = PathBuf::from("air_hockey_settings.json");
    let settings = Settings::load(&settings_path);

    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(settings.attract_seed);
    let store_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("air_hockey_progress.json"));

    log::info!("Attract mode: seed {}, progress file {}", seed, store_path.display());

    let mut session = Session::new(
        Board::default(),
        settings.tuning,
        JsonFileStore::new(store_path),
    );
    let mut audio = AudioManager::new(LogSink::default());
    settings.apply_audio(&mut audio);
    let mut bot = AttractBot::new(seed);

    let mut now_ms = 0.0;
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };
    let mut hits = 0u32;

    for _ in 0..settings.attract_max_frames {
        input.now_ms = now_ms;
        input.player_target = Some(bot.target(session.context()));

        let events = session.step(&input);
        input.start = false;
        audio.play_events(&events);

        for event in &events {
            match event {
                GameEvent::MalletHit { .. } => hits += 1,
                GameEvent::Goal { scorer, score } => {
                    log::info!("GOAL {:?}! {} : {}", scorer, score.player, score.opponent);
                }
                GameEvent::MatchOver {
                    outcome,
                    score,
                    duration_secs,
                    games_played,
                } => {
                    println!(
                        "{:?} {} : {} in {}s ({} hits, {} games played)",
                        outcome, score.player, score.opponent, duration_secs, hits, games_played
                    );
                }
                _ => {}
            }
        }

        if session.context().phase() == MatchPhase::GameOver {
            break;
        }
        now_ms += FRAME_MS;
    }

    if session.context().phase() != MatchPhase::GameOver {
        let score = session.context().score;
        println!(
            "Frame cap reached at {} : {} ({} hits)",
            score.player, score.opponent, hits
        );
    }
    log::debug!("{} sound cues played", audio.sink().played);
}
