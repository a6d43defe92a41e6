//! Hexfall headless driver
//!
//! Runs a session on a simulated frame clock, logs what happens, and prints
//! the final ring. Rendering and audio backends plug in at the same seams:
//! read `GameState::snapshot()` each frame and feed events to `audio::cues`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use hexfall::audio;
use hexfall::consts::*;
use hexfall::sim::{GameEvent, GameState, RotateDir, Snapshot, TickInput, tick};
use hexfall::{Settings, SettingsError};

/// Simulated display refresh
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Debug, Parser)]
#[command(name = "hexfall", version, about = "Headless hexfall session runner")]
struct Cli {
    /// Settings JSON file (defaults are used when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Turn the ring after this many spawns (0 = never)
    #[arg(long, default_value_t = 2)]
    rotate_every: u32,

    /// Write the final session as JSON
    #[arg(long)]
    dump: Option<PathBuf>,
}

/// Session plus frame-clock bookkeeping
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    spawns: u32,
    turns: u32,
}

impl Game {
    fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
            spawns: 0,
            turns: 0,
        }
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32, rotate_every: u32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            let events = tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.rotate = None;
            self.input.spawn = false;

            self.handle_events(&events, rotate_every);
        }
    }

    fn handle_events(&mut self, events: &[GameEvent], rotate_every: u32) {
        for event in events {
            log::debug!("{:?}", event);
            if let GameEvent::Spawned { .. } = event {
                self.spawns += 1;
                if rotate_every > 0 && self.spawns.is_multiple_of(rotate_every) {
                    // Alternate pairs of turns so the board keeps shuffling
                    self.turns += 1;
                    self.input.rotate = Some(if self.turns % 4 < 2 {
                        RotateDir::Right
                    } else {
                        RotateDir::Left
                    });
                }
            }
        }
        for cue in audio::cues(events) {
            log::trace!("cue {:?}", cue);
        }
    }
}

/// Text view of a snapshot: one line per depth, rim at the top
fn render_ascii(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let rows: Vec<_> = snapshot.grid.rows().collect();
    for (depth, row) in rows.iter().enumerate().rev() {
        out.push_str(&format!("{depth:>2} |"));
        for cell in row.iter() {
            out.push(' ');
            out.push(cell.map_or('.', |c| c.glyph()));
        }
        out.push('\n');
    }
    out.push_str("   +");
    out.push_str(&"--".repeat(SPOKES));
    out.push('\n');
    out.push_str("    ");
    for spoke in 0..SPOKES {
        out.push_str(&format!(" {spoke}"));
    }
    out.push('\n');
    out
}

fn run(cli: &Cli) -> Result<(), SettingsError> {
    let settings = Settings::load_or_default(cli.settings.as_deref())?;
    let state = GameState::with_settings(settings, cli.seed)?;
    let mut game = Game::new(state);

    log::info!("Hexfall (headless) starting with seed {}", cli.seed);

    let frames = (cli.seconds.max(0.0) / FRAME_DT).ceil() as u64;
    for _ in 0..frames {
        game.update(FRAME_DT, cli.rotate_every);
        if game.state.is_lost() {
            break;
        }
    }

    let snapshot = game.state.snapshot();
    println!("{}", render_ascii(&snapshot));
    println!(
        "phase: {:?}, ticks: {}, spawned: {}, in flight: {}, settled: {}",
        snapshot.phase,
        game.state.time_ticks,
        game.spawns,
        snapshot.falling.len(),
        snapshot.grid.occupied()
    );

    if let Some(path) = &cli.dump {
        let json = game.state.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Session written to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("hexfall: {e}");
            ExitCode::FAILURE
        }
    }
}
