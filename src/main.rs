use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flank_five::ai::{Agent, GreedyAgent, Heuristic, HumanAgent, RandomAgent, ViabilityHeuristic};
use flank_five::config::{AgentKind, AppConfig};
use flank_five::game::{save, GameOutcome, GameState, LoggingObserver, Player};
use flank_five::play::play_match;

/// Gravity-drop five-in-a-row with a Reversi-style flank rule.
#[derive(Parser)]
#[command(name = "flank-five", about = "Play and analyse Flank Five games")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "flank_five.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a match in the terminal
    Play {
        /// Override who plays Black
        #[arg(long, value_enum)]
        black: Option<AgentKind>,

        /// Override who plays White
        #[arg(long, value_enum)]
        white: Option<AgentKind>,

        /// Seed for random agents
        #[arg(long)]
        seed: Option<u64>,

        /// Start from a saved position instead of an empty board
        #[arg(long)]
        load: Option<PathBuf>,

        /// Write the final position in the save format
        #[arg(long)]
        save: Option<PathBuf>,

        /// Write the match record as JSON
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Print a saved position and its possible moves
    Show { file: PathBuf },

    /// Score a saved position with the viability heuristic
    Eval {
        file: PathBuf,

        /// Player the score is reported for
        #[arg(long, value_enum, default_value = "black")]
        target: Side,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as TOML
    DefaultConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Player {
    fn from(side: Side) -> Player {
        match side {
            Side::Black => Player::Black,
            Side::White => Player::White,
        }
    }
}

#[derive(Serialize)]
struct EvalReport {
    target: Player,
    score: f64,
    to_move: Option<Player>,
    outcome: Option<GameOutcome>,
    possible_moves: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    init_logging(&config.logging.filter);

    match cli.command {
        Command::Play {
            black,
            white,
            seed,
            load,
            save,
            record,
        } => {
            let mut players = config.players.clone();
            if let Some(kind) = black {
                players.black = kind;
            }
            if let Some(kind) = white {
                players.white = kind;
            }
            if seed.is_some() {
                players.seed = seed;
            }

            let mut state = match &load {
                Some(path) => read_state(path)?,
                None => GameState::initial(),
            };
            run_play(
                &mut state,
                build_agent(players.black, players.seed),
                build_agent(players.white, players.seed.map(|s| s.wrapping_add(1))),
                save.as_deref(),
                record.as_deref(),
            )
        }
        Command::Show { file } => {
            let state = read_state(&file)?;
            print!("{state}");
            let moves: Vec<String> = state.possible_moves().iter().map(|m| m.to_string()).collect();
            if moves.is_empty() {
                println!("No possible moves.");
            } else {
                println!("Possible moves: {}", moves.join(" "));
            }
            Ok(())
        }
        Command::Eval { file, target, json } => {
            let state = read_state(&file)?;
            let target = Player::from(target);
            let report = EvalReport {
                target,
                score: ViabilityHeuristic::new(target).evaluate(&state),
                to_move: state.current_player(),
                outcome: state.outcome(),
                possible_moves: state.possible_moves().len(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{:.6} for {}", report.score, report.target);
            }
            Ok(())
        }
        Command::DefaultConfig => {
            print!("{}", AppConfig::default_toml().context("serializing default config")?);
            Ok(())
        }
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_state(path: &Path) -> Result<GameState> {
    save::load(path).with_context(|| format!("loading saved game from {}", path.display()))
}

fn build_agent(kind: AgentKind, seed: Option<u64>) -> Box<dyn Agent> {
    match kind {
        // One byte of local buffering, so two human agents can share stdin.
        AgentKind::Human => Box::new(HumanAgent::new(
            BufReader::with_capacity(1, io::stdin()),
            io::stdout(),
        )),
        AgentKind::Random => Box::new(seed.map_or_else(RandomAgent::new, RandomAgent::with_seed)),
        AgentKind::Greedy => Box::new(GreedyAgent),
    }
}

fn run_play(
    state: &mut GameState,
    mut black: Box<dyn Agent>,
    mut white: Box<dyn Agent>,
    save_path: Option<&Path>,
    record_path: Option<&Path>,
) -> Result<()> {
    state.subscribe(LoggingObserver::default());
    print!("{state}");

    let record = play_match(state, black.as_mut(), white.as_mut(), |s| print!("{s}"))
        .context("playing match")?;

    if record.outcome.is_none() {
        println!("Game abandoned after {} moves.", record.moves.len());
    }

    if let Some(path) = save_path {
        save::save(state, path).with_context(|| format!("saving game to {}", path.display()))?;
        info!(path = %path.display(), "saved final position");
    }
    if let Some(path) = record_path {
        let json = serde_json::to_string_pretty(&record).context("serializing match record")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing match record to {}", path.display()))?;
        info!(path = %path.display(), "wrote match record");
    }
    Ok(())
}
