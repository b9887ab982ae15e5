//! Terminal front-end: a human against the minimax engine, or two humans
//! sharing a keyboard.
//!
//! Usage: `play [--json] [config.toml]`

mod commands;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use game_core::Color;
use game_session::{
    ChessClock, GameConfig, GameObserver, GameSession, MoveReport, MoveStatus, Phase, Rejection,
    TerminationReason,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::{parse_command, Command, HELP};

const USAGE: &str = "usage: play [--json] [config.toml]";

struct Args {
    config: Option<PathBuf>,
    json: bool,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut out = Args {
            config: None,
            json: false,
        };
        for arg in args {
            match arg.as_str() {
                "--json" => out.json = true,
                flag if flag.starts_with('-') => bail!("unknown flag {flag}\n{USAGE}"),
                path => {
                    if out.config.replace(PathBuf::from(path)).is_some() {
                        bail!("only one config file may be given\n{USAGE}");
                    }
                }
            }
        }
        Ok(out)
    }
}

/// One line per applied move in `--json` mode.
#[derive(Serialize)]
struct MoveLine<'a> {
    ply: u32,
    color: Color,
    notation: &'a str,
    status: MoveStatus,
    fen: String,
}

#[derive(Serialize)]
struct GameOverLine {
    winner: Option<Color>,
    result: TerminationReason,
}

/// Reports games decided by the clock task, which nothing else prints.
struct FlagWatcher {
    json: bool,
}

impl GameObserver for FlagWatcher {
    fn on_game_over(&self, winner: Option<Color>, reason: TerminationReason) {
        if matches!(reason, TerminationReason::Timeout { .. }) {
            announce(self.json, winner, reason);
        }
    }
}

fn announce(json: bool, winner: Option<Color>, result: TerminationReason) {
    if json {
        match serde_json::to_string(&GameOverLine { winner, result }) {
            Ok(line) => println!("{line}"),
            Err(e) => debug!("serialize failed: {e}"),
        }
        return;
    }
    let text = match result {
        TerminationReason::Checkmate { winner } => format!("Checkmate, {winner} wins"),
        TerminationReason::Stalemate => "Stalemate, draw".to_string(),
        TerminationReason::Resignation { winner } => format!("Resignation, {winner} wins"),
        TerminationReason::Timeout { winner } => format!("Time out, {winner} wins"),
        TerminationReason::Corrupted => "Game aborted: board is corrupted".to_string(),
    };
    println!("{text}");
}

struct Frontend {
    session: GameSession,
    json: bool,
}

impl Frontend {
    fn print_board(&self) {
        if self.json {
            return;
        }
        let state = self.session.state();
        println!("{}", state.position());
        let config = self.session.config();
        if !config.time_settings().is_unlimited() {
            println!(
                "White {}  Black {}",
                ChessClock::format_time(self.session.remaining_time(Color::White)),
                ChessClock::format_time(self.session.remaining_time(Color::Black)),
            );
        }
    }

    /// Print the moves in `reports`, which end at the current ply.
    fn print_reports(&self, reports: &[MoveReport]) {
        let last_ply = self.session.state().move_count();
        let first_ply = last_ply + 1 - reports.len() as u32;
        for (ply, report) in (first_ply..).zip(reports) {
            let Some(record) = &report.applied else {
                continue;
            };
            let color = record.mv.piece.color;
            if self.json {
                let line = MoveLine {
                    ply,
                    color,
                    notation: &record.notation,
                    status: report.status,
                    fen: report.position.to_fen(),
                };
                match serde_json::to_string(&line) {
                    Ok(line) => println!("{line}"),
                    Err(e) => debug!("serialize failed: {e}"),
                }
                continue;
            }
            let suffix = match report.status {
                MoveStatus::Check => "+",
                MoveStatus::Checkmate => "#",
                _ => "",
            };
            println!("{ply:>3}. {color} {}{suffix}", record.notation);
        }

        if let Some(last) = reports.last() {
            match (last.status, self.session.state().phase()) {
                (MoveStatus::Checkmate | MoveStatus::Stalemate, Phase::Terminated(reason)) => {
                    announce(self.json, reason.winner(), reason);
                }
                (MoveStatus::PromotionPending, _) if !self.json => {
                    println!("Promote to? (q, r, b, n)");
                }
                _ => {}
            }
        }
    }

    fn reject(&self, err: impl std::fmt::Display) {
        if self.json {
            println!("{}", serde_json::json!({ "error": err.to_string() }));
        } else {
            println!("{err}");
        }
    }

    async fn engine_turns(&self) {
        match self.session.play_engine_turns().await {
            Ok(reports) => {
                if !reports.is_empty() {
                    self.print_reports(&reports);
                    self.print_board();
                }
            }
            Err(Rejection::Cancelled | Rejection::GameOver | Rejection::Paused) => {}
            Err(e) => self.reject(e),
        }
    }

    fn human_color(&self) -> Color {
        let config = self.session.config();
        if config.ai_enabled {
            config.ai_color.other()
        } else {
            self.session.state().side_to_move()
        }
    }

    /// Take back one move, or two against the engine so the human is on
    /// move again.
    fn undo(&self) {
        match self.session.undo() {
            Ok(None) => self.reject("nothing to undo"),
            Ok(Some(_)) => {
                if self.session.engine_to_move() {
                    if let Err(e) = self.session.undo() {
                        debug!("second take-back refused: {e}");
                    }
                }
                self.print_board();
            }
            Err(e) => self.reject(e),
        }
    }

    /// Returns false once the user asked to leave.
    fn handle(&self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => return false,
            Command::Help => println!("{HELP}"),
            Command::Board => self.print_board(),
            Command::New => {
                self.session.restart();
                self.print_board();
            }
            Command::Pause => {
                if !self.session.pause() {
                    self.reject("nothing to pause");
                }
            }
            Command::Resume => {
                if !self.session.resume() {
                    self.reject("not paused");
                }
            }
            Command::Undo => self.undo(),
            Command::Resign => match self.session.resign(self.human_color()) {
                Ok(reason) => announce(self.json, reason.winner(), reason),
                Err(e) => self.reject(e),
            },
            Command::Moves(from) => {
                let targets: Vec<String> = self
                    .session
                    .legal_moves(from)
                    .iter()
                    .map(game_core::move_notation)
                    .collect();
                if self.json {
                    println!("{}", serde_json::json!({ "from": from.to_string(), "moves": targets }));
                } else if targets.is_empty() {
                    println!("no legal moves from {from}");
                } else {
                    println!("{}", targets.join(" "));
                }
            }
            Command::Move {
                from,
                to,
                promotion,
            } => match self.session.submit_move(from, to, promotion) {
                Ok(report) => {
                    self.print_reports(std::slice::from_ref(&report));
                    if report.applied.is_some() {
                        self.print_board();
                    }
                }
                Err(e) => self.reject(e),
            },
            Command::Promote(kind) => match self.session.complete_promotion(kind) {
                Ok(report) => {
                    self.print_reports(std::slice::from_ref(&report));
                    self.print_board();
                }
                Err(e) => self.reject(e),
            },
        }
        true
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    let config = load_config(&args)?;
    info!(?config, json = args.json, "starting");

    let session = GameSession::new(config.clone());
    session.add_observer(Arc::new(FlagWatcher { json: args.json }));
    session.new_game(config);
    let clock = session.spawn_clock(Duration::from_millis(100));

    let front = Frontend {
        session,
        json: args.json,
    };
    if !front.json {
        println!("Type `help` for commands.");
    }
    front.print_board();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    front.engine_turns().await;
    if !front.json {
        print!("> ");
        stdout.flush().ok();
    }

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if !line.trim().is_empty() {
            match parse_command(&line) {
                Ok(cmd) => {
                    if !front.handle(cmd) {
                        break;
                    }
                    front.engine_turns().await;
                }
                Err(e) => front.reject(e),
            }
        }
        if !front.json {
            print!("> ");
        }
        stdout.flush().ok();
    }

    clock.abort();
    Ok(())
}
