use std::str::FromStr;

use pitchside_core::{format_clock, AdminSession, MatchStatus, MatchStore, Side};
use tokio::sync::mpsc;

use crate::commands::common::parse_match_id;
use crate::error::CliError;

pub const ADMIN_HELP: &str = "\
Commands:
  first-half | halftime | second-half | finish   change match status
  +local | -local | +away | -away                adjust score by one
  score <local|away> <delta>                     adjust score by delta
  toggle | start | pause                         control the clock
  reset                                          reset the clock to 00:00
  show                                           print the scoreboard
  help                                           show this help
  quit                                           leave the console";

/// One line typed into the admin console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    Transition(MatchStatus),
    Score(Side, i64),
    Toggle,
    Start,
    Pause,
    Reset,
    Show,
    Help,
    Quit,
}

impl FromStr for AdminCommand {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim().to_ascii_lowercase();
        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            return Err("empty command".to_string());
        };

        let parsed = match command {
            "first-half" | "kickoff" => Self::Transition(MatchStatus::FirstHalf),
            "halftime" | "half-time" => Self::Transition(MatchStatus::Halftime),
            "second-half" => Self::Transition(MatchStatus::SecondHalf),
            "finish" | "full-time" => Self::Transition(MatchStatus::Finished),
            "status" => {
                let status = words
                    .next()
                    .ok_or_else(|| "usage: status <status>".to_string())?;
                Self::Transition(status.parse()?)
            }
            "score" => {
                let (Some(side), Some(delta)) = (words.next(), words.next()) else {
                    return Err("usage: score <local|away> <delta>".to_string());
                };
                let delta = delta
                    .trim_start_matches('+')
                    .parse::<i64>()
                    .map_err(|_| format!("invalid score delta '{delta}'"))?;
                Self::Score(side.parse()?, delta)
            }
            "toggle" => Self::Toggle,
            "start" | "resume" => Self::Start,
            "pause" | "stop" => Self::Pause,
            "reset" => Self::Reset,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                if let Some(side) = other.strip_prefix('+') {
                    Self::Score(side.parse()?, 1)
                } else if let Some(side) = other.strip_prefix('-') {
                    Self::Score(side.parse()?, -1)
                } else {
                    return Err(format!("unknown command '{other}' (type 'help')"));
                }
            }
        };

        if let Some(extra) = words.next() {
            return Err(format!("unexpected argument '{extra}'"));
        }
        Ok(parsed)
    }
}

/// Apply one console command to the session.
pub async fn apply_admin_command<S: MatchStore>(
    session: &mut AdminSession<S>,
    command: AdminCommand,
) -> pitchside_core::Result<()> {
    match command {
        AdminCommand::Transition(status) => {
            session.transition(status).await?;
        }
        AdminCommand::Score(side, delta) => {
            session.adjust_score(side, delta).await?;
        }
        AdminCommand::Toggle => {
            session.toggle_clock().await?;
        }
        AdminCommand::Start => {
            session.start_clock().await?;
        }
        AdminCommand::Pause => {
            session.pause_clock().await?;
        }
        AdminCommand::Reset => {
            session.reset_clock().await?;
        }
        AdminCommand::Show | AdminCommand::Help | AdminCommand::Quit => {}
    }
    Ok(())
}

pub async fn run_admin<S: MatchStore>(store: S, id: &str, pin: &str) -> Result<(), CliError> {
    let id = parse_match_id(id)?;
    let mut session = AdminSession::unlock(store, &id, pin).await?;
    let ticker = session.spawn_ticker();

    println!("{}", admin_line(&session));
    println!("Type 'help' for commands.");

    let mut lines = spawn_line_reader();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let line = tokio::select! {
            line = lines.recv() => line,
            _ = &mut ctrl_c => None,
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<AdminCommand>() {
            Ok(AdminCommand::Quit) => break,
            Ok(AdminCommand::Help) => println!("{ADMIN_HELP}"),
            Ok(command) => match apply_admin_command(&mut session, command).await {
                Ok(()) => {
                    tracing::debug!(match_id = %id, ?command, "Applied admin command");
                    println!("{}", admin_line(&session));
                }
                Err(error) => {
                    tracing::debug!(match_id = %id, ?command, "Admin command rejected: {}", error);
                    eprintln!("Error: {error}");
                }
            },
            Err(message) => eprintln!("{message}"),
        }
    }

    ticker.stop().await;
    tracing::info!(match_id = %id, "Admin session closed");
    Ok(())
}

/// Forward stdin lines from a detached thread so a pending read never holds
/// up shutdown.
fn spawn_line_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Scorer's line: the clock is always shown, since it can run outside a half.
pub fn admin_line<S: MatchStore>(session: &AdminSession<S>) -> String {
    let view = session.public_view();
    let running = if view.timer_running { "running" } else { "stopped" };
    format!(
        "{:<10} {}  {}  [{running}]",
        view.status.label(),
        format_clock(view.timer_seconds),
        view.scoreline()
    )
}
