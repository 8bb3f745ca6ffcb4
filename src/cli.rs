//! Command-line parsing for the `arcade-tetris` binary.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::GAME_ID;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Leaderboard(LeaderboardArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardArgs {
    pub game: String,
    /// Overrides `ARCADE_LEADERBOARD_URL`
    pub url: Option<String>,
}

pub const USAGE: &str = "\
usage: arcade-tetris [play]
       arcade-tetris leaderboard [--game <id>] [--url <url>]

environment:
  ARCADE_LEADERBOARD_URL    leaderboard endpoint
  ARCADE_REPORT_DISABLED    1/true keeps scores in memory
  ARCADE_REPORT_TIMEOUT_MS  request timeout
  ARCADE_PLAYER             default player name
  ARCADE_SEED               piece sequence seed
  RUST_LOG                  log filter (stderr)";

/// Parse arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Play);
    };

    match first.as_str() {
        "play" => match args.get(1) {
            None => Ok(Command::Play),
            Some(other) => Err(anyhow!("play: unknown argument: {}", other)),
        },
        "-h" | "--help" | "help" => Ok(Command::Help),
        "leaderboard" => {
            let mut game = GAME_ID.to_string();
            let mut url = None;
            let mut i = 1usize;
            while i < args.len() {
                match args[i].as_str() {
                    "--game" => {
                        i += 1;
                        let v = args
                            .get(i)
                            .ok_or_else(|| anyhow!("leaderboard: missing value for --game"))?;
                        game = v.clone();
                    }
                    "--url" => {
                        i += 1;
                        let v = args
                            .get(i)
                            .ok_or_else(|| anyhow!("leaderboard: missing value for --url"))?;
                        url = Some(v.clone());
                    }
                    other => {
                        return Err(anyhow!("leaderboard: unknown argument: {}", other));
                    }
                }
                i += 1;
            }
            Ok(Command::Leaderboard(LeaderboardArgs { game, url }))
        }
        other => Err(anyhow!("unknown command: {}", other)),
    }
}

/// `ARCADE_SEED` if set, else the clock.
pub fn seed_from_env() -> Result<u64> {
    match std::env::var("ARCADE_SEED") {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| anyhow!("invalid ARCADE_SEED value: {}", raw)),
        Err(_) => Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_plays() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Play);
        assert_eq!(parse_args(&args(&["play"])).unwrap(), Command::Play);
    }

    #[test]
    fn leaderboard_defaults_to_this_game() {
        assert_eq!(
            parse_args(&args(&["leaderboard"])).unwrap(),
            Command::Leaderboard(LeaderboardArgs {
                game: "tetris".to_string(),
                url: None
            })
        );
    }

    #[test]
    fn leaderboard_flags() {
        let cmd = parse_args(&args(&[
            "leaderboard",
            "--game",
            "snake",
            "--url",
            "http://h:1/lb",
        ]))
        .unwrap();
        assert_eq!(
            cmd,
            Command::Leaderboard(LeaderboardArgs {
                game: "snake".to_string(),
                url: Some("http://h:1/lb".to_string())
            })
        );
    }

    #[test]
    fn errors() {
        assert!(parse_args(&args(&["leaderboard", "--game"])).is_err());
        assert!(parse_args(&args(&["leaderboard", "--bogus"])).is_err());
        assert!(parse_args(&args(&["dance"])).is_err());
        assert!(parse_args(&args(&["play", "now"])).is_err());
    }

    #[test]
    fn help() {
        assert_eq!(parse_args(&args(&["--help"])).unwrap(), Command::Help);
    }
}
