//! Command-line interface types

use clap::Parser;
use std::path::PathBuf;

/// Valet - a personal assistant that plans and runs actions for you
#[derive(Parser, Debug)]
#[command(name = "vt", version, about)]
pub struct Cli {
    /// The goal to accomplish, in plain language
    #[arg(required = true)]
    pub goal: Vec<String>,

    /// Path to a config file (defaults to .valet.yml, then ~/.config/valet/valet.yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the per-step execution records after the reply
    #[arg(long)]
    pub show_steps: bool,
}

impl Cli {
    /// The goal words joined into one sentence
    pub fn goal_text(&self) -> String {
        self.goal.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_goal_words() {
        let cli = Cli::parse_from(["vt", "create", "a", "dinner", "event"]);
        assert_eq!(cli.goal_text(), "create a dinner event");
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["vt", "--verbose", "--show-steps", "-c", "my.yml", "do", "things"]);
        assert!(cli.verbose);
        assert!(cli.show_steps);
        assert_eq!(cli.config, Some(PathBuf::from("my.yml")));
    }

    #[test]
    fn test_goal_is_required() {
        assert!(Cli::try_parse_from(["vt"]).is_err());
    }
}
