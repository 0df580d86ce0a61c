mod tally;
mod tui;

use anyhow::Result;
use clap::Parser;

use crate::tally::store::{TallyOption, TallyStore};

#[derive(Parser)]
#[command(name = "tally", about = "An interactive terminal tally board")]
struct Cli {
    /// Skip the startup loading screen
    #[arg(long)]
    no_splash: bool,
    /// Seed option as `name` or `name:notes`; repeat to replace the built-in
    /// list
    #[arg(long = "option", value_name = "NAME[:NOTES]", value_parser = parse_option)]
    options: Vec<TallyOption>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = if cli.options.is_empty() {
        TallyStore::seeded()
    } else {
        TallyStore::new(cli.options)
    };
    tui::board::run(store, cli.no_splash)
}

fn parse_option(spec: &str) -> Result<TallyOption, String> {
    let (name, notes) = match spec.split_once(':') {
        Some((name, notes)) => (name.trim(), notes.trim()),
        None => (spec.trim(), ""),
    };
    if name.is_empty() {
        return Err("option name must not be blank".to_string());
    }
    Ok(TallyOption::new(name, notes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_without_flags() {
        let cli = Cli::try_parse_from(["tally"]).expect("bare invocation should parse");
        assert!(!cli.no_splash);
        assert!(cli.options.is_empty());
    }

    #[test]
    fn option_flag_repeats() {
        let cli = Cli::try_parse_from([
            "tally",
            "--option",
            "A:first candidate",
            "--option",
            "B",
            "--no-splash",
        ])
        .expect("repeated --option should parse");
        assert!(cli.no_splash);
        assert_eq!(cli.options.len(), 2);
    }

    #[test]
    fn option_spec_splits_name_and_notes() {
        let parsed = parse_option("A: first candidate ").expect("named spec should parse");
        assert_eq!(parsed.name, "A");
        assert_eq!(parsed.notes, "first candidate");
        assert_eq!(parsed.counter, 0);

        let bare = parse_option("B").expect("bare name should parse");
        assert_eq!(bare.name, "B");
        assert_eq!(bare.notes, "");
    }

    #[test]
    fn blank_option_specs_are_rejected() {
        assert!(parse_option("").is_err());
        assert!(parse_option("   ").is_err());
        assert!(parse_option(":").is_err());
        assert!(parse_option(" : notes only").is_err());

        let parsed = Cli::try_parse_from(["tally", "--option", ":"]);
        assert!(
            parsed.is_err(),
            "a nameless seed option must fail CLI parsing"
        );
    }
}
