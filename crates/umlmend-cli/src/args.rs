//! Command-line argument definitions for the Umlmend CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input and output locations, configuration
//! file selection, the repair budget, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Umlmend diagram healer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the generated text, or `-` for standard input
    #[arg(help = "Path to the input file, or - for stdin")]
    pub input: String,

    /// Directory receiving the healed diagrams and the manifest
    #[arg(short, long, default_value = "diagrams")]
    pub output_dir: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Repair attempts per fragment, overriding the configuration file
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub max_attempts: Option<u8>,

    /// Also write the input text with all diagram fragments removed
    #[arg(long)]
    pub prose: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["umlmend", "answer.md"]).unwrap();

        assert_eq!(args.input, "answer.md");
        assert_eq!(args.output_dir, "diagrams");
        assert_eq!(args.max_attempts, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_max_attempts_range() {
        let args = Args::try_parse_from(["umlmend", "-", "--max-attempts", "2"]).unwrap();
        assert_eq!(args.max_attempts, Some(2));

        assert!(Args::try_parse_from(["umlmend", "-", "--max-attempts", "4"]).is_err());
    }
}
