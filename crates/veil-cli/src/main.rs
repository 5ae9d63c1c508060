//! Veil CLI - Run and inspect the overlay without a display

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{controls, defaults, run};

#[derive(Parser)]
#[command(name = "veil")]
#[command(about = "Ambient smoke, orbs and camera parallax overlay", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the overlay headless and print a summary of the final frame
    Run {
        /// Path to a TOML config file; missing keys keep their defaults
        #[arg(short, long)]
        config: Option<String>,

        /// Number of frames to simulate
        #[arg(long, default_value = "600")]
        frames: u64,

        /// Simulated display refresh rate
        #[arg(long, default_value = "60")]
        fps: f64,

        /// RNG seed, overriding the config file
        #[arg(long)]
        seed: Option<u64>,

        /// Control edits applied before the first frame (e.g. "parallax=6")
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the default configuration as TOML
    Defaults,

    /// List the control panel's inputs
    Controls {
        /// Path to a TOML config file used for current values
        #[arg(short, long)]
        config: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected id=value, got '{}'", s))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing control id in '{}'", s));
    }
    Ok((id.to_string(), value.trim().to_string()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            frames,
            fps,
            seed,
            set,
            format,
        } => run::run(run::RunArgs {
            config,
            frames,
            fps,
            seed,
            set,
            format,
        }),
        Commands::Defaults => defaults::run(),
        Commands::Controls { config, format } => controls::run(config.as_deref(), &format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("fogColor=#ff0000").unwrap(),
            ("fogColor".to_string(), "#ff0000".to_string())
        );
        assert_eq!(
            parse_assignment(" trailLen = 20 ").unwrap(),
            ("trailLen".to_string(), "20".to_string())
        );
    }

    #[test]
    fn assignment_requires_id_and_equals() {
        assert!(parse_assignment("parallax").is_err());
        assert!(parse_assignment("=3").is_err());
    }

    #[test]
    fn cli_parses_run_arguments() {
        let cli = Cli::try_parse_from([
            "veil", "run", "--frames", "10", "--set", "parallax=4", "--format", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                frames, set, format, ..
            } => {
                assert_eq!(frames, 10);
                assert_eq!(set, vec![("parallax".to_string(), "4".to_string())]);
                assert_eq!(format, "json");
            }
            _ => panic!("expected run"),
        }
    }
}
