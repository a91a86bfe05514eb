//! The `lumos telemetry` command for inspecting the event log.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::path::Path;

use clap::{Args, Subcommand};
use lumos_core::Config;

/// Arguments for the `telemetry` command.
#[derive(Args, Debug)]
pub struct TelemetryArgs {
    #[command(subcommand)]
    pub command: TelemetryCommand,
}

/// Subcommands for the event log.
#[derive(Subcommand, Debug)]
pub enum TelemetryCommand {
    /// Show the event log path
    Path,

    /// Print the most recent events
    Tail {
        /// Number of events to print
        #[arg(short = 'n', long, default_value = "20")]
        lines: usize,
    },
}

/// Execute the telemetry command.
pub fn execute(args: TelemetryArgs, config: &Config) -> anyhow::Result<()> {
    let Some(path) = config.telemetry_log_path() else {
        anyhow::bail!("Telemetry is disabled in the config ([telemetry].enabled = false)");
    };

    match args.command {
        TelemetryCommand::Path => println!("{}", path.display()),

        TelemetryCommand::Tail { lines } => {
            if !path.exists() {
                tracing::info!("No events recorded yet at {}", path.display());
                return Ok(());
            }
            for line in tail(&path, lines)? {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Last `count` lines of `path`.
fn tail(path: &Path, count: usize) -> anyhow::Result<Vec<String>> {
    let reader = BufReader::new(std::fs::File::open(path)?);
    let mut window = VecDeque::with_capacity(count);
    for line in reader.lines() {
        let line = line?;
        if count == 0 {
            continue;
        }
        if window.len() == count {
            window.pop_front();
        }
        window.push_back(line);
    }
    Ok(window.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_log(lines: &[&str]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        std::fs::write(&path, lines.join("\n") + "\n").unwrap();
        (dir, path)
    }

    #[test]
    fn tail_keeps_last_lines() {
        let (_dir, path) = write_log(&["a", "b", "c", "d"]);
        assert_eq!(tail(&path, 2).unwrap(), ["c", "d"]);
    }

    #[test]
    fn tail_shorter_log() {
        let (_dir, path) = write_log(&["a"]);
        assert_eq!(tail(&path, 5).unwrap(), ["a"]);
    }

    #[test]
    fn tail_zero() {
        let (_dir, path) = write_log(&["a", "b"]);
        assert!(tail(&path, 0).unwrap().is_empty());
    }

    #[test]
    fn disabled_telemetry_is_an_error() {
        let mut config = Config::default();
        config.telemetry.enabled = false;
        let args = TelemetryArgs {
            command: TelemetryCommand::Path,
        };
        assert!(execute(args, &config).is_err());
    }
}
