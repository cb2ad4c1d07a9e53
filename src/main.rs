use clap::{Parser, Subcommand};
use runplot::config::{Config, NormalizeMode};
use runplot_charts::Theme;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runplot", about = "runplot: HTML reports for load-test logs and metrics")]
struct Cli {
    /// TOML file layered over the built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(long, global = true)]
    debug: bool,

    /// Reject log lines that do not match the service log grammar.
    #[arg(long, global = true)]
    strict: bool,

    #[arg(long, global = true)]
    raw_logs: Option<PathBuf>,
    #[arg(long, global = true)]
    prepared_logs: Option<PathBuf>,
    #[arg(long, global = true)]
    metrics: Option<PathBuf>,
    #[arg(long, global = true)]
    log_report: Option<PathBuf>,
    #[arg(long, global = true)]
    metrics_report: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy, Default)]
enum Command {
    /// Normalize logs, then write both reports.
    #[default]
    All,
    /// Only rewrite the raw logs into the prepared table.
    Normalize,
    /// Normalize logs and write the log report.
    Logs,
    /// Write the metrics report.
    Metrics,
}

impl Cli {
    fn apply(&self, cfg: &mut Config) {
        if self.strict {
            cfg.normalizer.mode = NormalizeMode::Strict;
        }
        let overrides = [
            (&self.raw_logs, &mut cfg.paths.raw_logs),
            (&self.prepared_logs, &mut cfg.paths.prepared_logs),
            (&self.metrics, &mut cfg.paths.metrics),
            (&self.log_report, &mut cfg.paths.log_report),
            (&self.metrics_report, &mut cfg.paths.metrics_report),
        ];
        for (flag, slot) in overrides {
            if let Some(path) = flag {
                *slot = path.clone();
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut cfg = Config::load(cli.config.as_deref())?;
    cli.apply(&mut cfg);
    let theme = Theme::load_default();

    match cli.command.unwrap_or_default() {
        Command::All => runplot::run_all(&cfg, &theme)?,
        Command::Normalize => {
            runplot::run_normalizer(&cfg)?;
        }
        Command::Logs => {
            runplot::run_log_pipeline(&cfg, &theme)?;
        }
        Command::Metrics => {
            runplot::run_metrics_pipeline(&cfg, &theme)?;
        }
    }
    Ok(())
}
