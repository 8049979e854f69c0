mod cli;
mod config;
mod errors;
mod probe;
mod util;

use std::{
    fs::File,
    io::{self, BufReader},
    process::ExitCode,
};

use clap::Parser;
use cli::AppCli;
use config::{AppConfig, Logger};
use errors::AppResult;
use time::macros::format_description;
use tracing::{self, Dispatch};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    self, EnvFilter,
    filter::LevelFilter,
    fmt::{time::LocalTime, writer::BoxMakeWriter},
};
use util::parse_log_level;

fn init_logger(logger: &Logger) -> AppResult<Option<WorkerGuard>> {
    let level = parse_log_level(&logger.level)?;
    let (writer, guard) = match &logger.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "flv_probe.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(io::stderr), None),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_timer(LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second] [unix_timestamp precision:nanosecond]"
        )))
        .compact()
        .with_ansi(logger.dir.is_none())
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(writer)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(level).into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .finish();
    tracing::dispatcher::set_global_default(Dispatch::new(subscriber))?;
    Ok(guard)
}

fn run(cli: AppCli) -> AppResult<()> {
    let mut config = AppConfig::new(cli.config.clone())?;
    config.apply(&cli);
    config.validate()?;
    let _guard = init_logger(&config.logger)?;

    tracing::info!("flv_probe is reading {}", cli.input);
    let summary = if cli.input == "-" {
        probe::probe(io::stdin().lock(), &config.probe)?
    } else {
        probe::probe(BufReader::new(File::open(&cli.input)?), &config.probe)?
    };
    if summary.failed {
        tracing::warn!("{} is damaged after tag #{}", cli.input, summary.messages);
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(AppCli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("flv_probe failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
