use std::{env, path::PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::{
    AppCli,
    errors::{AppError, AppResult},
    util::parse_log_level,
};

#[derive(Debug, Deserialize)]
pub(crate) struct Logger {
    pub(crate) level: String,
    /// Log to daily rolling files here instead of stderr.
    pub(crate) dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Probe {
    pub(crate) max_tags: Option<u64>,
    pub(crate) payload_preview: usize,
    pub(crate) stop_on_error: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppConfig {
    pub(crate) logger: Logger,
    pub(crate) probe: Probe,
}

impl AppConfig {
    pub(crate) fn new(config_path: Option<PathBuf>) -> AppResult<Self> {
        let config_path_composed =
            config_path.or_else(|| env::var("FLV_PROBE_CONFIG").ok().map(PathBuf::from));
        let mut builder = Config::builder()
            .set_default("logger.level", "info")?
            .set_default("probe.payload_preview", 0)?
            .set_default("probe.stop_on_error", true)?;
        if let Some(path) = config_path_composed {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("flv_probe")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub(crate) fn apply(&mut self, cli_args: &AppCli) {
        if let Some(level) = &cli_args.log_level {
            self.logger.level = level.clone();
        }

        if cli_args.max_tags.is_some() {
            self.probe.max_tags = cli_args.max_tags;
        }

        if let Some(preview) = cli_args.payload_preview {
            self.probe.payload_preview = preview;
        }
    }

    pub(crate) fn validate(&self) -> AppResult<()> {
        let _ = parse_log_level(&self.logger.level)?;

        if self
            .logger
            .dir
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            return Err(AppError::ConfigError(ConfigError::Message(
                "the log dir config is empty".to_owned(),
            )));
        }

        if self.probe.max_tags == Some(0) {
            return Err(AppError::ConfigError(ConfigError::Message(
                "max_tags must be positive when set".to_owned(),
            )));
        }

        Ok(())
    }
}
