use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Demux an flv stream and report every tag", long_about)]
pub(crate) struct AppCli {
  /// flv file to read, `-` for stdin
  #[arg(value_name = "INPUT", default_value = "-")]
  pub(crate) input: String,
  #[arg(short, long, value_name = "CONFIG_FILE")]
  pub(crate) config: Option<PathBuf>,
  #[arg(long, value_name = "LOG_LEVEL")]
  pub(crate) log_level: Option<String>,
  #[arg(long, value_name = "MAX_TAGS")]
  pub(crate) max_tags: Option<u64>,
  /// how many payload bytes to dump per tag
  #[arg(long, value_name = "BYTES")]
  pub(crate) payload_preview: Option<usize>,
}
