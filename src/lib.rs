pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig, DEFAULT_API_ENDPOINT, DEFAULT_OUTPUT_PATH};
pub use core::{etl::EtlEngine, fetcher::Fetcher, pipeline::ExportPipeline};
pub use domain::model::RunOutcome;
pub use utils::error::{EtlError, Result};
