pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_path, validate_url, Validate};

/// Northwind orders placed from 1997 onwards.
pub const DEFAULT_API_ENDPOINT: &str = "https://services.odata.org/V4/Northwind/Northwind.svc/Orders?$filter=OrderDate ge 1997-01-01T00:00:00Z&$format=json";

pub const DEFAULT_OUTPUT_PATH: &str = "orders.csv";

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "odata-csv"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Fetch an OData collection and save it as CSV")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_API_ENDPOINT))]
    pub api_endpoint: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_OUTPUT_PATH))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_file_path("output_path", &self.output_path)?;
        Ok(())
    }
}
