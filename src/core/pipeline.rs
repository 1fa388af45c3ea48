use crate::core::csv_writer::{parse_envelope, CsvWriter};
use crate::core::fetcher::Fetcher;
use crate::core::{ConfigProvider, OrderTable, Pipeline, Storage, TransformResult};
use crate::utils::error::Result;

/// Fetches the envelope from the configured endpoint and writes it as CSV to
/// the configured output path.
pub struct ExportPipeline<S: Storage, C: ConfigProvider> {
    config: C,
    fetcher: Fetcher,
    writer: CsvWriter<S>,
}

impl<S: Storage, C: ConfigProvider> ExportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            config,
            fetcher: Fetcher::new(),
            writer: CsvWriter::new(storage),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ExportPipeline<S, C> {
    async fn extract(&self) -> Result<String> {
        self.fetcher.fetch(self.config.api_endpoint()).await
    }

    async fn transform(&self, raw: String) -> Result<TransformResult> {
        let result = parse_envelope(&raw)?;
        match &result {
            TransformResult::Table(table) => tracing::debug!(
                "Parsed {} records with columns: {}",
                table.records.len(),
                table.columns.join(",")
            ),
            TransformResult::NoData => tracing::debug!("Envelope carried no records"),
        }
        Ok(result)
    }

    async fn load(&self, table: OrderTable) -> Result<String> {
        let output_path = self.config.output_path();
        self.writer.write_table(&table, output_path)?;
        Ok(output_path.to_string())
    }
}
