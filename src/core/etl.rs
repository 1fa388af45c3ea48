use crate::core::{Pipeline, RunOutcome, TransformResult};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs fetch, decode and write once, printing a status line per step.
    /// An error stops the run at the step that produced it.
    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting export");

        // Extract
        let raw_data = self.pipeline.extract().await?;
        println!("Data fetched successfully.");

        // Transform
        let table = match self.pipeline.transform(raw_data).await? {
            TransformResult::Table(table) => table,
            TransformResult::NoData => {
                println!("No data found.");
                return Ok(RunOutcome::NoData);
            }
        };
        let rows = table.records.len();
        tracing::info!("Transformed {} records", rows);

        // Load
        let path = self.pipeline.load(table).await?;
        println!("Data successfully saved to {}", path);

        Ok(RunOutcome::Saved { path, rows })
    }
}
