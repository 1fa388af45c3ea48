use crate::domain::model::{OrderTable, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::io::Write;

/// Where CSV output lands. `create` truncates any existing target.
pub trait Storage: Send + Sync {
    type Writer: Write;

    fn create(&self, path: &str) -> Result<Self::Writer>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<String>;
    async fn transform(&self, raw: String) -> Result<TransformResult>;
    async fn load(&self, table: OrderTable) -> Result<String>;
}
