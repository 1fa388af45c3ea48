pub mod csv_writer;
pub mod etl;
pub mod fetcher;
pub mod pipeline;

pub use crate::domain::model::{OrderTable, Record, RunOutcome, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
