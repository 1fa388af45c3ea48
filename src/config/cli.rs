use crate::core::Storage;
use crate::utils::error::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes to the local filesystem, relative to the current directory unless
/// the path is absolute.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    type Writer = BufWriter<File>;

    fn create(&self, path: &str) -> Result<BufWriter<File>> {
        let file = File::create(Path::new(path))?;
        Ok(BufWriter::new(file))
    }
}
