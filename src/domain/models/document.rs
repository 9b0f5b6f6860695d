use std::sync::Arc;

use anyhow::Result;

/// A file received from a multipart form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn is_empty(&self) -> bool {
        return self.bytes.is_empty();
    }
}

/// Turns an uploaded document into plain text. Implementations are
/// CPU-bound and get called from the blocking pool.
pub trait DocumentExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}

pub type DocumentExtractorBox = Arc<dyn DocumentExtractor + Send + Sync>;
