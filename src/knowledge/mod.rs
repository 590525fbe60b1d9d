//! Knowledge document loading.
//!
//! The knowledge document is the single authoritative text the assistant is
//! allowed to answer from. It is read exactly once at startup and never
//! reloaded for the lifetime of the process.

use crate::error::{DestekError, Result};
use std::path::Path;

/// The immutable knowledge text loaded at startup.
#[derive(Debug, Clone)]
pub struct KnowledgeDocument {
    text: String,
}

impl KnowledgeDocument {
    /// Load the knowledge document from a UTF-8 text file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            DestekError::Knowledge(format!(
                "Failed to read knowledge file {}: {}",
                path.display(),
                e
            ))
        })?;

        if text.trim().is_empty() {
            return Err(DestekError::Knowledge(format!(
                "Knowledge file {} is empty",
                path.display()
            )));
        }

        Ok(Self { text })
    }

    /// Create a document from an in-memory string.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The full document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the document in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Paket A aylık 100 TL'dir.").unwrap();

        let doc = KnowledgeDocument::load(file.path()).unwrap();
        assert_eq!(doc.text(), "Paket A aylık 100 TL'dir.");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = KnowledgeDocument::load(Path::new("/nonexistent/bilgi.txt")).unwrap_err();
        assert!(matches!(err, DestekError::Knowledge(_)));
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = KnowledgeDocument::load(file.path()).unwrap_err();
        assert!(matches!(err, DestekError::Knowledge(_)));
    }
}
