use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::DatasetDef;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Source seam
// ---------------------------------------------------------------------------

/// Where dataset text comes from. Implementations do I/O only; parsing and
/// caching belong to the store.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self, def: &DatasetDef) -> Result<Vec<u8>, LoadError>;
}

/// Decode fetched bytes as UTF-8. The BOM, if any, is left for the parser.
pub fn decode(id: &str, bytes: Vec<u8>) -> Result<String, LoadError> {
    String::from_utf8(bytes).map_err(|source| LoadError::Decode {
        id: id.to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Directory source
// ---------------------------------------------------------------------------

/// Reads `<root>/<def.path>`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DatasetSource for DirectorySource {
    async fn fetch(&self, def: &DatasetDef) -> Result<Vec<u8>, LoadError> {
        let path = self.root.join(&def.path);
        log::debug!("reading {} for '{}'", path.display(), def.id);
        tokio::fs::read(&path).await.map_err(|source| LoadError::Io {
            id: def.id.clone(),
            path,
            source: Arc::new(source),
        })
    }
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// Serves dataset text from memory, keyed by dataset id.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    texts: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, text: impl Into<Vec<u8>>) -> Self {
        self.insert(id, text);
        self
    }

    pub fn insert(&mut self, id: &str, text: impl Into<Vec<u8>>) {
        self.texts.insert(id.to_string(), text.into());
    }
}

#[async_trait]
impl DatasetSource for MemorySource {
    async fn fetch(&self, def: &DatasetDef) -> Result<Vec<u8>, LoadError> {
        self.texts
            .get(&def.id)
            .cloned()
            .ok_or_else(|| LoadError::Missing { id: def.id.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, GAMES_ID, STANDINGS_ID};

    #[tokio::test]
    async fn directory_source_reads_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("games.csv"), "a\n1\n").unwrap();
        let cat = Catalog::default();

        let src = DirectorySource::new(dir.path());
        let bytes = src.fetch(cat.get(GAMES_ID).unwrap()).await.unwrap();
        assert_eq!(bytes, b"a\n1\n");

        let err = src.fetch(cat.get(STANDINGS_ID).unwrap()).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(err.dataset_id(), STANDINGS_ID);
    }

    #[tokio::test]
    async fn memory_source_missing_id() {
        let cat = Catalog::default();
        let src = MemorySource::new().with(GAMES_ID, "x\n");
        assert!(src.fetch(cat.get(GAMES_ID).unwrap()).await.is_ok());
        let err = src.fetch(cat.get(STANDINGS_ID).unwrap()).await.unwrap_err();
        assert!(matches!(err, LoadError::Missing { .. }));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = decode("games", vec![0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
        assert_eq!(decode("games", b"ok".to_vec()).unwrap(), "ok");
    }
}
