pub use opendal;

use std::str::FromStr;

use bytes::Bytes;
use futures::TryStreamExt;
use opendal::layers::TracingLayer;
use opendal::{services, Operator};
use serde::{Deserialize, Serialize};

/// StorageScheme selects the object store backend holding the blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageScheme {
    Fs,
    Gcs,
    Memory,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown storage scheme: {0}")]
pub struct InvalidScheme(String);

impl FromStr for StorageScheme {
    type Err = InvalidScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fs" => Ok(StorageScheme::Fs),
            "gcs" => Ok(StorageScheme::Gcs),
            "memory" => Ok(StorageScheme::Memory),
            _ => Err(InvalidScheme(s.to_string())),
        }
    }
}

/// StorageOperator wraps an opendal Operator rooted at the store that
/// holds the blocks.
#[derive(Clone)]
pub struct StorageOperator {
    op: Operator,
}

impl StorageOperator {
    pub fn new(op: Operator) -> Self {
        Self { op }
    }

    /// open builds an operator for the given scheme. `root` is the base
    /// directory for `fs` and the bucket name for `gcs`; `memory` ignores it.
    pub fn open(scheme: StorageScheme, root: &str) -> opendal::Result<Self> {
        match scheme {
            StorageScheme::Fs => Self::fs(root),
            StorageScheme::Gcs => Self::gcs(root),
            StorageScheme::Memory => Self::memory(),
        }
    }

    pub fn fs(root: &str) -> opendal::Result<Self> {
        let mut builder = services::Fs::default();
        builder.root(root);
        Ok(Self::new(Operator::new(builder)?.layer(TracingLayer).finish()))
    }

    pub fn gcs(bucket: &str) -> opendal::Result<Self> {
        let mut builder = services::Gcs::default();
        builder.bucket(bucket);
        Ok(Self::new(Operator::new(builder)?.layer(TracingLayer).finish()))
    }

    pub fn memory() -> opendal::Result<Self> {
        let builder = services::Memory::default();
        Ok(Self::new(Operator::new(builder)?.layer(TracingLayer).finish()))
    }

    /// read returns the full content of the object at `path`.
    pub async fn read(&self, path: &str) -> opendal::Result<Vec<u8>> {
        self.op.read(path).await
    }

    pub async fn write(&self, path: &str, bs: impl Into<Bytes>) -> opendal::Result<()> {
        self.op.write(path, bs.into()).await
    }

    /// list_paths returns the paths of all objects under `prefix`,
    /// recursively. Directory placeholders (paths ending in `/`) are
    /// skipped. Order is backend dependent.
    pub async fn list_paths(&self, prefix: &str) -> opendal::Result<Vec<String>> {
        let mut lister = self.op.scan(prefix).await?;

        let mut paths = Vec::new();
        while let Some(entry) = lister.try_next().await? {
            let path = entry.path().to_string();
            if path.ends_with('/') {
                continue;
            }
            paths.push(path);
        }
        Ok(paths)
    }

    pub fn operator(&self) -> &Operator {
        &self.op
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let op = StorageOperator::fs(dir.path().to_str().unwrap()).unwrap();

        op.write("378660/01A/meta.json", "{}".as_bytes().to_vec())
            .await
            .unwrap();
        op.write("378660/01B/meta.json", "{}".as_bytes().to_vec())
            .await
            .unwrap();

        let buf = op.read("378660/01A/meta.json").await.unwrap();
        assert_eq!(buf, b"{}");

        let mut paths = op.list_paths("378660/").await.unwrap();
        paths.sort();
        assert_eq!(
            paths,
            vec![
                "378660/01A/meta.json".to_string(),
                "378660/01B/meta.json".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_memory_round_trip() {
        let op = StorageOperator::memory().unwrap();

        op.write("a/meta.json", "{\"minTime\":1}".as_bytes().to_vec())
            .await
            .unwrap();
        let buf = op.read("a/meta.json").await.unwrap();
        assert_eq!(buf, b"{\"minTime\":1}");
    }

    #[test]
    fn test_scheme_parse() {
        assert_eq!("fs".parse::<StorageScheme>().unwrap(), StorageScheme::Fs);
        assert_eq!("gcs".parse::<StorageScheme>().unwrap(), StorageScheme::Gcs);
        assert!("s3".parse::<StorageScheme>().is_err());
    }
}
