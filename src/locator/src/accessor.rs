use blockfind_storage::opendal::ErrorKind;
use blockfind_storage::StorageOperator;

use crate::block::{BlockId, TimeRange};
use crate::error::AccessError;
use crate::meta::BlockMeta;

/// MetaSource fetches the time coverage of a single block. Each fetch is a
/// network round trip; callers wanting retries or timeouts wrap their own
/// around an implementation.
#[async_trait]
pub trait MetaSource: Send + Sync {
    /// fetch_range returns the inclusive [min, max] time range covered by
    /// the given block.
    async fn fetch_range(&self, id: &BlockId) -> Result<TimeRange, AccessError>;
}

/// ObjectStoreMetaSource reads `meta.json` out of the block's directory in
/// the object store.
pub struct ObjectStoreMetaSource {
    op: StorageOperator,
}

impl ObjectStoreMetaSource {
    pub fn new(op: StorageOperator) -> Self {
        Self { op }
    }
}

#[async_trait]
impl MetaSource for ObjectStoreMetaSource {
    async fn fetch_range(&self, id: &BlockId) -> Result<TimeRange, AccessError> {
        let path = id.meta_path();

        let buf = self.op.read(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                AccessError::NotFound { path: path.clone() }
            } else {
                AccessError::Storage {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;

        let meta = BlockMeta::unmarshal_json(&buf).map_err(|e| AccessError::Malformed {
            path: path.clone(),
            source: e,
        })?;

        if meta.min_time > meta.max_time {
            return Err(AccessError::InvalidRange {
                path,
                min: meta.min_time,
                max: meta.max_time,
            });
        }

        Ok(meta.time_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn source_with(path: &str, body: &str) -> ObjectStoreMetaSource {
        let op = StorageOperator::memory().unwrap();
        op.write(path, body.as_bytes().to_vec()).await.unwrap();
        ObjectStoreMetaSource::new(op)
    }

    #[tokio::test]
    async fn test_fetch_range() {
        let source = source_with(
            "378660/01A/meta.json",
            r#"{"minTime": 100, "maxTime": 200}"#,
        )
        .await;

        let range = source.fetch_range(&BlockId::new("378660/01A")).await.unwrap();
        assert_eq!(range, TimeRange::new(100, 200));
    }

    #[tokio::test]
    async fn test_missing_object() {
        let source = ObjectStoreMetaSource::new(StorageOperator::memory().unwrap());

        let err = source
            .fetch_range(&BlockId::new("378660/01A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_malformed_meta() {
        let source = source_with("378660/01A/meta.json", r#"{"minTime": 100}"#).await;

        let err = source
            .fetch_range(&BlockId::new("378660/01A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_inverted_range() {
        let source = source_with(
            "378660/01A/meta.json",
            r#"{"minTime": 200, "maxTime": 100}"#,
        )
        .await;

        let err = source
            .fetch_range(&BlockId::new("378660/01A"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccessError::InvalidRange { min: 200, max: 100, .. }
        ));
    }
}
