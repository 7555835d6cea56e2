use blockfind_storage::StorageOperator;

use crate::block::BlockId;
use crate::error::AccessError;

/// BlockListing supplies the ordered sequence of blocks to search over.
/// The locator assumes the sequence is time-sorted with non-overlapping
/// ranges; that is the supplier's contract, not something the locator can
/// verify without paying a fetch per block.
#[async_trait]
pub trait BlockListing: Send + Sync {
    async fn list_blocks(&self) -> Result<Vec<BlockId>, AccessError>;
}

/// ObjectStoreListing discovers blocks under a store prefix. A block
/// exists exactly when its `meta.json` object does. Ids come back
/// lexically sorted; block directories named by ULID make that creation
/// order, the same order `gsutil ls` reports.
pub struct ObjectStoreListing {
    op: StorageOperator,
    prefix: String,
}

impl ObjectStoreListing {
    pub fn new(op: StorageOperator, prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self { op, prefix }
    }
}

#[async_trait]
impl BlockListing for ObjectStoreListing {
    async fn list_blocks(&self) -> Result<Vec<BlockId>, AccessError> {
        let paths = self
            .op
            .list_paths(&self.prefix)
            .await
            .map_err(|e| AccessError::Storage {
                path: self.prefix.clone(),
                source: e,
            })?;

        let mut ids: Vec<BlockId> = paths
            .iter()
            .filter_map(|p| p.strip_suffix("meta.json"))
            .filter(|dir| dir.ends_with('/'))
            .map(BlockId::new)
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}
