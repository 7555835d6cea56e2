use serde::{Deserialize, Serialize};

use crate::block::TimeRange;

fn default_version() -> u32 {
    1
}

/// BlockMeta is the decoded metadata document of a single block. Only the
/// time bounds are required; anything else the producing system writes
/// (stats, compaction lineage) is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMeta {
    /// Block name, when the producing system records one.
    #[serde(default)]
    pub ulid: String,

    /// The min and max time of all points stored in the block, epoch
    /// milliseconds, both inclusive.
    pub min_time: i64,
    pub max_time: i64,

    #[serde(default = "default_version")]
    pub version: u32,
}

impl BlockMeta {
    /// unmarshal_json decodes a BlockMeta from a metadata document.
    pub fn unmarshal_json(b: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(b)
    }

    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.min_time, self.max_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmarshal_full_meta() {
        let doc = br#"{
            "ulid": "01H8YV2W1N7H1S6VGJ1HQMA3K9",
            "minTime": 1688961600000,
            "maxTime": 1688968800000,
            "stats": {"numSamples": 12345, "numSeries": 67},
            "compaction": {"level": 1, "sources": ["01H8YV2W1N7H1S6VGJ1HQMA3K9"]},
            "version": 1
        }"#;

        let meta = BlockMeta::unmarshal_json(doc).unwrap();
        assert_eq!(meta.ulid, "01H8YV2W1N7H1S6VGJ1HQMA3K9");
        assert_eq!(meta.min_time, 1688961600000);
        assert_eq!(meta.max_time, 1688968800000);
        assert_eq!(meta.version, 1);
        assert!(meta.time_range().contains(1688967495000));
    }

    #[test]
    fn test_unmarshal_minimal_meta() {
        let meta = BlockMeta::unmarshal_json(br#"{"minTime": 0, "maxTime": 10}"#).unwrap();
        assert_eq!(meta.ulid, "");
        assert_eq!(meta.version, 1);
    }

    #[test]
    fn test_unmarshal_missing_required_field() {
        assert!(BlockMeta::unmarshal_json(br#"{"minTime": 0}"#).is_err());
        assert!(BlockMeta::unmarshal_json(br#"{"maxTime": "ten"}"#).is_err());
        assert!(BlockMeta::unmarshal_json(b"not json").is_err());
    }
}
