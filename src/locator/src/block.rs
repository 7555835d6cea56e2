use std::fmt::{Display, Formatter};

use blockfind_utils::time::{time_format, unix_milli_to_time};

/// BlockId is the opaque handle of a block in the object store: the
/// block's directory path, exactly as the listing returned it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.ends_with('/') {
            path.push('/');
        }
        Self(path)
    }

    /// path returns the block's directory path within the store.
    pub fn path(&self) -> &str {
        &self.0
    }

    /// meta_path returns the path of the block's metadata object.
    pub fn meta_path(&self) -> String {
        format!("{}meta.json", self.0)
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// TimeRange holds a min and max timestamp in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub min: i64,
    pub max: i64,
}

impl TimeRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn unbound() -> Self {
        Self::new(i64::MIN, i64::MAX)
    }

    /// contains returns true if the range covers the given time.
    /// The min and max times are inclusive.
    pub fn contains(&self, t: i64) -> bool {
        self.min <= t && self.max >= t
    }

    /// overlaps returns true if the two ranges intersect.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.min <= other.max && self.max >= other.min
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "min={} max={}",
            time_format(unix_milli_to_time(self.min)),
            time_format(unix_milli_to_time(self.max)),
        )
    }
}
