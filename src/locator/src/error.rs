use thiserror::Error;

/// AccessError is a failed metadata retrieval or decode. The locator never
/// retries or skips past one of these; the search that issued the fetch
/// aborts, because the narrowing decision for that step cannot be made.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("block meta not found: {path}")]
    NotFound { path: String },

    #[error("malformed block meta {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid time range in {path}: min {min} > max {max}")]
    InvalidRange { path: String, min: i64, max: i64 },

    #[error("storage error on {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: blockfind_storage::opendal::Error,
    },
}

/// LocateError is a failed locate call. A target that no block covers is
/// not an error; it comes back as an outcome with zero hits.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("cannot locate over an empty block listing")]
    EmptyIndex,

    #[error(transparent)]
    Access(#[from] AccessError),
}
