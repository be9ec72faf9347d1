use connectors::error::{DestinationError, SourceError};
use thiserror::Error;

/// A sync run fails outright on the first connector error; nothing is
/// caught or classified beyond the originating side.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Destination error: {0}")]
    Destination(#[from] DestinationError),
}
