use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a load can fail. A failed load never touches the graph that is
/// already in the engine.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read edge list '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("graph needs {required_bytes} bytes, exceeds max_memory_mb limit of {limit_bytes} bytes")]
    MemoryLimitExceeded {
        required_bytes: usize,
        limit_bytes: usize,
    },
}
