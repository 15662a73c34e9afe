//! Engine error types.

use thiserror::Error;
use tessera_wire::WireError;

/// Structural edits rejected by the element arena.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("element \"{child}\" already has parent \"{parent}\"")]
    AlreadyParented { child: String, parent: String },

    #[error("element \"{0}\" is the root element and cannot have a parent")]
    RootAsChild(String),

    #[error("element \"{child}\" is an ancestor of \"{parent}\"")]
    Cycle { child: String, parent: String },

    #[error("element does not exist")]
    UnknownElem,
}

/// Failures that leave a window unusable.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    #[error("window has no root element")]
    MissingRoot,

    #[error("root element \"{0}\" does not have the root type")]
    UnknownRoot(String),

    #[error("tree exceeds the max depth of {0}")]
    TreeTooDeep(usize),

    #[error("element \"{0}\" of root type is not the root of the window")]
    RootHasParent(String),

    #[error("{0} elements are not reachable from the root")]
    Orphaned(usize),
}

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    #[error("window {0} does not exist")]
    UnknownWindow(u64),

    #[error("window {0} is already open")]
    AlreadyOpen(u64),

    #[error("invalid manager action: {0}")]
    UnknownAction(u8),

    #[error("window {id}: {source}")]
    Window {
        id: u64,
        #[source]
        source: WindowError,
    },
}
