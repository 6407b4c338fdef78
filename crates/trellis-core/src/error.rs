//! Error types for Trellis.

use std::path::PathBuf;

use thiserror::Error;

use crate::hierarchy::NodeId;

/// The main error type for Trellis operations.
///
/// Tree operations never fail on malformed description data (absent or
/// mistyped fields fall back to defaults); errors are reserved for API
/// boundaries that take external input or handles.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// The node handle is invalid or the node has been destroyed.
    #[error("invalid or destroyed node {0:?}")]
    InvalidNode(NodeId),

    /// Attempted to attach a node beneath itself or one of its descendants.
    #[error("cannot attach node {child:?} beneath its own descendant {parent:?}")]
    CircularParentage {
        /// The node being attached.
        child: NodeId,
        /// The requested parent.
        parent: NodeId,
    },

    /// A container operation was requested on a control that holds no children.
    #[error("node {0:?} is not a container")]
    NotAContainer(NodeId),

    /// A description or theme document is not valid JSON.
    #[error("failed to parse description: {0}")]
    Description(#[from] serde_json::Error),

    /// A configuration document is not valid TOML.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Reading a configuration or description file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for Trellis operations.
pub type Result<T> = std::result::Result<T, TrellisError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Hierarchy;

    #[test]
    fn test_error_display() {
        let mut nodes = Hierarchy::new();
        let id = nodes.insert(());

        let err = TrellisError::NotAContainer(id);
        assert!(err.to_string().contains("not a container"));

        let err = TrellisError::CircularParentage { child: id, parent: id };
        assert!(err.to_string().contains("descendant"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{ not json");
        let err: TrellisError = parse.unwrap_err().into();
        assert!(matches!(err, TrellisError::Description(_)));
    }
}
