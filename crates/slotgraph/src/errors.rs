//! Error types of the graph stores and snapshots.
use thiserror::Error;

/// Error type returned when the stores backing a graph no longer agree with each other.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum InvariantViolation {
    /// The three stores do not hold the same number of vertices.
    #[error("store sizes disagree: {index} indexed keys, {adjacency} edge lists, {metadata} metadata entries")]
    LengthMismatch {
        /// Number of indexed keys
        index: usize,
        /// Number of edge lists
        adjacency: usize,
        /// Number of metadata entries
        metadata: usize,
    },
    /// A key is assigned a slot outside of the dense range.
    #[error("slot {slot} is outside of the dense range 0..{len}")]
    SlotOutOfRange {
        /// Offending slot
        slot: usize,
        /// Number of live vertices
        len: usize,
    },
    /// Two keys share the same slot.
    #[error("slot {slot} is assigned to more than one key")]
    DuplicateSlot {
        /// Offending slot
        slot: usize,
    },
    /// An indexed vertex has no metadata entry.
    #[error("vertex at slot {slot} has no metadata entry")]
    MissingMetadata {
        /// Slot of the vertex
        slot: usize,
    },
    /// An edge list holds two edges to the same target.
    #[error("edge list at slot {slot} targets the same vertex more than once")]
    DuplicateTarget {
        /// Slot of the edge list
        slot: usize,
    },
}

/// Error type returned when a [`Snapshot`](crate::snapshot::Snapshot) cannot be turned back into
/// a graph.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Two vertices of the snapshot share the same key.
    #[error("vertex at position {position} reuses the key of an earlier vertex")]
    DuplicateKey {
        /// Position of the second occurrence in the snapshot
        position: usize,
    },
    /// The restored graph does not uphold its invariants.
    #[error("restored graph is inconsistent: {0}")]
    Inconsistent(#[from] InvariantViolation),
    /// The encoded snapshot could not be decoded.
    #[cfg(feature = "serialize")]
    #[error("cannot decode snapshot: {0}")]
    Decode(#[from] serde_cbor::Error),
}
