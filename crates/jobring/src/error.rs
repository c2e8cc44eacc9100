//! Error types for the ring and assignment.

use crate::position::Position;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a ring or assigning jobs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The job list or the server list was empty.
    #[error("jobs or servers empty")]
    EmptyInput,

    /// More jobs than the keyspace supports.
    #[error("jobs exceeded limit {limit} (got {count})")]
    TooManyJobs {
        /// Number of jobs supplied.
        count: usize,
        /// Maximum number of jobs accepted.
        limit: usize,
    },

    /// More servers than the ring supports.
    #[error("servers exceeded limit {limit} (got {count})")]
    TooManyServers {
        /// Number of servers supplied.
        count: usize,
        /// Maximum number of servers accepted.
        limit: usize,
    },

    /// A slot index outside `[0, SLOT_COUNT)`.
    #[error("position {value} is outside the ring")]
    PositionOutOfRange {
        /// Rejected slot index.
        value: u32,
    },

    /// Lookup on a ring with no replicas.
    #[error("lookup on an empty ring")]
    EmptyRing,

    /// Every probe offset for a colliding replica was already taken.
    #[error("ring full: no free slot for a replica of {server:?} near position {position}")]
    RingFull {
        /// Server whose replica could not be placed.
        server: String,
        /// Position the replica originally hashed to.
        position: Position,
    },
}
