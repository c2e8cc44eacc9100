//! Replicas (virtual nodes).
//!
//! Each server is placed on the ring several times so that the slots it owns
//! are spread around the keyspace instead of forming one arc. The replicas of
//! a server are told apart by a suffix appended to the server id before
//! hashing.
//!
//! # Invariants
//!
//! - Every replica on a ring has a unique position (collisions are probed
//!   away when the replica is inserted, see [`crate::probe`])
//! - Every replica belongs to exactly one server
//! - A server always contributes [`REPLICAS_PER_SERVER`] replicas

use crate::partitioner::Partitioner;
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of replicas each server contributes.
pub const REPLICAS_PER_SERVER: usize = 3;

/// Hash suffixes for a server's replicas, in insertion order.
pub const REPLICA_SUFFIXES: [Option<&str>; REPLICAS_PER_SERVER] = [None, Some("2"), Some("15")];

/// One placement of a server on the ring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Replica {
    /// Server that owns this replica.
    pub owner: String,
    /// Slot the replica occupies.
    pub position: Position,
}

impl Replica {
    pub fn new(owner: impl Into<String>, position: Position) -> Self {
        Self {
            owner: owner.into(),
            position,
        }
    }

    /// Slot a replica of `server` hashes to before any collision is resolved.
    pub fn hashed_position<P: Partitioner>(
        partitioner: &P,
        server: &str,
        suffix: Option<&str>,
    ) -> Position {
        partitioner.position(server.as_bytes(), suffix.map(str::as_bytes))
    }

    /// Slots all replicas of `server` hash to, before collision resolution.
    pub fn hashed_positions<P: Partitioner>(
        partitioner: &P,
        server: &str,
    ) -> [Position; REPLICAS_PER_SERVER] {
        REPLICA_SUFFIXES.map(|suffix| Self::hashed_position(partitioner, server, suffix))
    }
}

impl fmt::Display for Replica {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Replica(position={}, server={})", self.position, self.owner)
    }
}
