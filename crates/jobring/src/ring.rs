//! Consistent hash ring.
//!
//! The ring keeps its replicas in a `BTreeMap` keyed by position, so it is
//! always sorted and each slot holds at most one replica. Lookups are a range
//! query for the first replica at or after the requested slot, wrapping to
//! the lowest slot when nothing follows.
//!
//! # Performance
//!
//! - `add_server`: O(log n) per replica, plus probing on collision
//! - `lookup`: O(log n)
//! - `remove_server`: O(n)

use crate::error::{Error, Result};
use crate::partitioner::{Crc32Partitioner, Partitioner};
use crate::position::Position;
use crate::probe;
use crate::replica::{Replica, REPLICAS_PER_SERVER, REPLICA_SUFFIXES};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Hash ring mapping slots to the servers that own them.
#[derive(Debug, Clone)]
pub struct HashRing<P: Partitioner = Crc32Partitioner> {
    replicas: BTreeMap<Position, String>,
    partitioner: P,
}

impl HashRing {
    /// Creates an empty ring using the CRC-32 partitioner.
    pub fn new() -> Self {
        Self::with_partitioner(Crc32Partitioner)
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> HashRing<P> {
    /// Creates an empty ring placing identifiers with `partitioner`.
    pub fn with_partitioner(partitioner: P) -> Self {
        Self {
            replicas: BTreeMap::new(),
            partitioner,
        }
    }

    /// Removes every replica.
    pub fn reset(&mut self) {
        self.replicas.clear();
    }

    /// Places the replicas of `server` on the ring.
    ///
    /// Replicas are inserted in suffix order; one that collides with an
    /// occupied slot (including a slot taken by an earlier replica of the
    /// same server) is moved by [`probe::resolve`]. Either all replicas are
    /// placed or, on [`Error::RingFull`], none are.
    ///
    /// Returns the final slots, in suffix order.
    pub fn add_server(&mut self, server: &str) -> Result<[Position; REPLICAS_PER_SERVER]> {
        let mut placed = [Position::ZERO; REPLICAS_PER_SERVER];

        for (i, suffix) in REPLICA_SUFFIXES.into_iter().enumerate() {
            let hashed = Replica::hashed_position(&self.partitioner, server, suffix);
            let taken = &placed[..i];
            let slot = probe::resolve(hashed, |p| {
                self.replicas.contains_key(&p) || taken.contains(&p)
            })
            .ok_or_else(|| {
                warn!(server, position = %hashed, "no free slot left for replica");
                Error::RingFull {
                    server: server.to_owned(),
                    position: hashed,
                }
            })?;
            placed[i] = slot;
        }

        for slot in placed {
            self.replicas.insert(slot, server.to_owned());
        }
        debug!(server, ?placed, "added server to ring");
        Ok(placed)
    }

    /// Removes every replica owned by `server`, returning how many were removed.
    pub fn remove_server(&mut self, server: &str) -> usize {
        let before = self.replicas.len();
        self.replicas.retain(|_, owner| owner != server);
        let removed = before - self.replicas.len();
        if removed > 0 {
            debug!(server, removed, "removed server from ring");
        }
        removed
    }

    /// Returns the server owning `position`.
    ///
    /// That is the owner of the first replica at or after `position`, or of
    /// the lowest replica when `position` is past every replica.
    pub fn lookup(&self, position: Position) -> Result<&str> {
        self.replicas
            .range(position..)
            .next()
            .or_else(|| self.replicas.iter().next())
            .map(|(_, owner)| owner.as_str())
            .ok_or(Error::EmptyRing)
    }

    /// Hashes `key` like a job and returns the server owning it.
    pub fn locate(&self, key: &str) -> Result<&str> {
        self.lookup(self.position_of(key))
    }

    /// Slot `key` hashes to as a job.
    pub fn position_of(&self, key: &str) -> Position {
        self.partitioner.position(key.as_bytes(), None)
    }

    /// Replicas in ring order.
    pub fn replicas(&self) -> impl Iterator<Item = Replica> + '_ {
        self.replicas
            .iter()
            .map(|(position, owner)| Replica::new(owner.clone(), *position))
    }

    /// Slots currently held by `server`, ascending.
    pub fn positions_of<'a>(&'a self, server: &'a str) -> impl Iterator<Item = Position> + 'a {
        self.replicas
            .iter()
            .filter(move |(_, owner)| owner.as_str() == server)
            .map(|(position, _)| *position)
    }

    /// True if a replica sits on `position`.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.replicas.contains_key(&position)
    }

    /// Number of replicas on the ring.
    pub fn replica_count(&self) -> usize {
        self.replicas.len()
    }

    /// Number of distinct servers on the ring.
    pub fn server_count(&self) -> usize {
        self.replicas.values().collect::<BTreeSet<_>>().len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicas.is_empty()
    }

    /// Returns the partitioner name.
    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }
}
