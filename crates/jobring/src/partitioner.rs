//! Placement of identifiers on the ring.
//!
//! A partitioner turns an identifier into a [`Position`]. Servers and jobs go
//! through the same partitioner so both share one keyspace.

use crate::position::Position;

/// Converts identifiers into ring positions.
///
/// Partitioners are stateless and must be deterministic: the same bytes
/// always land on the same slot, across runs and platforms.
pub trait Partitioner: Send + Sync + 'static {
    /// Maps `key`, followed by `suffix` when present, onto the ring.
    ///
    /// The suffix is used to spread a server's replicas; jobs pass `None`.
    fn position(&self, key: &[u8], suffix: Option<&[u8]>) -> Position;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}

/// CRC-32 (IEEE) checksum reduced modulo the slot count.
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32Partitioner;

impl Partitioner for Crc32Partitioner {
    fn position(&self, key: &[u8], suffix: Option<&[u8]>) -> Position {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(key);
        if let Some(suffix) = suffix {
            hasher.update(suffix);
        }
        Position::from_raw(hasher.finalize())
    }

    fn name(&self) -> &'static str {
        "Crc32Partitioner"
    }
}
