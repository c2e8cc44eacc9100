//! Consistent-hashing assignment of jobs to servers.
//!
//! This crate provides:
//! - A CRC-32 partitioner mapping identifiers onto a 4095-slot ring
//! - Replicas (three per server) with prime-offset collision probing
//! - The hash ring and its successor lookup
//! - Assignment of a job list over a server list into a [`Distribution`]

pub mod assign;
pub mod distribution;
pub mod error;
pub mod partitioner;
pub mod position;
pub mod probe;
pub mod replica;
pub mod ring;
pub mod shared;

pub use assign::{assign, assign_fresh, validate, validate_servers, MAX_JOBS, MAX_SERVERS};
pub use distribution::Distribution;
pub use error::{Error, Result};
pub use partitioner::{Crc32Partitioner, Partitioner};
pub use position::{Position, SLOT_COUNT};
pub use replica::{Replica, REPLICAS_PER_SERVER};
pub use ring::HashRing;
pub use shared::SharedRing;
