//! Collision probing.
//!
//! When a replica hashes onto an occupied slot it is moved clockwise by the
//! first prime offset that lands on a free slot. Offsets are tried in
//! ascending order and wrap modulo [`SLOT_COUNT`].

use crate::position::{Position, SLOT_COUNT};

/// Number of primes below [`SLOT_COUNT`].
pub const PROBE_COUNT: usize = count_primes_below(SLOT_COUNT as usize);

/// Every prime below [`SLOT_COUNT`], ascending.
pub static PROBE_PRIMES: [u32; PROBE_COUNT] = primes_below::<PROBE_COUNT>(SLOT_COUNT as usize);

const fn sieve(limit: usize) -> [bool; SLOT_COUNT as usize] {
    let mut composite = [false; SLOT_COUNT as usize];
    composite[0] = true;
    composite[1] = true;
    let mut i = 2;
    while i * i < limit {
        if !composite[i] {
            let mut j = i * i;
            while j < limit {
                composite[j] = true;
                j += i;
            }
        }
        i += 1;
    }
    composite
}

const fn count_primes_below(limit: usize) -> usize {
    let composite = sieve(limit);
    let mut count = 0;
    let mut i = 0;
    while i < limit {
        if !composite[i] {
            count += 1;
        }
        i += 1;
    }
    count
}

const fn primes_below<const N: usize>(limit: usize) -> [u32; N] {
    let composite = sieve(limit);
    let mut primes = [0u32; N];
    let mut n = 0;
    let mut i = 0;
    while i < limit {
        if !composite[i] {
            primes[n] = i as u32;
            n += 1;
        }
        i += 1;
    }
    primes
}

/// Candidate slots for a replica that collided at `start`, in probe order.
pub fn candidates(start: Position) -> impl Iterator<Item = Position> {
    PROBE_PRIMES.iter().map(move |&prime| start.offset(prime))
}

/// Finds the slot a replica hashed to `start` should take.
///
/// Returns `start` itself when it is free, otherwise the first free probe
/// candidate, or `None` when every candidate is occupied.
pub fn resolve(start: Position, mut occupied: impl FnMut(Position) -> bool) -> Option<Position> {
    if !occupied(start) {
        return Some(start);
    }
    candidates(start).find(|&candidate| {
        let taken = occupied(candidate);
        tracing::trace!(%start, %candidate, taken, "probing for free slot");
        !taken
    })
}
