//! Consistent-Hash Ring Module
//!
//! Maps keys to the peers responsible for them. It ensures a deterministic
//! placement: every node computes the same replica set for a key from the
//! same membership snapshot, with no coordination.
//!
//! ## Mechanism
//! - **Hashing**: Peer addresses and keys are hashed to positions on a ring
//!   of `RING_SIZE` slots.
//! - **Placement**: A key belongs to the first peer at or after its position
//!   (wrapping), plus that peer's two successors. Positions 0/1/2 in the
//!   replica set are the primary, secondary and tertiary replicas.

pub mod placement;

#[cfg(test)]
mod tests;
