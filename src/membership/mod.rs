//! Membership Module
//!
//! Node identity and the cluster directory. The underlying failure-detection
//! protocol is external to the store: all the core ever sees is a per-tick
//! snapshot of the live member list.
//!
//! ## Core Concepts
//! - **Identity**: A peer is a 4-byte node id plus a 2-byte port. Its fixed
//!   6-byte wire form is what the ring hashes to place the peer.
//! - **Directory**: `ClusterView` is owned by the emulation driver. The driver
//!   registers and fails nodes; the store core only reads `alive_members()`.

pub mod types;
pub mod view;

#[cfg(test)]
mod tests;
