//! Replicated Key-Value Store Library
//!
//! This library crate defines the core modules of a replicated,
//! consistent-hashing key-value store running over an emulated network.
//! It serves as the foundation for the binary executable (`main.rs`),
//! which drives a multi-node cluster emulation.
//!
//! ## Architecture Modules
//! The system is composed of six loosely coupled subsystems:
//!
//! - **`membership`**: Node identity and the cluster directory. The emulation
//!   driver owns the directory; nodes only consume per-tick snapshots of the
//!   live member list.
//! - **`ring`**: Consistent-hash placement. Orders live peers by hash code and
//!   resolves, for any key, the three successive peers that form its replica
//!   set (primary, secondary, tertiary).
//! - **`storage`**: The local keyspace. A versioned in-memory map holding one
//!   entry per key (value, write tick, replica role).
//! - **`net`**: The emulated transport. Best-effort, lossy delivery of opaque
//!   byte buffers into per-node inbound queues.
//! - **`oplog`**: The outcome sink. Records the final coordinator verdicts and
//!   per-replica results of every client operation for offline inspection.
//! - **`kvstore`**: The node core. Coordinator fan-out with a 2-of-3 quorum
//!   state machine, the replica-server handlers, and the stabilization
//!   protocol that restores three replicas after membership churn.

pub mod kvstore;
pub mod membership;
pub mod net;
pub mod oplog;
pub mod ring;
pub mod storage;
