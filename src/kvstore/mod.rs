//! Replicated Key-Value Node Module
//!
//! The node core. Every node plays two roles at once: coordinator for the
//! client operations it receives, and replica server for the key ranges the
//! ring assigns it.
//!
//! ## Core Concepts
//! - **Fan-out**: A client operation is sent to all three replicas of its key
//!   and tracked in a transaction table on the coordinator.
//! - **Quorum**: The first two concurring replies decide the outcome; the
//!   transaction is cleared immediately, so a late third reply is dropped.
//! - **Timeouts**: Transactions that never reach quorum are swept out after
//!   `TIME_OUT` ticks and reported as failures.
//! - **Stabilization**: When the ring changes, every node re-pushes its keys
//!   to the neighbors now responsible for them, restoring three replicas.

pub mod coordinator;
pub mod handlers;
pub mod node;
pub mod protocol;
pub mod stabilizer;
