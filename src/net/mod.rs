//! Emulated Network Module
//!
//! In-process transport standing in for a real datagram network. Delivery is
//! best-effort and unordered across peers: a message may be dropped (loss
//! probability is configurable) and nothing is ever retransmitted.
//!
//! ## Contract
//! - `send(from, to, bytes)` enqueues an opaque byte buffer for `to`, or
//!   drops it (loss, unknown destination).
//! - `drain(addr)` empties the node's inbound queue; the node processes each
//!   buffer to completion before pulling the next.

pub mod emulnet;

#[cfg(test)]
mod tests;
