use serde::{Deserialize, Serialize};
use std::fmt;

/// Network identity of a peer: a 4-byte node id and a 2-byte port.
///
/// The pair is the node's complete address on the emulated network. Its
/// 6-byte wire form is the input to the ring hash, so two addresses that
/// differ in either field land at independent ring positions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeAddr {
    pub id: u32,
    pub port: u16,
}

impl NodeAddr {
    pub fn new(id: u32, port: u16) -> Self {
        Self { id, port }
    }

    /// Fixed 6-byte form (id then port, little-endian) used for ring hashing.
    pub fn to_bytes(self) -> [u8; 6] {
        let mut bytes = [0u8; 6];
        bytes[..4].copy_from_slice(&self.id.to_le_bytes());
        bytes[4..].copy_from_slice(&self.port.to_le_bytes());
        bytes
    }
}

impl fmt::Display for NodeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.port)
    }
}

/// Health of a member from the perspective of the cluster directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberHealth {
    /// The node is live and participates in placement.
    Alive,
    /// The node has crashed; it no longer appears in membership snapshots.
    Failed,
}
