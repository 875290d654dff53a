use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::membership::types::NodeAddr;

/// Number of slots on the ring. Far above any plausible node count, so
/// distinct peers land on distinct positions in practice.
pub const RING_SIZE: u64 = 512;

/// Copies kept for every key (primary + two backups).
pub const REPLICATION_FACTOR: usize = 3;

/// Which copy of a key a replica holds, by its position in the replica set.
///
/// The role stored alongside an entry records how the node saw its own
/// position at write time; after churn it may lag reality until the next
/// stabilization pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReplicaRole {
    Primary,
    Secondary,
    Tertiary,
}

/// Roles in replica-set order: position 0 is the primary, then its two
/// successors.
pub const ROLE_ORDER: [ReplicaRole; REPLICATION_FACTOR] = [
    ReplicaRole::Primary,
    ReplicaRole::Secondary,
    ReplicaRole::Tertiary,
];

/// A live peer together with its position on the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingNode {
    pub addr: NodeAddr,
    pub hash: u64,
}

/// Ring position of an arbitrary byte string.
fn position_of(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish() % RING_SIZE
}

/// Ring position of a key.
pub fn key_position(key: &str) -> u64 {
    position_of(key.as_bytes())
}

/// Ring position of a peer, derived from its 6-byte address.
pub fn node_position(addr: NodeAddr) -> u64 {
    position_of(&addr.to_bytes())
}

/// The two neighbor pairs of a node at ring position `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    /// `ring[i+1]` and `ring[i+2]`: the peers holding this node's
    /// secondary and tertiary copies.
    pub has_my_replicas: [RingNode; 2],
    /// `ring[i-1]` and `ring[i-2]`: the peers whose primary data is
    /// copied here.
    pub have_replicas_of: [RingNode; 2],
}

/// Ordered view of the live peers, sorted ascending by hash code.
///
/// The ring is replaced atomically when a membership snapshot differs in
/// size from the current view; a same-size snapshot keeps the seated ring.
#[derive(Debug, Default)]
pub struct Ring {
    nodes: Vec<RingNode>,
}

impl Ring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reseats the ring from a fresh membership snapshot.
    ///
    /// Returns `true` when the ring was replaced (the view size changed),
    /// which is the trigger for the stabilization protocol.
    pub fn update(&mut self, members: &[NodeAddr]) -> bool {
        if members.len() == self.nodes.len() {
            return false;
        }

        let mut nodes: Vec<RingNode> = members
            .iter()
            .map(|&addr| RingNode {
                addr,
                hash: node_position(addr),
            })
            .collect();
        // Sort by position; address breaks ties so every node seats the
        // exact same ring from the same snapshot.
        nodes.sort_by_key(|node| (node.hash, node.addr));
        self.nodes = nodes;
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The replica set for a key: three successive peers starting at the
    /// first peer whose position is at or after the key's, wrapping around.
    ///
    /// Empty when fewer than `REPLICATION_FACTOR` peers are live.
    pub fn find_replicas(&self, key: &str) -> Vec<RingNode> {
        let n = self.nodes.len();
        if n < REPLICATION_FACTOR {
            return Vec::new();
        }

        let pos = key_position(key);
        let first = self.nodes[0].hash;
        let last = self.nodes[n - 1].hash;

        let start = if pos <= first || pos > last {
            0
        } else {
            // first index at or after the key's position
            match self.nodes.iter().position(|node| pos <= node.hash) {
                Some(i) => i,
                None => 0,
            }
        };

        (0..REPLICATION_FACTOR)
            .map(|offset| self.nodes[(start + offset) % n])
            .collect()
    }

    /// Both neighbor pairs of `addr`, or `None` when the ring is too small
    /// for replica sets or the address is not seated on it.
    pub fn neighbors_of(&self, addr: NodeAddr) -> Option<Neighbors> {
        let n = self.nodes.len();
        if n < REPLICATION_FACTOR {
            return None;
        }
        let i = self.nodes.iter().position(|node| node.addr == addr)?;

        // Predecessor indices need a non-negative modulus; a signed
        // remainder would go out of bounds at i = 0 or 1.
        Some(Neighbors {
            has_my_replicas: [self.nodes[(i + 1) % n], self.nodes[(i + 2) % n]],
            have_replicas_of: [self.nodes[(i + n - 1) % n], self.nodes[(i + n - 2) % n]],
        })
    }
}
