//! Store Wire Protocol
//!
//! The tagged message set exchanged between coordinators and replica
//! servers, serialized with bincode into the opaque buffers the emulated
//! network carries.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::membership::types::NodeAddr;
use crate::ring::placement::ReplicaRole;

/// Transaction id reserved for stabilization writes. A create carrying it is
/// background repair: applied locally, never logged, never replied to.
pub const STABILIZE_TXN: i64 = -1;

/// The wire protocol between coordinators and replica servers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Message {
    /// Coordinator asking a replica to insert a fresh key. The role tag
    /// tells the replica which copy it is expected to hold.
    Create {
        txn: i64,
        from: NodeAddr,
        key: String,
        value: String,
        role: ReplicaRole,
    },

    /// Coordinator asking a replica for its copy of a key.
    Read {
        txn: i64,
        from: NodeAddr,
        key: String,
    },

    /// Coordinator asking a replica to overwrite an existing key.
    Update {
        txn: i64,
        from: NodeAddr,
        key: String,
        value: String,
        role: ReplicaRole,
    },

    /// Coordinator asking a replica to remove a key.
    Delete {
        txn: i64,
        from: NodeAddr,
        key: String,
    },

    /// Replica's verdict on a create, update or delete.
    Reply {
        txn: i64,
        from: NodeAddr,
        success: bool,
    },

    /// Replica's answer to a read. `None` means the key was absent, which
    /// the coordinator counts as a failure.
    ReadReply {
        txn: i64,
        from: NodeAddr,
        value: Option<String>,
    },
}

impl Message {
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
