//! Stabilization Protocol
//!
//! Runs after the ring changes to restore three correct replicas for every
//! key this node stores. Each entry is pushed to both sides of the node's
//! ring neighborhood according to the role the node recorded for it; the
//! pushes are background creates, so peers that already hold the key reject
//! the duplicate and nothing further happens.

use tracing::debug;

use crate::ring::placement::ReplicaRole;

use super::node::KvNode;
use super::protocol::{Message, STABILIZE_TXN};

impl KvNode {
    /// Re-replicates every locally stored key after a ring change.
    ///
    /// Rather than working out which replicas survived, the node always
    /// pushes each entry to both neighbors that should now hold a copy, and
    /// lets the receivers' create-fails-if-exists rule absorb the no-ops.
    pub(crate) fn stabilize(&self) {
        let Some(neighbors) = self.ring.neighbors_of(self.addr) else {
            debug!(
                "{}: ring below replication factor, stabilization skipped",
                self.addr
            );
            return;
        };

        let [successor, after_successor] = neighbors.has_my_replicas;
        let [predecessor, before_predecessor] = neighbors.have_replicas_of;

        for (key, entry) in self.store.iter() {
            let pushes = match entry.role {
                // my key: successors hold the other two copies
                ReplicaRole::Primary => [
                    (successor, ReplicaRole::Secondary),
                    (after_successor, ReplicaRole::Tertiary),
                ],
                // predecessor's key: re-seed its owner and my successor
                ReplicaRole::Secondary => [
                    (successor, ReplicaRole::Tertiary),
                    (predecessor, ReplicaRole::Primary),
                ],
                // key from two seats back: re-seed both predecessors
                ReplicaRole::Tertiary => [
                    (before_predecessor, ReplicaRole::Primary),
                    (predecessor, ReplicaRole::Secondary),
                ],
            };

            for (target, role) in pushes {
                self.send(
                    target.addr,
                    &Message::Create {
                        txn: STABILIZE_TXN,
                        from: self.addr,
                        key: key.clone(),
                        value: entry.value.clone(),
                        role,
                    },
                );
            }
        }

        debug!(
            "{}: stabilization pushed {} keys to ring neighbors",
            self.addr,
            self.store.len()
        );
    }
}
