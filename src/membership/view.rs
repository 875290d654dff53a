use dashmap::DashMap;
use tracing::info;

use super::types::{MemberHealth, NodeAddr};

/// Cluster directory owned by the emulation driver.
///
/// The driver registers nodes as they join and marks them failed when it
/// crashes them; the store core never mutates the view. Each tick a node
/// pulls a fresh `alive_members()` snapshot and reseats its ring from it.
#[derive(Debug, Default)]
pub struct ClusterView {
    members: DashMap<NodeAddr, MemberHealth>,
}

impl ClusterView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the directory as alive.
    pub fn register(&self, addr: NodeAddr) {
        self.members.insert(addr, MemberHealth::Alive);
        info!("Member {} joined, cluster size now {}", addr, self.alive_count());
    }

    /// Marks a node failed. It disappears from subsequent snapshots.
    pub fn fail(&self, addr: NodeAddr) {
        let known = match self.members.get_mut(&addr) {
            Some(mut health) => {
                *health = MemberHealth::Failed;
                true
            }
            None => false,
        };
        // count after the entry guard is released
        if known {
            info!("Member {} failed, cluster size now {}", addr, self.alive_count());
        }
    }

    pub fn is_alive(&self, addr: NodeAddr) -> bool {
        self.members
            .get(&addr)
            .is_some_and(|health| *health == MemberHealth::Alive)
    }

    /// Snapshot of the live member list, in a deterministic order.
    pub fn alive_members(&self) -> Vec<NodeAddr> {
        let mut members: Vec<NodeAddr> = self
            .members
            .iter()
            .filter(|entry| *entry.value() == MemberHealth::Alive)
            .map(|entry| *entry.key())
            .collect();
        members.sort();
        members
    }

    fn alive_count(&self) -> usize {
        self.members
            .iter()
            .filter(|entry| *entry.value() == MemberHealth::Alive)
            .count()
    }
}
