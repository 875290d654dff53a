use dashmap::DashMap;
use std::collections::VecDeque;
use tracing::{debug, trace};

use crate::membership::types::NodeAddr;

/// The emulated network: one inbound queue of opaque byte buffers per
/// registered node.
///
/// Failed nodes are not the transport's concern: the driver simply stops
/// draining them, and traffic sent their way rots in the queue.
#[derive(Debug, Default)]
pub struct EmulNet {
    queues: DashMap<NodeAddr, VecDeque<Vec<u8>>>,
    /// Probability in `[0, 1]` that any single send is silently lost.
    loss_rate: f64,
}

impl EmulNet {
    pub fn new(loss_rate: f64) -> Self {
        Self {
            queues: DashMap::new(),
            loss_rate,
        }
    }

    /// Opens an inbound queue for a node. Sends to unregistered addresses
    /// are dropped.
    pub fn register(&self, addr: NodeAddr) {
        self.queues.entry(addr).or_default();
    }

    /// Best-effort delivery of one opaque buffer.
    pub fn send(&self, from: NodeAddr, to: NodeAddr, payload: Vec<u8>) {
        if self.loss_rate > 0.0 && rand::random::<f64>() < self.loss_rate {
            debug!("Dropped message {} -> {} ({} bytes)", from, to, payload.len());
            return;
        }
        match self.queues.get_mut(&to) {
            Some(mut queue) => {
                trace!("Delivered message {} -> {} ({} bytes)", from, to, payload.len());
                queue.push_back(payload);
            }
            None => {
                debug!("No queue for {}, message from {} dropped", to, from);
            }
        }
    }

    /// Empties and returns the node's inbound queue.
    pub fn drain(&self, addr: NodeAddr) -> Vec<Vec<u8>> {
        match self.queues.get_mut(&addr) {
            Some(mut queue) => queue.drain(..).collect(),
            None => Vec::new(),
        }
    }
}
