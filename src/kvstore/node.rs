//! Node Driver
//!
//! `KvNode` owns all per-node state and is driven cooperatively: the harness
//! calls `tick` once per simulated time step, and every message handler runs
//! to completion before the next one starts. There is no other thread and no
//! lock around node state.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::membership::types::NodeAddr;
use crate::net::emulnet::EmulNet;
use crate::oplog::{OpEvent, OpKind, OutcomeSink};
use crate::ring::placement::Ring;
use crate::storage::memory::LocalStore;

use super::coordinator::{Transaction, TransactionTable, TxnIds};
use super::protocol::Message;

/// A single store node: coordinator and replica server in one.
pub struct KvNode {
    pub(crate) addr: NodeAddr,
    pub(crate) ring: Ring,
    pub(crate) store: LocalStore,
    pub(crate) transactions: TransactionTable,
    pub(crate) net: Arc<EmulNet>,
    pub(crate) sink: Arc<dyn OutcomeSink>,
    pub(crate) txn_ids: TxnIds,
    /// Harness tick most recently seen; monotone non-decreasing.
    pub(crate) now: u64,
}

impl KvNode {
    pub fn new(
        addr: NodeAddr,
        net: Arc<EmulNet>,
        sink: Arc<dyn OutcomeSink>,
        txn_ids: TxnIds,
    ) -> Self {
        net.register(addr);
        Self {
            addr,
            ring: Ring::new(),
            store: LocalStore::new(),
            transactions: TransactionTable::new(),
            net,
            sink,
            txn_ids,
            now: 0,
        }
    }

    pub fn addr(&self) -> NodeAddr {
        self.addr
    }

    /// The local keyspace, read-only (for harness reporting).
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// One cooperative time step:
    /// 1. reseat the ring from the fresh membership snapshot and, if it
    ///    changed, run stabilization;
    /// 2. expire transactions that outlived `TIME_OUT`;
    /// 3. drain and dispatch every inbound message.
    pub fn tick(&mut self, now: u64, members: &[NodeAddr]) {
        self.now = now;

        if self.ring.update(members) {
            debug!(
                "{}: ring reseated with {} peers",
                self.addr,
                self.ring.len()
            );
            if !self.store.is_empty() {
                self.stabilize();
            }
        }

        self.expire_transactions();
        self.drain_inbound();
    }

    /// Timeout sweep: every stale transaction, whatever its kind, becomes a
    /// coordinator-side failure.
    fn expire_transactions(&mut self) {
        for (txn, record) in self.transactions.sweep_expired(self.now) {
            warn!(
                "{}: transaction {} ({} {}) timed out without quorum",
                self.addr, txn, record.kind, record.key
            );
            self.log_coordinator(txn, &record, false);
        }
    }

    /// Encodes and sends one message over the emulated network.
    pub(crate) fn send(&self, to: NodeAddr, message: &Message) {
        if let Ok(encoded) = message.encode() {
            self.net.send(self.addr, to, encoded);
        } else {
            error!("{}: failed to encode message for {}", self.addr, to);
        }
    }

    /// Records a replica-side outcome for an operation this node served.
    pub(crate) fn log_replica(
        &self,
        kind: OpKind,
        success: bool,
        txn: i64,
        key: &str,
        value: Option<String>,
    ) {
        self.sink.record(OpEvent {
            node: self.addr,
            coordinator: false,
            kind,
            success,
            txn,
            key: key.to_string(),
            value,
        });
    }

    /// Records the final coordinator verdict for a transaction. Outcomes
    /// with no intrinsic value (read failures, deletes) carry none.
    pub(crate) fn log_coordinator(&self, txn: i64, record: &Transaction, success: bool) {
        let value = match record.kind {
            OpKind::Create | OpKind::Update => Some(record.value.clone()),
            OpKind::Read => success.then(|| record.value.clone()),
            OpKind::Delete => None,
        };
        self.sink.record(OpEvent {
            node: self.addr,
            coordinator: true,
            kind: record.kind,
            success,
            txn,
            key: record.key.clone(),
            value,
        });
    }
}
