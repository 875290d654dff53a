//! Message Handlers
//!
//! Per-tick dispatch of everything the emulated network delivered: the four
//! replica-server operations, and the reply accounting that drives the
//! coordinator's quorum state machine.

use tracing::{debug, warn};

use crate::membership::types::NodeAddr;
use crate::oplog::OpKind;
use crate::ring::placement::ReplicaRole;
use crate::storage::memory::Entry;

use super::coordinator::ReplyOutcome;
use super::node::KvNode;
use super::protocol::{Message, STABILIZE_TXN};

impl KvNode {
    /// Drains the inbound queue to empty, processing each message to
    /// completion. Malformed buffers are dropped.
    pub(crate) fn drain_inbound(&mut self) {
        for raw in self.net.drain(self.addr) {
            match Message::decode(&raw) {
                Ok(message) => self.dispatch(message),
                Err(e) => warn!("{}: dropping malformed message: {}", self.addr, e),
            }
        }
    }

    fn dispatch(&mut self, message: Message) {
        match message {
            Message::Create {
                txn,
                from,
                key,
                value,
                role,
            } => self.handle_create(txn, from, &key, value, role),
            Message::Read { txn, from, key } => self.handle_read(txn, from, &key),
            Message::Update {
                txn,
                from,
                key,
                value,
                role,
            } => self.handle_update(txn, from, &key, value, role),
            Message::Delete { txn, from, key } => self.handle_delete(txn, from, &key),
            Message::Reply { txn, success, .. } => self.handle_reply(txn, success),
            Message::ReadReply { txn, value, .. } => self.handle_read_reply(txn, value),
        }
    }

    /// Replica-side CREATE. A stabilization write (txn id −1) is applied
    /// silently: duplicate pushes bounce off the existing key and nothing is
    /// logged or replied.
    fn handle_create(
        &mut self,
        txn: i64,
        from: NodeAddr,
        key: &str,
        value: String,
        role: ReplicaRole,
    ) {
        let success = self
            .store
            .create(key, Entry::new(value.clone(), self.now, role));

        if txn == STABILIZE_TXN {
            return;
        }

        self.log_replica(OpKind::Create, success, txn, key, Some(value));
        self.send(
            from,
            &Message::Reply {
                txn,
                from: self.addr,
                success,
            },
        );
    }

    /// Replica-side READ. An absent key answers `None`, which the
    /// coordinator counts as a failure.
    fn handle_read(&mut self, txn: i64, from: NodeAddr, key: &str) {
        let value = self.store.read(key).map(|entry| entry.value.clone());

        match &value {
            Some(found) => self.log_replica(OpKind::Read, true, txn, key, Some(found.clone())),
            None => self.log_replica(OpKind::Read, false, txn, key, None),
        }

        self.send(
            from,
            &Message::ReadReply {
                txn,
                from: self.addr,
                value,
            },
        );
    }

    /// Replica-side UPDATE: overwrite-if-present.
    fn handle_update(
        &mut self,
        txn: i64,
        from: NodeAddr,
        key: &str,
        value: String,
        role: ReplicaRole,
    ) {
        let success = self
            .store
            .update(key, Entry::new(value.clone(), self.now, role));

        self.log_replica(OpKind::Update, success, txn, key, Some(value));
        self.send(
            from,
            &Message::Reply {
                txn,
                from: self.addr,
                success,
            },
        );
    }

    /// Replica-side DELETE: remove-if-present.
    fn handle_delete(&mut self, txn: i64, from: NodeAddr, key: &str) {
        let success = self.store.delete(key);

        self.log_replica(OpKind::Delete, success, txn, key, None);
        self.send(
            from,
            &Message::Reply {
                txn,
                from: self.addr,
                success,
            },
        );
    }

    /// Coordinator-side accounting for a create/update/delete verdict.
    fn handle_reply(&mut self, txn: i64, success: bool) {
        match self.transactions.apply_reply(txn, success) {
            ReplyOutcome::Decided(record, ok) => self.log_coordinator(txn, &record, ok),
            ReplyOutcome::Pending => {}
            ReplyOutcome::Stale => {
                debug!("{}: late reply for transaction {}, dropped", self.addr, txn);
            }
        }
    }

    /// Coordinator-side accounting for a read answer. The last successful
    /// reply's value is what a success ultimately reports.
    fn handle_read_reply(&mut self, txn: i64, value: Option<String>) {
        match self.transactions.apply_read_reply(txn, value) {
            ReplyOutcome::Decided(record, ok) => self.log_coordinator(txn, &record, ok),
            ReplyOutcome::Pending => {}
            ReplyOutcome::Stale => {
                debug!(
                    "{}: late read reply for transaction {}, dropped",
                    self.addr, txn
                );
            }
        }
    }
}
