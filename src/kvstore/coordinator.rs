//! Coordinator State
//!
//! The transaction table tracking every outstanding client operation this
//! node coordinates, plus the four client entry points that fan an operation
//! out to its replica set.
//!
//! ## Quorum Rule
//! Replication factor is 3; 2 concurring replies are the smallest set that
//! intersects any other such set, so the first side to reach 2 decides the
//! outcome. The record is removed the moment a verdict is reached (or when it
//! times out), which is what makes a late third reply a harmless no-op.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::oplog::OpKind;
use crate::ring::placement::ROLE_ORDER;

use super::node::KvNode;
use super::protocol::Message;

/// Ticks before an undecided transaction is declared failed.
pub const TIME_OUT: u64 = 10;

/// Concurring replies needed to finalize an outcome.
pub const QUORUM: u8 = 2;

/// Process-wide transaction id allocator, shared by every coordinator in the
/// emulation. Ids only need to be unique per coordinator; a single monotonic
/// counter satisfies that trivially.
#[derive(Debug, Clone, Default)]
pub struct TxnIds(Arc<AtomicI64>);

impl TxnIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Coordinator-side state of one outstanding client operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub kind: OpKind,
    /// Tick at which the coordinator issued the fan-out.
    pub created: u64,
    pub success: u8,
    pub failure: u8,
    pub key: String,
    /// For writes, the value being written; for reads, the value of the last
    /// successful reply (so the final outcome reports what a replica held).
    pub value: String,
}

/// What a reply did to its transaction.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Quorum reached; the record is finalized and removed.
    Decided(Transaction, bool),
    /// Counted, but still short of quorum.
    Pending,
    /// No such transaction (already decided or expired). The reply is stale
    /// and must be dropped without logging.
    Stale,
}

/// Outstanding transactions keyed by id.
#[derive(Debug, Default)]
pub struct TransactionTable {
    entries: HashMap<i64, Transaction>,
}

impl TransactionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, txn: i64, record: Transaction) {
        self.entries.insert(txn, record);
    }

    /// Accounts a REPLY (create/update/delete verdict) to its transaction.
    pub fn apply_reply(&mut self, txn: i64, success: bool) -> ReplyOutcome {
        let verdict = match self.entries.get_mut(&txn) {
            Some(record) => {
                if success {
                    record.success += 1;
                } else {
                    record.failure += 1;
                }
                record.verdict()
            }
            None => return ReplyOutcome::Stale,
        };
        self.finalize(txn, verdict)
    }

    /// Accounts a READREPLY. A carried value counts as a success and becomes
    /// the transaction's reported value; an absent one counts as a failure.
    pub fn apply_read_reply(&mut self, txn: i64, value: Option<String>) -> ReplyOutcome {
        let verdict = match self.entries.get_mut(&txn) {
            Some(record) => {
                match value {
                    Some(value) => {
                        record.success += 1;
                        record.value = value;
                    }
                    None => record.failure += 1,
                }
                record.verdict()
            }
            None => return ReplyOutcome::Stale,
        };
        self.finalize(txn, verdict)
    }

    /// Removes and returns every transaction older than `TIME_OUT`.
    pub fn sweep_expired(&mut self, now: u64) -> Vec<(i64, Transaction)> {
        let expired: Vec<i64> = self
            .entries
            .iter()
            .filter(|(_, record)| now.saturating_sub(record.created) > TIME_OUT)
            .map(|(&txn, _)| txn)
            .collect();

        expired
            .into_iter()
            .filter_map(|txn| self.entries.remove(&txn).map(|record| (txn, record)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, txn: i64) -> Option<&Transaction> {
        self.entries.get(&txn)
    }

    fn finalize(&mut self, txn: i64, verdict: Option<bool>) -> ReplyOutcome {
        match verdict {
            Some(ok) => match self.entries.remove(&txn) {
                Some(record) => ReplyOutcome::Decided(record, ok),
                None => ReplyOutcome::Stale,
            },
            None => ReplyOutcome::Pending,
        }
    }
}

impl Transaction {
    fn verdict(&self) -> Option<bool> {
        if self.success == QUORUM {
            Some(true)
        } else if self.failure == QUORUM {
            Some(false)
        } else {
            None
        }
    }
}

impl KvNode {
    /// Client entry point: replicate a fresh key across its replica set.
    pub fn client_create(&mut self, key: &str, value: &str) -> i64 {
        self.begin(OpKind::Create, key, value)
    }

    /// Client entry point: read a key from its replica set.
    pub fn client_read(&mut self, key: &str) -> i64 {
        self.begin(OpKind::Read, key, "")
    }

    /// Client entry point: overwrite a key across its replica set.
    pub fn client_update(&mut self, key: &str, value: &str) -> i64 {
        self.begin(OpKind::Update, key, value)
    }

    /// Client entry point: remove a key from its replica set.
    pub fn client_delete(&mut self, key: &str) -> i64 {
        self.begin(OpKind::Delete, key, "")
    }

    /// Allocates a transaction id, fans the operation out to the replica set
    /// and registers the transaction. Returns the id so callers can match
    /// the eventual outcome. With fewer than three live peers the fan-out is
    /// empty and the transaction can only expire.
    fn begin(&mut self, kind: OpKind, key: &str, value: &str) -> i64 {
        let txn = self.txn_ids.next();
        let replicas = self.ring.find_replicas(key);

        for (replica, role) in replicas.iter().zip(ROLE_ORDER) {
            let message = match kind {
                OpKind::Create => Message::Create {
                    txn,
                    from: self.addr,
                    key: key.to_string(),
                    value: value.to_string(),
                    role,
                },
                OpKind::Read => Message::Read {
                    txn,
                    from: self.addr,
                    key: key.to_string(),
                },
                OpKind::Update => Message::Update {
                    txn,
                    from: self.addr,
                    key: key.to_string(),
                    value: value.to_string(),
                    role,
                },
                OpKind::Delete => Message::Delete {
                    txn,
                    from: self.addr,
                    key: key.to_string(),
                },
            };
            self.send(replica.addr, &message);
        }

        debug!(
            "{}: {} {} fanned out to {} replicas as transaction {}",
            self.addr,
            kind,
            key,
            replicas.len(),
            txn
        );

        self.transactions.register(
            txn,
            Transaction {
                kind,
                created: self.now,
                success: 0,
                failure: 0,
                key: key.to_string(),
                value: value.to_string(),
            },
        );
        txn
    }
}
