//! Process-wide commit/rollback switch consulted by `with_txn`.

use std::sync::OnceLock;

/// What `with_txn` does with a transaction whose closure returned `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit on success (production).
    CommitOnOk,
    /// Roll back even on success, so suites against a shared database leave no rows behind.
    RollbackOnOk,
}

impl TxnPolicy {
    /// Parse `commit` / `rollback` (case-insensitive); anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "commit" => Some(TxnPolicy::CommitOnOk),
            "rollback" => Some(TxnPolicy::RollbackOnOk),
            _ => None,
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current policy; `CommitOnOk` until something sets it.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// First call wins; later calls are ignored.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
