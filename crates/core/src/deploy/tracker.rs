//! Lifecycle of one submitted deployment.
//!
//! A chain client may report a creation transaction once (mined without a
//! separate broadcast signal), twice (broadcast, then mined) or more, and not
//! necessarily in that order. Notifications are therefore classified by what
//! they carry: one with a deployed address is the mined event, one without is
//! a broadcast. The first successful notification resolves the caller's
//! result; the mined event, whenever it comes, goes to the `MinedCallback`.

use alloy::primitives::{Address, TxHash};
use log::{debug, info, warn};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::chain::{Notification, NotificationStream};
use crate::errors::{ChainError, DeployError};
use crate::types::deployment::TransactionLifecycle;

/// Receives the outcome of a deployment after its broadcast result has been
/// returned. Runs on the tracking task, not on the caller's stack, with no
/// ordering relative to other deployments.
///
/// Any `FnMut(Address)` closure is a `MinedCallback`.
pub trait MinedCallback: Send + 'static {
    /// Called at most once, with a non-zero contract address.
    fn on_mined(&mut self, contract_address: Address);

    /// Called at most once, when the client reports an error after broadcast.
    fn on_late_failure(&mut self, error: DeployError) {
        let _ = error;
    }
}

impl<F> MinedCallback for F
where
    F: FnMut(Address) + Send + 'static,
{
    fn on_mined(&mut self, contract_address: Address) {
        self(contract_address)
    }
}

pub(crate) type BroadcastResult = Result<TxHash, DeployError>;

pub(crate) struct LifecycleTracker {
    deployment_id: Uuid,
    state: TransactionLifecycle,
    pending: Option<oneshot::Sender<BroadcastResult>>,
    callback: Option<Box<dyn MinedCallback>>,
}

impl LifecycleTracker {
    pub(crate) fn new(
        deployment_id: Uuid,
        callback: Box<dyn MinedCallback>,
    ) -> (Self, oneshot::Receiver<BroadcastResult>) {
        let (tx, rx) = oneshot::channel();
        let tracker = Self {
            deployment_id,
            state: TransactionLifecycle::Pending,
            pending: Some(tx),
            callback: Some(callback),
        };
        (tracker, rx)
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> TransactionLifecycle {
        self.state
    }

    pub(crate) fn spawn(self, notifications: NotificationStream) -> JoinHandle<TransactionLifecycle> {
        tokio::spawn(self.run(notifications))
    }

    pub(crate) async fn run(mut self, mut notifications: NotificationStream) -> TransactionLifecycle {
        while let Some(notification) = notifications.recv().await {
            self.handle(notification);
            if self.state.is_terminal() {
                break;
            }
        }
        self.finish();
        self.state
    }

    pub(crate) fn handle(&mut self, notification: Notification) {
        match notification {
            Err(error) => self.on_error(error),
            Ok(notice) => match notice.contract_address() {
                Some(address) => self.on_mined(notice.transaction_hash, address),
                None => self.on_broadcast(notice.transaction_hash),
            },
        }
    }

    fn on_broadcast(&mut self, tx_hash: Option<TxHash>) {
        match self.state {
            TransactionLifecycle::Pending => {
                if let Some(hash) = self.resolve(tx_hash) {
                    info!("[{}] Deployment broadcast in {}", self.deployment_id, hash);
                }
            }
            _ => debug!(
                "[{}] Ignoring broadcast notification in state {:?}",
                self.deployment_id, self.state
            ),
        }
    }

    fn on_mined(&mut self, tx_hash: Option<TxHash>, contract_address: Address) {
        let tx_hash = match self.state {
            TransactionLifecycle::Pending => match self.resolve(tx_hash) {
                Some(hash) => hash,
                None => return,
            },
            TransactionLifecycle::Broadcast { tx_hash: known } => {
                if tx_hash.is_some_and(|hash| hash != known) {
                    warn!(
                        "[{}] Mined notification hash {:?} differs from broadcast hash {}",
                        self.deployment_id, tx_hash, known
                    );
                }
                known
            }
            TransactionLifecycle::Mined { .. } | TransactionLifecycle::Failed => {
                debug!(
                    "[{}] Ignoring mined notification in state {:?}",
                    self.deployment_id, self.state
                );
                return;
            }
        };

        self.state = TransactionLifecycle::Mined {
            tx_hash,
            contract_address,
        };
        info!(
            "[{}] Contract deployed at {} (tx {})",
            self.deployment_id, contract_address, tx_hash
        );
        if let Some(mut callback) = self.callback.take() {
            callback.on_mined(contract_address);
        }
    }

    fn on_error(&mut self, error: ChainError) {
        match self.state {
            TransactionLifecycle::Pending => {
                warn!(
                    "[{}] Deployment submission failed: {}",
                    self.deployment_id, error
                );
                self.reject(DeployError::DeploymentSubmissionFailed(error));
            }
            TransactionLifecycle::Broadcast { tx_hash } => {
                warn!(
                    "[{}] Deployment {} failed after broadcast: {}",
                    self.deployment_id, tx_hash, error
                );
                self.state = TransactionLifecycle::Failed;
                if let Some(mut callback) = self.callback.take() {
                    callback.on_late_failure(DeployError::LateDeploymentFailure(error));
                }
            }
            TransactionLifecycle::Mined { .. } | TransactionLifecycle::Failed => debug!(
                "[{}] Ignoring error in state {:?}: {}",
                self.deployment_id, self.state, error
            ),
        }
    }

    /// Hands the broadcast hash to the caller, or rejects when there is none.
    fn resolve(&mut self, tx_hash: Option<TxHash>) -> Option<TxHash> {
        match tx_hash.filter(|hash| !hash.is_zero()) {
            Some(hash) => {
                self.state = TransactionLifecycle::Broadcast { tx_hash: hash };
                self.send(Ok(hash));
                Some(hash)
            }
            None => {
                warn!(
                    "[{}] Notification without a transaction hash",
                    self.deployment_id
                );
                self.reject(DeployError::IncompleteResult("transaction hash"));
                None
            }
        }
    }

    fn reject(&mut self, error: DeployError) {
        self.state = TransactionLifecycle::Failed;
        self.callback = None;
        self.send(Err(error));
    }

    fn send(&mut self, result: BroadcastResult) {
        if let Some(pending) = self.pending.take() {
            if pending.send(result).is_err() {
                debug!("[{}] Caller stopped waiting", self.deployment_id);
            }
        }
    }

    fn finish(&mut self) {
        match self.state {
            TransactionLifecycle::Pending => {
                self.reject(DeployError::DeploymentSubmissionFailed(
                    "notification channel closed before broadcast".into(),
                ));
            }
            TransactionLifecycle::Broadcast { tx_hash } => {
                warn!(
                    "[{}] Stopped tracking {} before it was mined",
                    self.deployment_id, tx_hash
                );
                self.callback = None;
            }
            TransactionLifecycle::Mined { .. } | TransactionLifecycle::Failed => {}
        }
    }
}
