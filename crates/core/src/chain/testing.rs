use alloy::primitives::{Address, B256, address};
use std::sync::Mutex;
use tokio::sync::mpsc;

use super::{ChainClient, DeploymentNotice, Notification, NotificationStream};
use crate::actions::contract_creation::ContractCreation;

pub(crate) const SENDER: Address = address!("0x5F2F11ad8656439d5C14d9B351f8b09cDaC2A02d");

pub(crate) fn hash(n: u8) -> B256 {
    B256::with_last_byte(n)
}

pub(crate) fn contract(n: u8) -> Address {
    Address::with_last_byte(n)
}

pub(crate) fn broadcast(n: u8) -> Notification {
    Ok(DeploymentNotice::broadcast(hash(n)))
}

pub(crate) fn mined(n: u8, at: u8) -> Notification {
    Ok(DeploymentNotice::mined(hash(n), contract(at)))
}

pub(crate) fn failure(message: &str) -> Notification {
    Err(message.to_string().into())
}

/// In-memory chain client. Notifications queued with `script` are delivered
/// as soon as a creation is submitted; `notify` pushes more afterwards.
#[derive(Default)]
pub(crate) struct ScriptedChainClient {
    script: Mutex<Vec<Notification>>,
    submissions: Mutex<Vec<ContractCreation>>,
    channels: Mutex<Vec<mpsc::UnboundedSender<Notification>>>,
}

impl ScriptedChainClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script(self, notifications: Vec<Notification>) -> Self {
        *self.script.lock().unwrap() = notifications;
        self
    }

    pub(crate) fn notify(&self, notification: Notification) {
        if let Some(tx) = self.channels.lock().unwrap().last() {
            let _ = tx.send(notification);
        }
    }

    /// Drops every open channel, as a client giving up on its deployments.
    pub(crate) fn close(&self) {
        self.channels.lock().unwrap().clear();
    }

    pub(crate) fn submissions(&self) -> Vec<ContractCreation> {
        self.submissions.lock().unwrap().clone()
    }
}

impl ChainClient for ScriptedChainClient {
    fn sender(&self) -> Address {
        SENDER
    }

    fn submit_contract_creation(&self, creation: ContractCreation) -> NotificationStream {
        self.submissions.lock().unwrap().push(creation);
        let (tx, rx) = mpsc::unbounded_channel();
        for notification in self.script.lock().unwrap().drain(..) {
            let _ = tx.send(notification);
        }
        self.channels.lock().unwrap().push(tx);
        rx
    }
}
