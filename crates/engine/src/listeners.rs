//! Change listeners for a single table.
//!
//! Each listener is a channel registered under an id (one per websocket
//! connection). Sends are best-effort: a full channel drops the message, a
//! closed channel drops the listener.

use std::collections::HashMap;

use api_types::notification::{ChangeType, Notification};
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

pub type Listener<T> = mpsc::Sender<Notification<T>>;

pub struct ChangeListeners<T> {
    listeners: RwLock<HashMap<Uuid, Listener<T>>>,
}

impl<T> Default for ChangeListeners<T> {
    fn default() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Clone> ChangeListeners<T> {
    /// Register `listener` under `id`, replacing any previous one.
    pub async fn add(&self, id: Uuid, listener: Listener<T>) {
        self.listeners.write().await.insert(id, listener);
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.listeners.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.listeners.read().await.len()
    }

    pub async fn notify(&self, change: ChangeType, id: i32, item: Option<T>) {
        let notification = Notification { change, id, item };
        let mut closed = Vec::new();
        {
            let listeners = self.listeners.read().await;
            for (listener_id, tx) in listeners.iter() {
                match tx.try_send(notification.clone()) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        tracing::warn!(%listener_id, "change listener is full, dropping notification");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => closed.push(*listener_id),
                }
            }
        }

        if !closed.is_empty() {
            let mut listeners = self.listeners.write().await;
            for listener_id in closed {
                listeners.remove(&listener_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notify_reaches_every_listener() {
        let listeners = ChangeListeners::<String>::default();
        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, mut rx_b) = mpsc::channel(4);
        listeners.add(Uuid::new_v4(), tx_a).await;
        listeners.add(Uuid::new_v4(), tx_b).await;

        listeners
            .notify(ChangeType::Create, 7, Some("seven".to_string()))
            .await;

        let a = rx_a.recv().await.unwrap();
        let b = rx_b.recv().await.unwrap();
        assert_eq!(a.change, ChangeType::Create);
        assert_eq!(a.id, 7);
        assert_eq!(b.item.as_deref(), Some("seven"));
    }

    #[tokio::test]
    async fn closed_listeners_are_pruned() {
        let listeners = ChangeListeners::<String>::default();
        let (tx, rx) = mpsc::channel(1);
        listeners.add(Uuid::new_v4(), tx).await;
        drop(rx);

        listeners.notify(ChangeType::Delete, 1, None).await;

        assert_eq!(listeners.len().await, 0);
    }

    #[tokio::test]
    async fn removed_listener_gets_nothing() {
        let listeners = ChangeListeners::<String>::default();
        let id = Uuid::new_v4();
        let (tx, mut rx) = mpsc::channel(1);
        listeners.add(id, tx).await;

        assert!(listeners.remove(id).await);
        assert!(!listeners.remove(id).await);
        listeners.notify(ChangeType::Update, 3, None).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn full_listener_is_kept() {
        let listeners = ChangeListeners::<String>::default();
        let (tx, mut rx) = mpsc::channel(1);
        listeners.add(Uuid::new_v4(), tx).await;

        listeners.notify(ChangeType::Create, 1, None).await;
        listeners.notify(ChangeType::Create, 2, None).await;

        assert_eq!(listeners.len().await, 1);
        assert_eq!(rx.recv().await.unwrap().id, 1);
    }
}
