use crate::shared::core::primitives::{RoomCode, UserId};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const FEED_CAPACITY: usize = 256;

/// A record set that changed in the store. Subscribers re-read what they
/// need; the notice carries no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Sessions { owner: UserId },
    Tasks { owner: UserId },
    Goals { owner: UserId },
    Room { code: RoomCode },
}

#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<Change>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(FEED_CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, change: Change) {
        // No subscribers is fine.
        let _ = self.sender.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.sender.subscribe()
    }
}

/// Background task that lives exactly as long as its handle.
#[derive(Debug)]
pub struct ScopedTask {
    handle: JoinHandle<()>,
}

impl ScopedTask {
    pub fn spawn<F>(future: F) -> Self
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
