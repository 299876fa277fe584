//! "Goals changed" notifications between the goal form and the goal list.
//!
//! Backed by a [`tokio::sync::watch`] generation counter: the form bumps it
//! after a successful create, and every subscriber wakes once per bump it has
//! not seen yet. Several quick bumps coalesce into one wake-up, which is all a
//! full refetch needs.

use std::sync::Arc;

use tokio::sync::watch;

/// Publisher side. Clones publish into the same channel.
#[derive(Clone, Debug)]
pub struct GoalEvents {
    tx: Arc<watch::Sender<u64>>,
}

/// Receiver side, one per subscribing controller.
#[derive(Debug)]
pub struct GoalSubscriber {
    rx: watch::Receiver<u64>,
}

impl Default for GoalEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalEvents {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Announce that the server-side goal collection changed.
    pub fn publish(&self) {
        self.tx.send_modify(|generation| *generation += 1);
        tracing::debug!(generation = *self.tx.borrow(), "goals changed");
    }

    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Subscribe to changes published after this call.
    pub fn subscribe(&self) -> GoalSubscriber {
        GoalSubscriber {
            rx: self.tx.subscribe(),
        }
    }
}

impl GoalSubscriber {
    /// Wait for the next unseen change. Returns `false` once every publisher
    /// has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
