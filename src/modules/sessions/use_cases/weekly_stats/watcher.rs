use crate::modules::sessions::core::aggregate::StudyStats;
use crate::modules::sessions::use_cases::weekly_stats::handler::WeeklyStatsHandler;
use crate::shared::core::primitives::UserId;
use crate::shared::infrastructure::change_feed::{Change, ChangeFeed, ScopedTask};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;

/// Live statistics for one owner. Recomputes from scratch whenever that
/// owner's sessions, tasks or goals change. Dropping the watcher stops
/// listening.
pub struct StatsWatcher {
    receiver: watch::Receiver<Option<StudyStats>>,
    _task: ScopedTask,
}

impl StatsWatcher {
    pub fn spawn(handler: Arc<WeeklyStatsHandler>, feed: &ChangeFeed, owner: UserId) -> Self {
        let mut changes = feed.subscribe();
        let (sender, receiver) = watch::channel(None);

        let task = ScopedTask::spawn(async move {
            recompute(&handler, &owner, &sender).await;
            loop {
                match changes.recv().await {
                    Ok(change) if affects(&change, &owner) => {
                        recompute(&handler, &owner, &sender).await
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(owner = %owner, skipped, "stats watcher lagged, recomputing");
                        recompute(&handler, &owner, &sender).await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Self {
            receiver,
            _task: task,
        }
    }

    /// Latest statistics, `None` until the first computation finishes.
    pub fn current(&self) -> Option<StudyStats> {
        self.receiver.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<StudyStats>> {
        self.receiver.clone()
    }
}

fn affects(change: &Change, owner: &str) -> bool {
    match change {
        Change::Sessions { owner: changed }
        | Change::Tasks { owner: changed }
        | Change::Goals { owner: changed } => changed == owner,
        Change::Room { .. } => false,
    }
}

// A failed read keeps the previous value.
async fn recompute(
    handler: &WeeklyStatsHandler,
    owner: &str,
    sender: &watch::Sender<Option<StudyStats>>,
) {
    match handler.compute(owner).await {
        Ok(stats) => {
            sender.send_replace(Some(stats));
        }
        Err(err) => tracing::error!(owner, error = %err, "failed to recompute study stats"),
    }
}
