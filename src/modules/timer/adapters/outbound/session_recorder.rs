use crate::shared::core::primitives::CurrentUser;
use async_trait::async_trait;

/// Receives finished focus phases from a running timer.
#[async_trait]
pub trait SessionRecorder: Send + Sync {
    async fn record(&self, user: &CurrentUser, minutes: u32) -> anyhow::Result<()>;
}
