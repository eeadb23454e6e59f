// Presentation surface trait - Where rendered snapshots go
use crate::domain::session::SessionSnapshot;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PresentationSurface: Send + Sync {
    /// Receive a read-only snapshot of the whole session
    async fn render(&self, snapshot: Arc<SessionSnapshot>) -> anyhow::Result<()>;
}
