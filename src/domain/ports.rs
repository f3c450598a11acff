use crate::domain::model::{ProviderOutcome, Query};
use async_trait::async_trait;

/// A retail source that can look up one model.
///
/// Implementations own their own deadlines and error recovery: a network or
/// parse failure comes back as `ProviderOutcome::Failed`, never as a panic or
/// an `Err` the caller must handle.
#[async_trait]
pub trait Provider: Send + Sync {
    fn id(&self) -> &str;

    async fn search(&self, query: &Query) -> ProviderOutcome;
}
