use async_trait::async_trait;

use crate::domain::SearchOutcome;

/// Sends a query to an external web-search provider.
///
/// Never fails: transport and provider problems are reported as
/// [`SearchOutcome::Error`] so a broken search never blocks the completion call.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(&self, query: &str) -> SearchOutcome;

    fn provider_name(&self) -> &str;
}
