use async_trait::async_trait;

use crate::application::SearchGateway;
use crate::domain::{SearchOutcome, SearchResult};

/// Offline [`SearchGateway`] returning one canned result derived from the query.
pub struct MockSearch;

impl MockSearch {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchGateway for MockSearch {
    async fn search(&self, query: &str) -> SearchOutcome {
        SearchOutcome::from_results(vec![SearchResult::new(
            Some(format!("Mock result for {query}")),
            Some("Canned snippet from the offline search provider.".to_string()),
            Some("https://example.invalid/mock".to_string()),
        )])
    }

    fn provider_name(&self) -> &str {
        "mock-search"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_single_result_mentioning_query() {
        let outcome = MockSearch::new().search("rust").await;
        assert_eq!(outcome.result_count(), 1);
        assert!(outcome.render().contains("Mock result for rust"));
    }
}
