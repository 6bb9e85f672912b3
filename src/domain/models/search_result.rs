use serde::{Deserialize, Serialize};

/// Maximum number of results kept from a single provider response.
pub const MAX_SEARCH_RESULTS: usize = 3;

const HEADER: &str = "### 搜索结果 ###";
const NO_RESULTS: &str = "未找到相关搜索结果";
const ERROR_LABEL: &str = "搜索错误";
const MISSING_TITLE: &str = "无标题";
const MISSING_SNIPPET: &str = "无摘要";
const MISSING_LINK: &str = "无链接";

/// One organic hit returned by the search provider.
///
/// Every field is optional because providers routinely omit snippets or titles;
/// placeholders are substituted at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

impl SearchResult {
    pub fn new(
        title: Option<String>,
        snippet: Option<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            title,
            snippet,
            link,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn snippet(&self) -> Option<&str> {
        self.snippet.as_deref()
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    fn render_block(&self, rank: usize) -> String {
        format!(
            "\n**结果 {}**:\n标题: {}\n摘要: {}\n链接: {}",
            rank,
            self.title().unwrap_or(MISSING_TITLE),
            self.snippet().unwrap_or(MISSING_SNIPPET),
            self.link().unwrap_or(MISSING_LINK),
        )
    }
}

/// Result of asking the search provider about a query.
///
/// Success, an empty result set and provider failure are kept apart so the
/// orchestrator decides how each is presented to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Results(Vec<SearchResult>),
    Empty,
    Error(String),
}

impl SearchOutcome {
    /// Build an outcome from provider hits, keeping the first
    /// [`MAX_SEARCH_RESULTS`] in the order they were ranked.
    pub fn from_results(mut results: Vec<SearchResult>) -> Self {
        if results.is_empty() {
            return Self::Empty;
        }
        results.truncate(MAX_SEARCH_RESULTS);
        Self::Results(results)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn result_count(&self) -> usize {
        match self {
            Self::Results(results) => results.len(),
            _ => 0,
        }
    }

    /// Render the outcome as the text block handed to the model.
    pub fn render(&self) -> String {
        match self {
            Self::Results(results) => {
                let mut lines = Vec::with_capacity(results.len() + 1);
                lines.push(HEADER.to_string());
                lines.extend(
                    results
                        .iter()
                        .enumerate()
                        .map(|(i, r)| r.render_block(i + 1)),
                );
                lines.join("\n")
            }
            Self::Empty => format!("{HEADER}\n\n{NO_RESULTS}"),
            Self::Error(msg) => format!("{ERROR_LABEL}: {msg}"),
        }
    }
}
