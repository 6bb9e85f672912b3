use crate::application::IntentClassifier;

/// Cues that the user wants current or quantitative facts
/// ("search", "latest", "now", "today", "how much", "incumbent", ...).
const TRIGGER_KEYWORDS: &[&str] = &[
    "搜索", "查询", "最新", "现在", "今天", "最近", "目前", "多少", "多高", "多大", "现任",
];

/// Interrogative markers: question marks (ASCII and full-width) and
/// "what is", "why", "how is", "how to", "when", "where", "which".
const QUESTION_PATTERNS: &[&str] = &[
    "?", "？", "是什么", "为什么", "怎么样", "如何", "何时", "哪里", "哪些",
];

/// A lexical, stateless [`IntentClassifier`] that requires no external services.
///
/// An utterance needs search when it contains any trigger keyword or any
/// interrogative pattern. Matching is plain substring containment, so
/// imperative requests for current data without either cue ("告诉我汇率")
/// are not detected.
pub struct KeywordIntentClassifier {
    keywords: Vec<String>,
    patterns: Vec<String>,
}

impl Default for KeywordIntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordIntentClassifier {
    pub fn new() -> Self {
        Self {
            keywords: TRIGGER_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            patterns: QUESTION_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add extra trigger keywords, e.g. English cues like "latest".
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords
            .extend(keywords.into_iter().map(Into::<String>::into).filter(|k| !k.is_empty()));
        self
    }

    /// Add extra interrogative patterns.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns
            .extend(patterns.into_iter().map(Into::<String>::into).filter(|p| !p.is_empty()));
        self
    }

    fn has_trigger(&self, utterance: &str) -> bool {
        self.keywords.iter().any(|k| utterance.contains(k.as_str()))
    }

    fn is_question(&self, utterance: &str) -> bool {
        self.patterns.iter().any(|p| utterance.contains(p.as_str()))
    }
}

impl IntentClassifier for KeywordIntentClassifier {
    fn needs_search(&self, utterance: &str) -> bool {
        self.has_trigger(utterance) || self.is_question(utterance)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
