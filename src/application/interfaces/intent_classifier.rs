/// Decides whether an utterance should be answered with fresh web-search context.
///
/// Implementations must be pure: the same utterance always yields the same
/// decision and no prior turns are consulted.
pub trait IntentClassifier: Send + Sync {
    fn needs_search(&self, utterance: &str) -> bool;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}
