// Match analysis engine.
// MatchAnalyzer picks the remote scorer when configured and falls back to
// KeywordScorer on any remote failure. All LLM calls go through llm_client.

pub mod analyzer;
pub mod handlers;
pub mod keyword_scorer;
pub mod normalize;
pub mod prompts;
pub mod remote_scorer;
