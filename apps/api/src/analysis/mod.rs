// Resume analysis: validation, prompting, score extraction, aggregation and export.
// Report generation goes through llm_client; embeddings through similarity.

pub mod aggregator;
pub mod export;
pub mod handlers;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
pub mod scores;
pub mod validation;
