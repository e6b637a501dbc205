// Cold mail generation: job extraction, email drafting and the run orchestration.
// All LLM calls go through llm_client; nothing here talks to the provider directly.

pub mod email_writer;
pub mod handlers;
pub mod job_extractor;
pub mod pipeline;
pub mod prompts;
