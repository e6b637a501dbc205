// Page retrieval and text normalization ahead of the LLM stages.

pub mod cleaner;
pub mod fetcher;
