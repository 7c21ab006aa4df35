// Reflection pipeline: entry extraction, prompt templates, and the run itself.
// Outbound calls go through notion::JournalStore and llm_client::ReflectionGenerator.

pub mod entry;
pub mod prompts;
pub mod runner;
