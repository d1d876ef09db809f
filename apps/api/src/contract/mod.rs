// Loan contract workflow: prompt building, the single generation call,
// rendering, and the HTTP handlers that expose them.
// All generation calls go through llm_client::TextGenerator.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod requestor;
