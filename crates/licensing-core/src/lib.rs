pub mod actions;
pub mod catalog;
pub mod citations;
pub mod client;
pub mod error;
pub mod grouping;
pub mod mcp_api;
pub mod model;
pub mod orchestrator;
pub mod summary;
pub mod synthesis;

#[cfg(test)]
pub(crate) mod fixtures;
