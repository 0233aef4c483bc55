pub mod ast;
pub mod config;
pub(crate) mod context;
pub(crate) mod converter;
pub mod errors;
pub mod metrics;
pub mod naming;
pub mod orchestrator;
pub(crate) mod postprocess;
pub mod registry;
pub mod schema;

#[cfg(test)]
mod tests;
