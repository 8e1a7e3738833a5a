//! Agent roster, citation tool surface, and the research session runner.
//!
//! The roster is configuration data consumed by an external agent runtime;
//! this crate defines that runtime's contract, the tools it may invoke, and
//! the end-to-end session flow that wires them to the citation registry.

mod roster;
mod runtime;
mod session;
mod tools;

pub use roster::{
    citations_agent, orchestrator_agent, planning_agent, reflection_agent, search_agent,
};
pub use runtime::{
    AgentDefinition, AgentRuntime, DynAgentRuntime, ModelTier, ScriptedRuntime, ToolSpec,
};
pub use session::{run_research_session, ResearchOutcome, SessionOptions};
pub use tools::CitationTools;
