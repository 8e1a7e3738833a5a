//! The agent roster: names, instructions, model tiers, and declared tools.
//!
//! Pure configuration data. Orchestrator instructions are rebuilt per
//! invocation so they carry the current date.

use chrono::NaiveDate;
use deepcite_core::CitationStyle;

use crate::runtime::{AgentDefinition, ModelTier, ToolSpec};

pub const TOOL_SEARCH_WITH_CITATIONS: ToolSpec = ToolSpec {
    name: "search_with_citations",
    description: "Searches the web and registers a citation for every result",
};
pub const TOOL_ADD_MANUAL_CITATION: ToolSpec = ToolSpec {
    name: "add_manual_citation",
    description: "Manually registers a citation source",
};
pub const TOOL_INLINE_CITATION: ToolSpec = ToolSpec {
    name: "inline_citation",
    description: "Formats an inline citation marker for comma-separated source IDs",
};
pub const TOOL_GENERATE_BIBLIOGRAPHY: ToolSpec = ToolSpec {
    name: "generate_bibliography",
    description: "Renders the complete bibliography in apa, mla, chicago, or web style",
};
pub const TOOL_CITATION_SUMMARY: ToolSpec = ToolSpec {
    name: "citation_summary",
    description: "Reports totals and per-domain counts for collected citations",
};
pub const TOOL_LOG_STATUS: ToolSpec = ToolSpec {
    name: "log_status",
    description: "Writes a progress line to the status stream",
};

pub fn planning_agent() -> AgentDefinition {
    AgentDefinition {
        name: "PlanningAgent",
        instructions: "Create a comprehensive step-by-step research plan for the user's \
                       request. Consider what types of sources will be needed and how they \
                       should be cited. Emit one numbered search question per line and use \
                       log_status to communicate your planning process."
            .to_string(),
        model: ModelTier::Pro,
        tools: vec![TOOL_LOG_STATUS],
    }
}

pub fn search_agent() -> AgentDefinition {
    AgentDefinition {
        name: "SearchAgent",
        instructions: "Search the web for relevant information using \
                       search_with_citations, which registers a citation for every source \
                       found. Focus on credible, recent sources and always mention \
                       citation IDs when referring to specific results."
            .to_string(),
        model: ModelTier::Flash,
        tools: vec![
            TOOL_SEARCH_WITH_CITATIONS,
            TOOL_LOG_STATUS,
            TOOL_ADD_MANUAL_CITATION,
        ],
    }
}

pub fn citations_agent() -> AgentDefinition {
    AgentDefinition {
        name: "CitationsAgent",
        instructions: "You are a citation specialist. Review sources for credibility, \
                       generate inline citations with inline_citation, and produce \
                       bibliographies with generate_bibliography. Be meticulous about \
                       citation accuracy and recommend a style suited to the topic."
            .to_string(),
        model: ModelTier::Pro,
        tools: vec![
            TOOL_INLINE_CITATION,
            TOOL_GENERATE_BIBLIOGRAPHY,
            TOOL_CITATION_SUMMARY,
            TOOL_LOG_STATUS,
        ],
    }
}

pub fn reflection_agent() -> AgentDefinition {
    AgentDefinition {
        name: "ReflectionAgent",
        instructions: "Review the completed research for citation completeness, source \
                       quality, comprehensiveness, and format consistency. Suggest \
                       specific improvements and identify gaps."
            .to_string(),
        model: ModelTier::Flash,
        tools: vec![TOOL_CITATION_SUMMARY, TOOL_LOG_STATUS],
    }
}

pub fn orchestrator_agent(today: NaiveDate, style: CitationStyle) -> AgentDefinition {
    let instructions = format!(
        "You are coordinating a cited research session. Current date: {today}.\n\n\
         WORKFLOW:\n\
         1. Use planning_agent to create the research plan\n\
         2. Use search_agent to find and cite sources\n\
         3. Use citations_agent to format citations professionally\n\
         4. Use reflection_agent to review quality\n\
         5. Provide the final report with proper citations\n\n\
         CITATION REQUIREMENTS:\n\
         - Every factual claim carries an inline citation\n\
         - Use {} citation style throughout\n\
         - Close with the complete bibliography\n\n\
         Use log_status to keep the operator informed of progress.",
        style.name().to_uppercase()
    );

    AgentDefinition {
        name: "OrchestratorAgent",
        instructions,
        model: ModelTier::Pro,
        tools: vec![
            TOOL_LOG_STATUS,
            TOOL_GENERATE_BIBLIOGRAPHY,
            TOOL_CITATION_SUMMARY,
        ],
    }
}
