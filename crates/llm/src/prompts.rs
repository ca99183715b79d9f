//! Prompt templates for the summarization chain.
//!
//! Templates are rendered with Handlebars; escaping is disabled since the
//! output is plain text for an LLM, not HTML.

use edgar_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Map step: summarize one text unit.
const MAP_TEMPLATE: &str = "\
Write a concise summary of the following text. Keep it factual and do not \
use markdown formatting.

TEXT:
{{text}}

SUMMARY:";

/// Reduce step: combine intermediate summaries into one.
const REDUCE_TEMPLATE: &str = "\
The following are summaries of consecutive portions of a document. Combine \
them into a single coherent summary. Preserve concrete facts, dates, and \
figures; do not invent information that is not present.

SUMMARIES:
{{text}}

COMBINED SUMMARY:";

/// Stuff strategy: summarize everything in one call.
const STUFF_TEMPLATE: &str = "\
Write a concise summary of the following text. Preserve concrete facts, \
dates, and figures; do not invent information that is not present.

TEXT:
{{text}}

SUMMARY:";

/// Render a prompt template with a single `text` variable.
fn render(template: &str, text: &str) -> AppResult<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let mut variables = HashMap::new();
    variables.insert("text".to_string(), text.to_string());

    handlebars
        .render_template(template, &variables)
        .map_err(|e| AppError::Llm(format!("Failed to render prompt template: {}", e)))
}

/// Build the map-step prompt for one text unit.
pub fn map_prompt(text: &str) -> AppResult<String> {
    render(MAP_TEMPLATE, text)
}

/// Build the reduce-step prompt over joined intermediate summaries.
pub fn reduce_prompt(text: &str) -> AppResult<String> {
    render(REDUCE_TEMPLATE, text)
}

/// Build the single-call stuff prompt over joined units.
pub fn stuff_prompt(text: &str) -> AppResult<String> {
    render(STUFF_TEMPLATE, text)
}
