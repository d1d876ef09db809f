//! Content Requestor: loan parameters in, drafted contract text out.
//!
//! The requestor trusts its input: callers validate the `LoanRequest` first.
//! It performs exactly one generation call and never retries.

use tracing::info;

use crate::contract::prompts::{CONTRACT_PROMPT_TEMPLATE, REQUIRED_SECTIONS};
use crate::llm_client::prompts::FORMAL_LEGAL_SYSTEM;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::loan::LoanRequest;

/// Formats a rate the way people write it: always at least one decimal place.
///
/// `5.0 → "5.0"`, `7.25 → "7.25"`, `12.3 → "12.3"`.
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{rate:.1}")
    } else {
        format!("{rate}")
    }
}

fn format_sections(sections: &[&str]) -> String {
    sections
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the drafting prompt. Pure: the same inputs always give the same string.
pub fn build_contract_prompt(lender: &str, request: &LoanRequest) -> String {
    CONTRACT_PROMPT_TEMPLATE
        .replace("{lender}", lender)
        .replace("{principal}", &request.principal.to_string())
        .replace("{rate}", &format_rate(request.annual_rate_percent))
        .replace("{term}", &request.term_months.to_string())
        .replace("{sections}", &format_sections(REQUIRED_SECTIONS))
        .replace("{borrower}", request.borrower())
}

/// Asks the generator for a contract and returns its raw text.
pub async fn request_contract_text(
    generator: &dyn TextGenerator,
    lender: &str,
    request: &LoanRequest,
) -> Result<String, LlmError> {
    let prompt = build_contract_prompt(lender, request);
    let text = generator.complete(FORMAL_LEGAL_SYSTEM, &prompt).await?;
    info!(chars = text.len(), "Contract text generated");
    Ok(text)
}
