//! Axum route handlers for the Contract API.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::contract::generator::{generate_contract, render_blocking};
use crate::contract::prompts::REQUIRED_SECTIONS;
use crate::errors::AppError;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::models::loan::{default_term_months, FieldError, LoanRequest};
use crate::render::{render_contract, CONTRACT_FILE_NAME, PDF_MIME};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Form submission. Missing fields deserialize to values that fail validation,
/// so the client gets the full list of problems instead of a parse error.
#[derive(Debug, Deserialize)]
pub struct ContractSubmission {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub borrower_name: String,
    #[serde(default)]
    pub principal: u64,
    #[serde(default)]
    pub annual_rate_percent: f64,
    #[serde(default = "default_term_months")]
    pub term_months: u32,
}

impl ContractSubmission {
    /// Splits the credential from the loan parameters. A blank key counts as absent.
    pub fn into_parts(self) -> (Option<String>, LoanRequest) {
        let api_key = self.api_key.filter(|k| !k.trim().is_empty());
        let request = LoanRequest {
            borrower_name: self.borrower_name,
            principal: self.principal,
            annual_rate_percent: self.annual_rate_percent,
            term_months: self.term_months,
        };
        (api_key, request)
    }
}

#[derive(Debug, Serialize)]
pub struct ContractResponse {
    pub contract_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub contract_text: String,
    pub file_name: &'static str,
    pub page_count: usize,
    pub pdf_base64: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub contract_text: String,
}

#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    pub sections: &'static [&'static str],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/contracts
///
/// Validates the loan terms, drafts the contract with one generation call and
/// returns the text together with the rendered PDF as base64.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<ContractSubmission>, JsonRejection>,
) -> Result<Json<ContractResponse>, AppError> {
    let Json(submission) = payload?;
    let (api_key, request) = submission.into_parts();

    let mut errors = request.validate().err().unwrap_or_default();
    let generator = resolve_generator(&state, api_key)?;
    if generator.is_none() {
        errors.push(FieldError::new("api_key", "An API key is required"));
    }

    let generator = match generator {
        Some(generator) if errors.is_empty() => generator,
        _ => return Err(AppError::Validation(errors)),
    };

    let contract =
        generate_contract(generator.as_ref(), &state.config.lender_name, request).await?;

    Ok(Json(ContractResponse {
        contract_id: contract.contract_id,
        generated_at: contract.generated_at,
        pdf_base64: STANDARD.encode(&contract.document.bytes),
        page_count: contract.document.page_count,
        file_name: CONTRACT_FILE_NAME,
        contract_text: contract.contract_text,
    }))
}

/// POST /api/v1/contracts/render
///
/// Renders caller-supplied contract text and returns the PDF as a download.
pub async fn handle_render(
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload?;
    let (_, document) = render_blocking(req.contract_text, render_contract).await?;
    info!(pages = document.page_count, "Rendered supplied contract text");

    let headers = [
        (header::CONTENT_TYPE, PDF_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{CONTRACT_FILE_NAME}\""),
        ),
    ];
    Ok((headers, document.bytes).into_response())
}

/// GET /api/v1/contracts/sections
pub async fn handle_sections() -> Json<SectionsResponse> {
    Json(SectionsResponse {
        sections: REQUIRED_SECTIONS,
    })
}

/// A per-request key wins over the configured one.
fn resolve_generator(
    state: &AppState,
    api_key: Option<String>,
) -> Result<Option<Arc<dyn TextGenerator>>, AppError> {
    match api_key {
        Some(key) => {
            let client: Arc<dyn TextGenerator> =
                Arc::new(LlmClient::new(state.config.llm_settings(&key))?);
            Ok(Some(client))
        }
        None => Ok(state.llm.clone()),
    }
}
