//! Contract generation for one user-triggered run.
//!
//! Flow: validated LoanRequest → requestor (one LLM call) → renderer
//! (`spawn_blocking`) → GeneratedContract.
//!
//! A failed generation call returns before the renderer is touched, so no
//! partial document is ever produced. Truncated completions are rejected by
//! the client as a request error rather than rendered.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::contract::requestor::request_contract_text;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::loan::LoanRequest;
use crate::render::{render_contract, RenderError, RenderedDocument};

/// Output of a successful run.
#[derive(Debug, Clone)]
pub struct GeneratedContract {
    pub contract_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub contract_text: String,
    pub document: RenderedDocument,
}

/// Runs the renderer off the async executor.
pub async fn render_blocking<F>(
    text: String,
    renderer: F,
) -> Result<(String, RenderedDocument), AppError>
where
    F: FnOnce(&str) -> Result<RenderedDocument, RenderError> + Send + 'static,
{
    let (text, rendered) = tokio::task::spawn_blocking(move || {
        let rendered = renderer(&text);
        (text, rendered)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))?;

    Ok((text, rendered?))
}

/// Generates and renders a contract with the standard renderer.
pub async fn generate_contract(
    generator: &dyn TextGenerator,
    lender: &str,
    request: LoanRequest,
) -> Result<GeneratedContract, AppError> {
    generate_contract_with(generator, lender, request, render_contract).await
}

/// Generates a contract with a caller-supplied renderer.
///
/// The request must already be validated.
pub async fn generate_contract_with<F>(
    generator: &dyn TextGenerator,
    lender: &str,
    request: LoanRequest,
    renderer: F,
) -> Result<GeneratedContract, AppError>
where
    F: FnOnce(&str) -> Result<RenderedDocument, RenderError> + Send + 'static,
{
    let contract_id = Uuid::new_v4();
    info!(
        %contract_id,
        borrower_len = request.borrower().len(),
        term_months = request.term_months,
        "Requesting contract text"
    );

    let text = request_contract_text(generator, lender, &request).await?;
    let (contract_text, document) = render_blocking(text, renderer).await?;

    info!(
        %contract_id,
        pages = document.page_count,
        bytes = document.bytes.len(),
        "Contract rendered"
    );

    Ok(GeneratedContract {
        contract_id,
        generated_at: Utc::now(),
        contract_text,
        document,
    })
}
