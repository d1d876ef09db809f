use serde::Serialize;

pub const MIN_PRINCIPAL: u64 = 1_000;
pub const MIN_RATE_PERCENT: f64 = 1.0;
pub const MAX_RATE_PERCENT: f64 = 20.0;
pub const MIN_TERM_MONTHS: u32 = 1;
pub const MAX_TERM_MONTHS: u32 = 360;
pub const DEFAULT_TERM_MONTHS: u32 = 12;

/// Loan parameters for one contract. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRequest {
    pub borrower_name: String,
    /// Whole dollars.
    pub principal: u64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
}

/// Serde default for forms that omit the term.
pub fn default_term_months() -> u32 {
    DEFAULT_TERM_MONTHS
}

/// One input that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl LoanRequest {
    /// Checks every field and returns all failures at once.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.borrower_name.trim().is_empty() {
            errors.push(FieldError::new(
                "borrower_name",
                "Borrower name or company is required",
            ));
        }

        if self.principal < MIN_PRINCIPAL {
            errors.push(FieldError::new(
                "principal",
                format!("Loan amount must be at least ${MIN_PRINCIPAL}"),
            ));
        }

        let rate = self.annual_rate_percent;
        if !rate.is_finite() || !(MIN_RATE_PERCENT..=MAX_RATE_PERCENT).contains(&rate) {
            errors.push(FieldError::new(
                "annual_rate_percent",
                format!(
                    "Interest rate must be between {MIN_RATE_PERCENT:.1}% and {MAX_RATE_PERCENT:.1}%"
                ),
            ));
        }

        if !(MIN_TERM_MONTHS..=MAX_TERM_MONTHS).contains(&self.term_months) {
            errors.push(FieldError::new(
                "term_months",
                format!(
                    "Loan term must be between {MIN_TERM_MONTHS} and {MAX_TERM_MONTHS} months"
                ),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Borrower name with surrounding whitespace removed.
    pub fn borrower(&self) -> &str {
        self.borrower_name.trim()
    }
}
