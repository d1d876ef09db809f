// Prompt constants for contract drafting.
// The system message is shared and lives in llm_client::prompts.

/// Sections every generated contract must contain, in the order they are requested.
pub const REQUIRED_SECTIONS: &[&str] = &[
    "Severability Clause",
    "Entire Agreement Clause",
    "Amendment Clause",
    "Assignment",
    "Costs and Expenses",
    "Waiver",
    "No Waiver",
    "Successor and Assigns",
    "Notices",
    "Guarantee/Guarantor",
];

/// Lender named in every contract unless configured otherwise.
pub const DEFAULT_LENDER: &str = "Tar Heel Bank";

/// Contract drafting prompt.
/// Replace: {lender}, {principal}, {rate}, {term}, {sections}, then {borrower} last
/// so user-supplied text is never re-scanned for placeholders.
pub const CONTRACT_PROMPT_TEMPLATE: &str = "\
Generate a formal loan contract for {lender} as the lender and {borrower} as the borrower.
The loan amount is ${principal}, with an interest rate of {rate}% and a term of {term} months.
Include standard legal language, terms, and conditions for a loan contract.
Along with the usual sections, the loan also needs to have the following sections:
{sections}
The Guarantee/Guarantor section must leave space to fill in information about the Guarantor.";
