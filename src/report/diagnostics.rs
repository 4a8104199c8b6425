//! Rule diagnostic table
//!
//! Maps rule identifiers from the quality report to operator guidance. The
//! table is built once on first use and never changes afterwards.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Placeholder in a warning template replaced by the issue's detail text
pub const DETAIL_PLACEHOLDER: &str = "{detail}";

/// Warning and recommendation for one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDiagnostic {
    /// Short upper-case category, e.g. `DUPLICATES`
    pub category: &'static str,
    warning: &'static str,
    pub recommendation: &'static str,
}

impl RuleDiagnostic {
    const fn new(
        category: &'static str,
        warning: &'static str,
        recommendation: &'static str,
    ) -> Self {
        Self {
            category,
            warning,
            recommendation,
        }
    }

    /// Warning text with `{detail}` filled in
    pub fn warning(&self, detail: &str) -> String {
        self.warning.replace(DETAIL_PLACEHOLDER, detail)
    }
}

static RULE_DIAGNOSTICS: Lazy<HashMap<&'static str, RuleDiagnostic>> = Lazy::new(|| {
    HashMap::from([
        (
            "R001",
            RuleDiagnostic::new(
                "DUPLICATES",
                "Exact duplicate orders found.",
                "Check upstream system for double-submission bugs.",
            ),
        ),
        (
            "R002",
            RuleDiagnostic::new(
                "MISSING DATA",
                "{detail}.",
                "Enforce NOT NULL constraints at ingestion.",
            ),
        ),
        (
            "R003",
            RuleDiagnostic::new(
                "INVALID EMAILS",
                "{detail}.",
                "Add email validation to the order form.",
            ),
        ),
        (
            "R004",
            RuleDiagnostic::new(
                "QUANTITY OUTLIERS",
                "{detail}.",
                "Review for data entry errors or fraud.",
            ),
        ),
        (
            "R005",
            RuleDiagnostic::new(
                "NEGATIVE PRICES",
                "{detail}.",
                "Investigate returns vs pricing errors.",
            ),
        ),
        (
            "R006",
            RuleDiagnostic::new(
                "DATE ISSUES",
                "{detail}.",
                "Standardize date format at source.",
            ),
        ),
        (
            "R009",
            RuleDiagnostic::new(
                "BAD PAYMENT METHOD",
                "{detail}.",
                "Restrict payment_method to enum values.",
            ),
        ),
    ])
});

/// Diagnostic for a rule id; `None` for rules without guidance
pub fn lookup(rule_id: &str) -> Option<&'static RuleDiagnostic> {
    RULE_DIAGNOSTICS.get(rule_id)
}
