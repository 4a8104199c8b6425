//! Quality report module
//!
//! - `model` - QualityReport, Summary and Issue, as written by the rule
//!   evaluation step
//! - `diagnostics` - Rule id to warning/recommendation table
//! - `render` - Fixed-layout text rendering
//! - `error` - Report loading errors

pub mod diagnostics;
pub mod error;
pub mod model;
pub mod render;

pub use diagnostics::{lookup as lookup_diagnostic, RuleDiagnostic};
pub use error::ReportError;
pub use model::{Issue, QualityReport, Summary};
pub use render::{render, render_file};
