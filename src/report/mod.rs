pub mod json;
pub mod md;
pub mod text;

use crate::error::MaturityError;
use crate::types::report::{MaturityReport, SensitivityReport};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Text,
}

pub fn render(
    report: &MaturityReport,
    format: OutputFormat,
    decimals: usize,
) -> Result<String, MaturityError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(MaturityError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report, decimals)),
        OutputFormat::Text => Ok(text::to_text(report, decimals)),
    }
}

pub fn render_sensitivity(
    report: &SensitivityReport,
    format: OutputFormat,
    decimals: usize,
) -> Result<String, MaturityError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(MaturityError::Json),
        OutputFormat::Md => Ok(md::sensitivity_to_markdown(report, decimals)),
        OutputFormat::Text => Ok(text::sensitivity_to_text(report, decimals)),
    }
}
