//! Validation Utilities

use validator::ValidationErrors;

use super::error::AppError;

/// Convert validation errors to AppError, reporting the first failing field
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .first()
        .and_then(|(field, errs)| {
            errs.first().map(|e| {
                let detail = e.message.clone().map(|m| m.to_string()).unwrap_or_default();
                format!("{}: {}", field, detail)
            })
        })
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}
