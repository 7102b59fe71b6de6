pub use masterror::{AppError, AppResult};

/// Full diagnostic text for an error.
///
/// `AppError`'s `Display` prints only the taxonomy label; the stage-specific
/// diagnostic lives in the attached message. Callers that log or print
/// errors must go through this so a validation rejection never reads like a
/// schema or execution failure.
pub fn error_message(err: &AppError) -> String {
    match &err.message {
        Some(message) => message.to_string(),
        None => err.to_string()
    }
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create schema introspection error (catalog unreachable or unusable)
pub fn schema_error(message: impl Into<String>) -> AppError {
    AppError::internal(format!("Schema error: {}", message.into()))
}

/// Create error for a malformed relationship declaration
pub fn relationship_parse_error(entry: &str, reason: &str) -> AppError {
    AppError::bad_request(format!(
        "Invalid relationship '{}': {} (expected 'table1.column1 = table2.column2')",
        entry, reason
    ))
}

/// Create model generation error
pub fn generation_error(message: impl Into<String>) -> AppError {
    AppError::service(format!("Generation failed: {}", message.into()))
}

/// Create validation rejection for an unsafe or malformed statement
pub fn validation_rejection(message: impl Into<String>) -> AppError {
    AppError::bad_request(format!("Unsafe or invalid query: {}", message.into()))
}

/// Create query execution error
pub fn execution_error(message: impl Into<String>) -> AppError {
    AppError::internal(format!("Execution error: {}", message.into()))
}

/// Create HTTP error
pub fn http_error(err: reqwest::Error) -> AppError {
    let msg = if err.is_timeout() {
        format!("Request timeout: {}", err)
    } else if err.is_connect() {
        format!("Connection failed: {}", err)
    } else if err.is_status() {
        format!("HTTP error {}: {}", err.status().unwrap_or_default(), err)
    } else {
        err.to_string()
    };
    AppError::service(msg)
}
