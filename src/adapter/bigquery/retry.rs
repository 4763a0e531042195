//! BigQuery Retry Logic and Error Classification
//!
//! リトライロジックとエラー分類

// Retry configuration based on Google Cloud best practices
pub const MAX_RETRIES: u32 = 5;
pub const INITIAL_RETRY_DELAY_MS: u64 = 1000; // 1 second
pub const MAX_RETRY_DELAY_MS: u64 = 32000; // 32 seconds max

/// Calculate retry delay with exponential backoff
pub fn calculate_retry_delay(retry_count: u32) -> u64 {
    let shift = retry_count.saturating_sub(1).min(16);
    std::cmp::min(INITIAL_RETRY_DELAY_MS * (1 << shift), MAX_RETRY_DELAY_MS)
}

/// Convert error chain to string including all causes
pub fn error_chain_to_string(e: &anyhow::Error) -> String {
    let mut messages = Vec::new();
    for cause in e.chain() {
        messages.push(cause.to_string());
    }
    messages.join(" | ")
}

/// Check if an error looks like a dropped connection
pub fn is_connection_error(error_msg: &str) -> bool {
    error_msg.contains("Broken pipe")
        || error_msg.contains("broken pipe")
        || error_msg.contains("Connection reset")
        || error_msg.contains("connection reset")
        || error_msg.contains("Connection refused")
        || error_msg.contains("connection refused")
        || error_msg.contains("connection error")
        || error_msg.contains("EOF")
        || error_msg.contains("unexpected end of file")
}

/// Check if `code` appears as a standalone token, e.g. "(429 Too Many Requests)"
///
/// Job ids, table names and URIs stay whole tokens, so digits inside them never match.
pub fn has_status_code(error_msg: &str, code: &str) -> bool {
    error_msg
        .split(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':' | '/')))
        .any(|token| token == code)
}

/// Check if an error is transient on the service side
pub fn is_transient_error(error_msg: &str) -> bool {
    ["429", "500", "502", "503", "504"]
        .iter()
        .any(|code| has_status_code(error_msg, code))
        || error_msg.contains("rateLimitExceeded")
        || error_msg.contains("Rate limit")
        || error_msg.contains("rate limit")
        || error_msg.contains("backendError")
        || error_msg.contains("Quota exceeded")
        || error_msg.contains("quota exceeded")
        || error_msg.contains("quotaExceeded")
        || error_msg.contains("timeout")
        || error_msg.contains("Timeout")
        || error_msg.contains("timed out")
}

/// Check if an error message indicates a retryable error
pub fn is_retryable_error(error_msg: &str) -> bool {
    is_connection_error(error_msg) || is_transient_error(error_msg)
}

/// Check if a job insert was rejected because the job id already exists (409)
///
/// Happens when an earlier insert attempt reached the service but its response was lost.
pub fn is_already_exists_error(error_msg: &str) -> bool {
    has_status_code(error_msg, "409") || error_msg.contains("Already Exists")
}

/// Extract the location from a 409 message such as
/// `Already Exists: Job my-project:asia-northeast1.job_123`
pub fn existing_job_location(error_msg: &str, project_id: &str, job_id: &str) -> Option<String> {
    let prefix = format!("{}:", project_id);
    let suffix = format!(".{}", job_id);

    let start = error_msg.find(&prefix)? + prefix.len();
    let rest = &error_msg[start..];
    let location = &rest[..rest.find(&suffix)?];

    if location.is_empty() || location.contains(|c: char| c.is_whitespace() || c == ':') {
        return None;
    }
    Some(location.to_string())
}
