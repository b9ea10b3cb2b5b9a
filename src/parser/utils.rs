//! Input helpers shared by the interpreter and the shell.

/// Replace control characters with spaces so stray line breaks or NULs from
/// speech capture cannot glue words together or reach the regexes.
pub fn sanitize_user_input(input: &str) -> String {
    input.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}

/// Lowercase, trimmed form used for comparisons.
pub fn preprocess_input(input: &str) -> String {
    input.trim().to_lowercase()
}
