use anyhow::Context as _;

/// Add context to pattern compilation errors
pub fn pattern_context(name: &str) -> String {
    format!("Failed to compile {} pattern", name)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to file errors
pub fn file_context(operation: &str, path: &str) -> String {
    format!("Failed to {} file: {}", operation, path)
}

/// Wrap result with pattern context
pub fn with_pattern_context<T, E>(result: Result<T, E>, name: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(pattern_context(name))
}
