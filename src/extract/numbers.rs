use regex::Captures;

/// Parse a number that may carry thousands separators ("1,308")
pub fn parse_grouped(raw: &str) -> Option<u32> {
    raw.trim().replace(',', "").parse().ok()
}

/// Parse capture group `index` as a grouped number; `None` when absent or not numeric
pub fn capture_number(captures: &Captures<'_>, index: usize) -> Option<u32> {
    captures.get(index).and_then(|m| parse_grouped(m.as_str()))
}

/// Collapse whitespace runs to single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grouped() {
        assert_eq!(parse_grouped("1,308"), Some(1308));
        assert_eq!(parse_grouped("823"), Some(823));
        assert_eq!(parse_grouped("12,345,678"), Some(12_345_678));
        assert_eq!(parse_grouped(","), None);
        assert_eq!(parse_grouped("4.5"), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Champion \n III   Div I "), "Champion III Div I");
    }
}
