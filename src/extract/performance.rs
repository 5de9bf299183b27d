use anyhow::Result;
use log::{debug, info};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

use crate::errors::{parse_context, with_pattern_context};

/// Keywords looked up on the performance page, in priority order
const STAT_KEYWORDS: [&str; 10] = [
    "Goals",
    "Assists",
    "Saves",
    "Shots",
    "Win Rate",
    "MVPs",
    "Goal Shot Ratio",
    "Score",
    "Shooting %",
    "Save %",
];

const CANDIDATE_ELEMENTS: &str = "div, span, td, li";

/// Lower-confidence scan of the performance page's element text.
///
/// Every candidate element whose text mentions a keyword donates its first
/// number (optionally a percentage) to that keyword. First element in document
/// order wins.
pub struct PerformanceExtractor {
    selector: Selector,
    value_regex: Regex,
}

impl PerformanceExtractor {
    pub fn new() -> Result<Self> {
        // Selector errors borrow from the input and are not Send, so keep only the message
        let selector = Selector::parse(CANDIDATE_ELEMENTS)
            .map_err(|e| anyhow::anyhow!("{}: {}", parse_context("performance selector"), e))?;
        let value_regex = with_pattern_context(Regex::new(r"(\d+(?:\.\d+)?%?)"), "performance value")?;

        Ok(Self {
            selector,
            value_regex,
        })
    }

    pub fn extract(&self, document: &Html) -> BTreeMap<String, String> {
        let mut performance = BTreeMap::new();

        for element in document.select(&self.selector) {
            let text = Self::element_text(element);
            if text.is_empty() {
                continue;
            }

            for keyword in STAT_KEYWORDS {
                if performance.contains_key(keyword) || !text.contains(keyword) {
                    continue;
                }
                if let Some(value) = self.value_regex.find(&text) {
                    debug!("Performance {} = {} from {:?}", keyword, value.as_str(), text);
                    performance.insert(keyword.to_string(), value.as_str().to_string());
                }
            }
        }

        info!("  → Found {} performance stats", performance.len());
        performance
    }

    /// Text nodes trimmed and joined with single spaces
    fn element_text(element: ElementRef<'_>) -> String {
        element
            .text()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_take_first_number() {
        let html = Html::parse_document(
            r#"
            <html>
                <body>
                    <div class="stat"><span>Win Rate</span><span>52.3%</span></div>
                    <div class="stat"><span>Goals</span><span>1204</span></div>
                    <li>Shooting % 31.5%</li>
                    <td>MVPs 733</td>
                </body>
            </html>
            "#,
        );

        let performance = PerformanceExtractor::new().unwrap().extract(&html);

        assert_eq!(performance.get("Win Rate").map(String::as_str), Some("52.3%"));
        assert_eq!(performance.get("Goals").map(String::as_str), Some("1204"));
        assert_eq!(performance.get("Shooting %").map(String::as_str), Some("31.5%"));
        assert_eq!(performance.get("MVPs").map(String::as_str), Some("733"));
        assert!(!performance.contains_key("Save %"));
    }

    #[test]
    fn test_first_element_wins() {
        let html = Html::parse_document(
            r#"<div><span>Assists 12</span></div><div><span>Assists 99</span></div>"#,
        );

        let performance = PerformanceExtractor::new().unwrap().extract(&html);
        assert_eq!(performance.get("Assists").map(String::as_str), Some("12"));
    }

    #[test]
    fn test_empty_document() {
        let html = Html::parse_document("<html><body></body></html>");
        assert!(PerformanceExtractor::new().unwrap().extract(&html).is_empty());
    }
}
