use scraper::{Html, Node};

use crate::extract::numbers::collapse_whitespace;

/// Elements whose text never renders
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Flatten a saved profile page into the single text blob the extractors read
pub fn flatten_html(html: &str) -> String {
    flatten_document(&Html::parse_document(html))
}

/// Concatenate every rendered text node in document order, then collapse whitespace.
///
/// Adjacent nodes are joined without a separator, matching `textContent`, so
/// "1,308" and "Div" in sibling spans read as "1,308Div".
pub fn flatten_document(document: &Html) -> String {
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| HIDDEN_ELEMENTS.contains(&e.name())))
            .unwrap_or(false);
        if !hidden {
            text.push_str(fragment);
        }
    }

    collapse_whitespace(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_nodes_are_glued() {
        let html = r#"
            <html>
                <head><style>.x { color: red }</style><script>var a = 1;</script></head>
                <body>
                    <div>Ranked Doubles 2v2 <span>1,308</span><span>Div</span><span>257</span><span>Champion III Div I</span></div>
                </body>
            </html>
        "#;

        assert_eq!(flatten_html(html), "Ranked Doubles 2v2 1,308Div257Champion III Div I");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(flatten_html(""), "");
    }
}
