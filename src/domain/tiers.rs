//! Closed vocabulary of rank tiers and the Roman numerals used for
//! sub-tiers and divisions.

pub const UNRANKED: &str = "Unranked";

/// Tier names ordered so that no name is preceded by one of its own substrings.
/// "Grand Champion" must be tried before "Champion".
pub const TIERS: [&str; 8] = [
    "Supersonic Legend",
    "Grand Champion",
    "Champion",
    "Diamond",
    "Platinum",
    "Gold",
    "Silver",
    "Bronze",
];

/// Roman numerals and the division (or sub-tier) number they stand for.
pub const ROMAN_DIVISIONS: [(&str, u8); 5] = [("I", 1), ("II", 2), ("III", 3), ("IV", 4), ("V", 5)];

/// Regex alternation for a single numeral; longer forms first so "IV" is not read as "I".
pub const NUMERAL_PATTERN: &str = "IV|V|I{1,3}";

/// Tier parts recovered from a tier string such as "Champion III Div I"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierParts {
    pub name: &'static str,
    pub sub_tier: Option<u8>,
    pub division: Option<u8>,
}

pub fn division_from_numeral(numeral: &str) -> Option<u8> {
    ROMAN_DIVISIONS
        .iter()
        .find(|(roman, _)| roman.eq_ignore_ascii_case(numeral))
        .map(|(_, division)| *division)
}

/// `Supersonic Legend|Grand Champion|...` for embedding in a pattern
pub fn tier_alternation() -> String {
    TIERS.join("|")
}

/// Split a recovered tier string into its typed parts
pub fn parse_tier(tier: &str) -> Option<TierParts> {
    let collapsed = tier.split_whitespace().collect::<Vec<_>>().join(" ");
    let name = TIERS.into_iter().find(|name| collapsed.starts_with(name))?;

    let mut tokens = collapsed[name.len()..].split_whitespace().peekable();
    let sub_tier = tokens.peek().and_then(|token| division_from_numeral(token));
    if sub_tier.is_some() {
        tokens.next();
    }

    let division = match tokens.next() {
        Some(token) if token.eq_ignore_ascii_case("div") || token.eq_ignore_ascii_case("division") => {
            tokens.next().and_then(division_from_numeral)
        }
        _ => None,
    };

    Some(TierParts {
        name,
        sub_tier,
        division,
    })
}

/// Normalize a tier string into a lookup key such as `champion_iii`.
///
/// Division information is dropped; anything outside the vocabulary is `unranked`.
pub fn normalize_tier_key(tier: &str) -> String {
    let lower = strip_parenthesized(&tier.to_lowercase());
    let without_division = lower
        .split(" div")
        .next()
        .unwrap_or_default()
        .replace("division", "");
    let text = without_division.split_whitespace().collect::<Vec<_>>().join(" ");

    tier_keys()
        .into_iter()
        .find(|key| text.contains(key.as_str()))
        .map(|key| key.replace(' ', "_"))
        .unwrap_or_else(|| UNRANKED.to_lowercase())
}

// --- Helpers ---

fn tier_keys() -> Vec<String> {
    let mut keys = Vec::new();
    for name in TIERS {
        let name = name.to_lowercase();
        if name == "supersonic legend" {
            keys.push(name);
            continue;
        }
        // III before II before I so the longest numeral wins
        for (roman, _) in ROMAN_DIVISIONS[..3].iter().rev() {
            keys.push(format!("{} {}", name, roman.to_lowercase()));
        }
    }
    keys
}

fn strip_parenthesized(text: &str) -> String {
    let mut depth = 0usize;
    text.chars()
        .filter(|c| match c {
            '(' => {
                depth += 1;
                false
            }
            ')' => {
                depth = depth.saturating_sub(1);
                false
            }
            _ => depth == 0,
        })
        .collect()
}
