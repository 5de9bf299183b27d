use anyhow::Result;
use log::{debug, info};
use regex::Regex;

use crate::domain::{LifetimeLabel, LifetimeMap, LifetimeStat};
use crate::errors::with_pattern_context;

/// Lifetime totals render as `<Label><value>#<global rank>`, e.g. "Wins2,260#2,449,599".
///
/// `\b` before the single-word labels keeps them from matching inside longer words.
const LIFETIME_PATTERNS: [(LifetimeLabel, &str); 8] = [
    (LifetimeLabel::Wins, r"(?i)Lifetime\s+Wins(\d{1,3}(?:,\d{3})*)#"),
    (LifetimeLabel::Goals, r"(?i)\bGoals(\d{1,3}(?:,\d{3})*)#"),
    (LifetimeLabel::Assists, r"(?i)\bAssists(\d{1,3}(?:,\d{3})*)#"),
    (LifetimeLabel::Saves, r"(?i)\bSaves(\d{1,3}(?:,\d{3})*)#"),
    (LifetimeLabel::Shots, r"(?i)\bShots(\d{1,3}(?:,\d{3})*)#"),
    (LifetimeLabel::Mvps, r"(?i)MVPs(\d{1,3}(?:,\d{3})*)#"),
    (LifetimeLabel::GoalShotRatio, r"(?i)Goal\s+Shot\s+Ratio([\d.]+)#"),
    (LifetimeLabel::TrnScore, r"(?i)TRN\s+Score([\d,]+\.?\d*)#"),
];

/// Recovers career totals from the overview text
pub struct LifetimeExtractor {
    patterns: Vec<(LifetimeLabel, Regex)>,
}

impl LifetimeExtractor {
    pub fn new() -> Result<Self> {
        let patterns = LIFETIME_PATTERNS
            .iter()
            .map(|(label, pattern)| -> Result<(LifetimeLabel, Regex)> {
                let regex = with_pattern_context(Regex::new(pattern), label.as_str())?;
                Ok((*label, regex))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn extract(&self, text: &str) -> LifetimeMap {
        let mut lifetime = LifetimeMap::new();

        for (label, regex) in &self.patterns {
            if lifetime.contains_key(label) {
                continue;
            }
            let Some(value) = regex.captures(text).and_then(|c| c.get(1)) else {
                debug!("No lifetime value for {}", label);
                continue;
            };

            let value = Self::finish_value(*label, value.as_str());
            info!("  [OK] {}: {}", label, value);
            lifetime.insert(*label, LifetimeStat { label: *label, value });
        }

        lifetime
    }

    fn finish_value(label: LifetimeLabel, raw: &str) -> String {
        if label == LifetimeLabel::GoalShotRatio && !raw.ends_with('%') {
            format!("{}%", raw)
        } else {
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OVERVIEW: &str = "Lifetime Overview Lifetime Wins2,260#2,449,599 • Top 36.0%\
        Goals1,204#3,120,001 • Top 40.0%Assists812#2,980,112 • Top 38.0%\
        Saves1,990#1,001,233 • Top 20.0%Shots2,481#4,002,118 • Top 45.0%\
        MVPs733#2,771,560 • Top 35.0%Goal Shot Ratio48.5#9,633,706 • Bottom 27.0%\
        TRN Score1,024.5#88,120 • Top 2.0%";

    fn value(lifetime: &LifetimeMap, label: LifetimeLabel) -> Option<&str> {
        lifetime.get(&label).map(|stat| stat.value.as_str())
    }

    #[test]
    fn test_all_labels() {
        let lifetime = LifetimeExtractor::new().unwrap().extract(OVERVIEW);

        assert_eq!(lifetime.len(), 8);
        assert_eq!(value(&lifetime, LifetimeLabel::Wins), Some("2,260"));
        assert_eq!(value(&lifetime, LifetimeLabel::Goals), Some("1,204"));
        assert_eq!(value(&lifetime, LifetimeLabel::Assists), Some("812"));
        assert_eq!(value(&lifetime, LifetimeLabel::Saves), Some("1,990"));
        assert_eq!(value(&lifetime, LifetimeLabel::Shots), Some("2,481"));
        assert_eq!(value(&lifetime, LifetimeLabel::Mvps), Some("733"));
        assert_eq!(value(&lifetime, LifetimeLabel::TrnScore), Some("1,024.5"));
    }

    #[test]
    fn test_goal_shot_ratio_gets_percent() {
        let lifetime = LifetimeExtractor::new().unwrap().extract("Goal Shot Ratio48.5#9,633,706");

        let stat = lifetime.get(&LifetimeLabel::GoalShotRatio).unwrap();
        assert_eq!(stat.label.as_str(), "Goal Shot Ratio");
        assert_eq!(stat.value, "48.5%");
    }

    #[test]
    fn test_goals_not_confused_by_session_ratio() {
        let text = "Session Overview 1 day ago Goals / Shots 10 / 20 Assists 4 \
                    Lifetime Goals1,204#3,120,001";
        let lifetime = LifetimeExtractor::new().unwrap().extract(text);

        assert_eq!(value(&lifetime, LifetimeLabel::Goals), Some("1,204"));
        assert_eq!(value(&lifetime, LifetimeLabel::Shots), None);
        assert_eq!(value(&lifetime, LifetimeLabel::Assists), None);
    }

    #[test]
    fn test_label_must_start_a_word() {
        let text = "OwnGoals12#5 Goals30#9";
        let lifetime = LifetimeExtractor::new().unwrap().extract(text);

        assert_eq!(value(&lifetime, LifetimeLabel::Goals), Some("30"));
    }

    #[test]
    fn test_first_match_wins_and_case_insensitive() {
        let text = "SAVES15#1 Saves99#2";
        let lifetime = LifetimeExtractor::new().unwrap().extract(text);

        assert_eq!(value(&lifetime, LifetimeLabel::Saves), Some("15"));
    }

    #[test]
    fn test_missing_labels_omitted() {
        let lifetime = LifetimeExtractor::new().unwrap().extract("Wins2,260 without a rank marker");
        assert!(lifetime.is_empty());
    }
}
