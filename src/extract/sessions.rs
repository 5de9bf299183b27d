use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info};
use regex::{Captures, Regex};
use std::collections::BTreeMap;

use crate::config::ExtractorSettings;
use crate::domain::{HeatmapEntry, MatchTally, Playlist, Session};
use crate::errors::with_pattern_context;
use crate::extract::dates::DateNormalizer;
use crate::extract::numbers::{capture_number, parse_grouped};

const TIME_PHRASE_PATTERN: &str = r"\d+\s+(?:second|minute|hour|day|week|month)s?\s+ago";

// Older sessions may carry a calendar date instead: "11/12/2025", "2025-11-12", "Nov 12, 2025"
const ABSOLUTE_DATE_PATTERN: &str = r"\d{1,2}/\d{1,2}/\d{4}|\d{4}-\d{2}-\d{2}|[A-Za-z]{3,9} \d{1,2}, \d{4}";

const WINS_PATTERN: &str = r"(\d+)\s+Wins?";
const GOALS_SHOTS_PATTERN: &str = r"Goals\s*/\s*Shots\s+(\d+)\s*/\s*(\d+)";
const ASSISTS_PATTERN: &str = r"Assists\s+(\d+)";
const SAVES_PATTERN: &str = r"Saves\s+(\d+)";
const MVP_PATTERN: &str = r"MVP\s*\((\d+)\)";

// Rating is capped at three digits plus one optional comma group: "1,096" or "823".
// A wider bound would swallow the next number when the page glues them ("823121").
const MATCH_TALLY_PATTERN: &str = r"(\d{1,2})\s+Match(?:es)?\s+(Ranked\s+(?:Duel|Doubles|Standard|4v4\s+Quads?)\s+\dv\d|Hoops|Rumble|Dropshot|Snow\s?[Dd]ay)\s*(\d{1,3}(?:,\d{3})?)";

/// One session as it appears in the text, before field extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SessionBlock<'a> {
    time_phrase: &'a str,
    body: &'a str,
}

/// Recovers session blocks, their match tallies and the per-day activity histogram
pub struct SessionExtractor {
    dates: DateNormalizer,
    marker_regex: Regex,
    terminal_regex: Regex,
    wins_regex: Regex,
    goals_shots_regex: Regex,
    assists_regex: Regex,
    saves_regex: Regex,
    mvp_regex: Regex,
    match_regex: Regex,
    max_sessions: usize,
}

impl SessionExtractor {
    pub fn new(settings: &ExtractorSettings, dates: DateNormalizer) -> Result<Self> {
        Ok(Self {
            dates,
            marker_regex: Self::compile_marker(settings)?,
            terminal_regex: Self::compile_terminal(settings)?,
            wins_regex: with_pattern_context(Regex::new(WINS_PATTERN), "session wins")?,
            goals_shots_regex: with_pattern_context(Regex::new(GOALS_SHOTS_PATTERN), "goals / shots")?,
            assists_regex: with_pattern_context(Regex::new(ASSISTS_PATTERN), "assists")?,
            saves_regex: with_pattern_context(Regex::new(SAVES_PATTERN), "saves")?,
            mvp_regex: with_pattern_context(Regex::new(MVP_PATTERN), "mvp")?,
            match_regex: with_pattern_context(Regex::new(MATCH_TALLY_PATTERN), "match tally")?,
            max_sessions: settings.max_sessions,
        })
    }

    /// Sessions in page order (most recent first) and the histogram sorted by date
    pub fn extract(&self, text: &str) -> (Vec<Session>, Vec<HeatmapEntry>) {
        let mut sessions = Vec::new();
        let mut cursor = 0;
        let mut examined = 0;

        while examined < self.max_sessions {
            let Some((block, next)) = self.next_block(text, cursor) else {
                break;
            };
            examined += 1;
            cursor = next;

            let session = self.parse_session(block);
            if session.matches.is_empty() {
                debug!("Dropping session '{}' without match tallies", block.time_phrase);
                continue;
            }
            sessions.push(session);
        }

        let heatmap = Self::fold_heatmap(&sessions);

        info!("  → Examined {} session blocks, kept {}", examined, sessions.len());
        info!("  → Heatmap covers {} unique days", heatmap.len());
        (sessions, heatmap)
    }

    // --- Construction Helpers ---

    fn compile_marker(settings: &ExtractorSettings) -> Result<Regex> {
        let pattern = format!(
            r"(?i){}\s+({}|{})",
            regex::escape(settings.session_marker),
            TIME_PHRASE_PATTERN,
            ABSOLUTE_DATE_PATTERN
        );
        with_pattern_context(Regex::new(&pattern), "session marker")
    }

    fn compile_terminal(settings: &ExtractorSettings) -> Result<Regex> {
        let alternatives = std::iter::once(settings.session_marker)
            .chain(settings.terminal_sentinels.iter().copied())
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        with_pattern_context(Regex::new(&format!("(?i){}", alternatives)), "session terminal")
    }

    // --- Segmentation ---

    /// Next session block at or after `from`, plus the offset where scanning resumes.
    ///
    /// A body runs from the end of its marker to the next marker or terminal
    /// sentinel, or to the end of the text.
    fn next_block<'a>(&self, text: &'a str, from: usize) -> Option<(SessionBlock<'a>, usize)> {
        let captures = self.marker_regex.captures_at(text, from)?;
        let time_phrase = captures.get(1)?.as_str();
        let body_start = captures.get(0)?.end();

        let body_end = self
            .terminal_regex
            .find_at(text, body_start)
            .map(|m| m.start())
            .unwrap_or(text.len());

        let block = SessionBlock {
            time_phrase,
            body: &text[body_start..body_end],
        };
        Some((block, body_end))
    }

    // --- Per-Session Fields ---

    fn parse_session(&self, block: SessionBlock<'_>) -> Session {
        let body = block.body;
        let goals_shots = self.goals_shots_regex.captures(body);

        Session {
            raw_time_phrase: block.time_phrase.to_string(),
            derived_date: self.dates.normalize(block.time_phrase),
            win_count: Self::first_number(&self.wins_regex, body).unwrap_or(0),
            matches: self.parse_matches(body),
            goals: goals_shots.as_ref().and_then(|c| capture_number(c, 1)),
            shots: goals_shots.as_ref().and_then(|c| capture_number(c, 2)),
            assists: Self::first_number(&self.assists_regex, body),
            saves: Self::first_number(&self.saves_regex, body),
            mvp_count: Self::first_number(&self.mvp_regex, body),
        }
    }

    fn first_number(regex: &Regex, body: &str) -> Option<u32> {
        regex
            .captures(body)
            .and_then(|captures| capture_number(&captures, 1))
    }

    fn parse_matches(&self, body: &str) -> Vec<MatchTally> {
        self.match_regex
            .captures_iter(body)
            .filter_map(|captures| Self::parse_tally(&captures))
            .collect()
    }

    fn parse_tally(captures: &Captures<'_>) -> Option<MatchTally> {
        let count = parse_grouped(captures.get(1)?.as_str()).filter(|count| *count > 0)?;
        let label = captures.get(2)?.as_str();

        let Some(playlist) = Playlist::from_label(label) else {
            debug!("Skipping tally for unsupported playlist '{}'", label);
            return None;
        };

        Some(MatchTally {
            count,
            playlist,
            rating_at_time: capture_number(captures, 3)?,
        })
    }

    // --- Histogram ---

    fn fold_heatmap(sessions: &[Session]) -> Vec<HeatmapEntry> {
        let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();

        for session in sessions {
            let Some(date) = session.derived_date else {
                continue;
            };
            let total = session.total_matches();
            if total > 0 {
                *per_day.entry(date).or_insert(0) += total;
            }
        }

        per_day
            .into_iter()
            .map(|(date, count)| HeatmapEntry { date, count })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::dates::FixedClock;
    use std::sync::Arc;

    fn extractor() -> SessionExtractor {
        extractor_with(&ExtractorSettings::default())
    }

    fn extractor_with(settings: &ExtractorSettings) -> SessionExtractor {
        let today = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
        let dates = DateNormalizer::new(Arc::new(FixedClock(today))).unwrap();
        SessionExtractor::new(settings, dates).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_session_fields() {
        let text = "Session Overview 3 days ago 5 Wins 4 Losses Goals / Shots 10 / 20 \
                    Assists 4 Saves 7 MVP (2) 9 Matches Ranked Standard 3v3 1,096 \
                    Get the Mobile App";
        let (sessions, heatmap) = extractor().extract(text);

        assert_eq!(sessions.len(), 1);
        let session = &sessions[0];
        assert_eq!(session.raw_time_phrase, "3 days ago");
        assert_eq!(session.derived_date, Some(date(2025, 11, 12)));
        assert_eq!(session.win_count, 5);
        assert_eq!(session.goals, Some(10));
        assert_eq!(session.shots, Some(20));
        assert_eq!(session.assists, Some(4));
        assert_eq!(session.saves, Some(7));
        assert_eq!(session.mvp_count, Some(2));
        assert_eq!(
            session.matches,
            vec![MatchTally {
                count: 9,
                playlist: Playlist::Standard3v3,
                rating_at_time: 1096,
            }]
        );
        assert_eq!(heatmap, vec![HeatmapEntry { date: date(2025, 11, 12), count: 9 }]);
    }

    #[test]
    fn test_multiple_tallies_in_one_session() {
        let text = "Session Overview 5 hours ago 6 Wins \
                    9 Matches Ranked Standard 3v3 1,096 3 Matches Ranked Doubles 2v2 1,012 \
                    1 Match Ranked Duel 1v1 823";
        let (sessions, _) = extractor().extract(text);

        let matches = &sessions[0].matches;
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[1].playlist, Playlist::Doubles2v2);
        assert_eq!(matches[1].rating_at_time, 1012);
        assert_eq!(matches[2].count, 1);
        assert_eq!(matches[2].playlist, Playlist::Duel1v1);
        assert_eq!(sessions[0].total_matches(), 13);
    }

    #[test]
    fn test_rating_digits_are_bounded() {
        let text = "Session Overview 1 day ago 9 Matches Ranked Duel 1v1 823121 Score";
        let (sessions, _) = extractor().extract(text);

        assert_eq!(sessions[0].matches[0].rating_at_time, 823);
    }

    #[test]
    fn test_same_day_sessions_fold_into_one_bucket() {
        let text = "Session Overview 5 days ago 9 Matches Ranked Standard 3v3 1,096 \
                    Session Overview 5 days ago 4 Matches Ranked Doubles 2v2 1,012";
        let (sessions, heatmap) = extractor().extract(text);

        assert_eq!(sessions.len(), 2);
        assert_eq!(heatmap, vec![HeatmapEntry { date: date(2025, 11, 10), count: 13 }]);
    }

    #[test]
    fn test_heatmap_sorted_ascending() {
        let text = "Session Overview 2 hours ago 2 Matches Ranked Duel 1v1 800 \
                    Session Overview 1 week ago 3 Matches Ranked Duel 1v1 790 \
                    Session Overview 2 days ago 1 Match Hoops 640";
        let (sessions, heatmap) = extractor().extract(text);

        assert_eq!(sessions[0].raw_time_phrase, "2 hours ago");
        assert_eq!(sessions[2].matches[0].playlist, Playlist::Hoops);
        let dates: Vec<_> = heatmap.iter().map(|h| h.date).collect();
        assert_eq!(dates, vec![date(2025, 11, 8), date(2025, 11, 13), date(2025, 11, 15)]);
    }

    #[test]
    fn test_absolute_dated_sessions_land_in_heatmap() {
        let text = "Session Overview Nov 12, 2025 3 Matches Ranked Duel 1v1 800 \
                    Session Overview 2025-11-12 2 Matches Ranked Doubles 2v2 950 \
                    Session Overview 11/03/2025 1 Match Hoops 640 Get the Mobile App";
        let (sessions, heatmap) = extractor().extract(text);

        let phrases: Vec<_> = sessions.iter().map(|s| s.raw_time_phrase.as_str()).collect();
        assert_eq!(phrases, vec!["Nov 12, 2025", "2025-11-12", "11/03/2025"]);
        assert_eq!(sessions[0].derived_date, Some(date(2025, 11, 12)));
        assert_eq!(sessions[0].total_matches(), 3);
        assert_eq!(
            heatmap,
            vec![
                HeatmapEntry { date: date(2025, 11, 3), count: 1 },
                HeatmapEntry { date: date(2025, 11, 12), count: 5 },
            ]
        );
    }

    #[test]
    fn test_session_without_tallies_dropped() {
        let text = "Session Overview 1 day ago 3 Wins Goals / Shots 2 / 5 \
                    Session Overview 2 days ago 4 Matches Ranked Doubles 2v2 1,012";
        let (sessions, heatmap) = extractor().extract(text);

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].raw_time_phrase, "2 days ago");
        assert_eq!(heatmap, vec![HeatmapEntry { date: date(2025, 11, 13), count: 4 }]);
    }

    #[test]
    fn test_underivable_date_kept_out_of_heatmap() {
        let text = "Session Overview 99999999999 days ago 4 Matches Ranked Doubles 2v2 1,012";
        let (sessions, heatmap) = extractor().extract(text);

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].derived_date, None);
        assert!(heatmap.is_empty());
    }

    #[test]
    fn test_terminal_sentinel_closes_body() {
        let text = "Session Overview 1 day ago 2 Matches Ranked Duel 1v1 800 \
                    Premium users see more 7 Matches Ranked Duel 1v1 810";
        let (sessions, _) = extractor().extract(text);

        assert_eq!(sessions[0].matches.len(), 1);
        assert_eq!(sessions[0].total_matches(), 2);
    }

    #[test]
    fn test_unsupported_playlist_tally_skipped() {
        let text = "Session Overview 1 day ago 2 Matches Ranked 4v4 Quads 4v4 700 \
                    3 Matches Ranked Doubles 2v2 950";
        let (sessions, _) = extractor().extract(text);

        assert_eq!(sessions[0].matches.len(), 1);
        assert_eq!(sessions[0].matches[0].playlist, Playlist::Doubles2v2);
    }

    #[test]
    fn test_session_cap() {
        let block = "Session Overview 1 day ago 1 Match Ranked Duel 1v1 800 ";
        let text = block.repeat(25);

        let (sessions, heatmap) = extractor().extract(&text);
        assert_eq!(sessions.len(), 20);
        assert_eq!(heatmap[0].count, 20);

        let settings = ExtractorSettings {
            max_sessions: 3,
            ..ExtractorSettings::default()
        };
        let (sessions, _) = extractor_with(&settings).extract(&text);
        assert_eq!(sessions.len(), 3);
    }

    #[test]
    fn test_marker_without_time_phrase_is_skipped() {
        let text = "Session Overview loading Session Overview 1 day ago 1 Match Rumble 500";
        let (sessions, _) = extractor().extract(text);

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].matches[0].playlist, Playlist::Rumble);
    }

    #[test]
    fn test_no_sessions() {
        let (sessions, heatmap) = extractor().extract("Ranked Doubles 2v2 1,308");
        assert!(sessions.is_empty());
        assert!(heatmap.is_empty());
    }
}
