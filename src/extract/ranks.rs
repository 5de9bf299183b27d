use anyhow::Result;
use log::{debug, info};
use regex::Regex;

use crate::config::ExtractorSettings;
use crate::domain::tiers::{NUMERAL_PATTERN, UNRANKED, tier_alternation};
use crate::domain::{Playlist, RankEntry, RankMap};
use crate::errors::with_pattern_context;
use crate::extract::numbers::{capture_number, collapse_whitespace};

/// Ways of recovering a rank, tried in order until one yields a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RankStrategy {
    /// `<label> <rating><division noise><Tier N> Div <N>` in one pass
    Combined,
    /// Rating and bare tier searched separately in a window after the label
    Window,
}

const STRATEGIES: [RankStrategy; 2] = [RankStrategy::Combined, RankStrategy::Window];

#[derive(Debug, Clone, PartialEq, Eq)]
struct RankCandidate {
    tier: String,
    rating: u32,
}

impl RankCandidate {
    /// Only ranks with a rating or a real tier count as played
    fn is_provable(&self) -> bool {
        self.rating > 0 || self.tier != UNRANKED
    }
}

/// Patterns compiled for one playlist label
struct PlaylistPatterns {
    playlist: Playlist,
    label: &'static str,
    combined: Regex,
    rating: Regex,
}

/// Recovers current rating and tier per playlist from the overview text
pub struct RankExtractor {
    playlists: Vec<PlaylistPatterns>,
    tier_regex: Regex,
    window_chars: usize,
}

impl RankExtractor {
    pub fn new(settings: &ExtractorSettings) -> Result<Self> {
        let playlists = Playlist::ALL
            .iter()
            .map(|playlist| Self::compile_playlist(*playlist))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            playlists,
            tier_regex: Self::compile_tier_regex()?,
            window_chars: settings.rank_window_chars,
        })
    }

    /// Extract every playlist with provable rank data
    pub fn extract(&self, text: &str) -> RankMap {
        let mut ranks = RankMap::new();

        for patterns in &self.playlists {
            if !text.contains(patterns.label) {
                continue;
            }

            let Some(candidate) = self.run_strategies(text, patterns) else {
                debug!("No rank data for {}", patterns.playlist);
                continue;
            };

            info!("  [OK] {}: {} ({} MMR)", patterns.playlist, candidate.tier, candidate.rating);
            ranks.entry(patterns.playlist).or_insert(RankEntry {
                playlist: patterns.playlist,
                tier: candidate.tier,
                rating: candidate.rating,
            });
        }

        ranks
    }

    // --- Construction Helpers ---

    fn compile_playlist(playlist: Playlist) -> Result<PlaylistPatterns> {
        let label = playlist.page_label();
        let escaped = regex::escape(label);

        let combined = format!(
            r"{escaped}\s+(\d{{1,4}}(?:,\d{{3}})?)[Div\d\s]*?((?:{tiers})\s+(?:{num})\s+Div\s+(?:{num}))",
            tiers = tier_alternation(),
            num = NUMERAL_PATTERN,
        );
        let rating = format!(r"{escaped}\s*(\d{{1,4}}(?:,\d{{3}})?)");

        Ok(PlaylistPatterns {
            playlist,
            label,
            combined: with_pattern_context(Regex::new(&combined), "combined rank")?,
            rating: with_pattern_context(Regex::new(&rating), "rank rating")?,
        })
    }

    fn compile_tier_regex() -> Result<Regex> {
        let pattern = format!(
            r"((?:{tiers})(?:\s+(?:{num}))?(?:\s+Div\s+(?:{num}))?)",
            tiers = tier_alternation(),
            num = NUMERAL_PATTERN,
        );
        with_pattern_context(Regex::new(&pattern), "tier")
    }

    // --- Strategies ---

    fn run_strategies(&self, text: &str, patterns: &PlaylistPatterns) -> Option<RankCandidate> {
        STRATEGIES.iter().find_map(|strategy| {
            let candidate = self.attempt(*strategy, text, patterns)?;
            debug!("{} resolved by {:?} strategy", patterns.playlist, strategy);
            Some(candidate)
        })
    }

    fn attempt(&self, strategy: RankStrategy, text: &str, patterns: &PlaylistPatterns) -> Option<RankCandidate> {
        match strategy {
            RankStrategy::Combined => Self::attempt_combined(text, patterns),
            RankStrategy::Window => self.attempt_window(text, patterns),
        }
    }

    fn attempt_combined(text: &str, patterns: &PlaylistPatterns) -> Option<RankCandidate> {
        let captures = patterns.combined.captures(text)?;
        let rating = capture_number(&captures, 1)?;
        let tier = collapse_whitespace(captures.get(2)?.as_str());

        Some(RankCandidate { tier, rating }).filter(RankCandidate::is_provable)
    }

    fn attempt_window(&self, text: &str, patterns: &PlaylistPatterns) -> Option<RankCandidate> {
        let start = text.find(patterns.label)?;
        let window = Self::window_after(&text[start..], self.window_chars);

        let rating = patterns
            .rating
            .captures(window)
            .and_then(|captures| capture_number(&captures, 1))
            .unwrap_or(0);

        let tier = self
            .tier_regex
            .find(window)
            .map(|m| collapse_whitespace(m.as_str()))
            .unwrap_or_else(|| UNRANKED.to_string());

        Some(RankCandidate { tier, rating }).filter(RankCandidate::is_provable)
    }

    /// First `chars` characters of `text`, cut on a char boundary
    fn window_after(text: &str, chars: usize) -> &str {
        match text.char_indices().nth(chars) {
            Some((end, _)) => &text[..end],
            None => text,
        }
    }
}
