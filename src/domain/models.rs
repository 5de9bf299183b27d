use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::playlist::Playlist;
use super::tiers::{self, TierParts};

/// Current rank in one playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub playlist: Playlist,
    #[serde(rename = "rank")]
    pub tier: String,
    #[serde(rename = "mmr")]
    pub rating: u32,
}

impl RankEntry {
    /// Tier name, sub-tier and division as numbers; `None` when unranked
    pub fn tier_parts(&self) -> Option<TierParts> {
        tiers::parse_tier(&self.tier)
    }

    /// Icon-style key such as `champion_iii`
    pub fn tier_key(&self) -> String {
        tiers::normalize_tier_key(&self.tier)
    }
}

/// "N Matches <playlist> <rating>" line inside a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTally {
    pub count: u32,
    pub playlist: Playlist,
    #[serde(rename = "mmr")]
    pub rating_at_time: u32,
}

/// Block of matches grouped under one "Session Overview" heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "time_ago")]
    pub raw_time_phrase: String,
    #[serde(rename = "date")]
    pub derived_date: Option<NaiveDate>,
    #[serde(rename = "wins", default)]
    pub win_count: u32,
    pub matches: Vec<MatchTally>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assists: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saves: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mvp_count: Option<u32>,
}

impl Session {
    pub fn total_matches(&self) -> u32 {
        self.matches.iter().map(|m| m.count).sum()
    }
}

/// Matches played on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapEntry {
    pub date: NaiveDate,
    pub count: u32,
}

/// Career totals shown on the overview as `<Label><value>#<global rank>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifetimeLabel {
    Wins,
    Goals,
    Assists,
    Saves,
    Shots,
    #[serde(rename = "MVPs")]
    Mvps,
    #[serde(rename = "Goal Shot Ratio")]
    GoalShotRatio,
    #[serde(rename = "TRN Score")]
    TrnScore,
}

impl LifetimeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifetimeLabel::Wins => "Wins",
            LifetimeLabel::Goals => "Goals",
            LifetimeLabel::Assists => "Assists",
            LifetimeLabel::Saves => "Saves",
            LifetimeLabel::Shots => "Shots",
            LifetimeLabel::Mvps => "MVPs",
            LifetimeLabel::GoalShotRatio => "Goal Shot Ratio",
            LifetimeLabel::TrnScore => "TRN Score",
        }
    }
}

impl fmt::Display for LifetimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeStat {
    pub label: LifetimeLabel,
    /// Kept as rendered: may carry thousands separators or a trailing `%`
    pub value: String,
}

pub type RankMap = BTreeMap<Playlist, RankEntry>;
pub type LifetimeMap = BTreeMap<LifetimeLabel, LifetimeStat>;

/// Everything recovered from one page text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub ranks: RankMap,
    pub sessions: Vec<Session>,
    pub heatmap: Vec<HeatmapEntry>,
    pub lifetime: LifetimeMap,
}

impl ExtractionResult {
    pub fn total_matches(&self) -> u32 {
        self.sessions.iter().map(Session::total_matches).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
            && self.sessions.is_empty()
            && self.heatmap.is_empty()
            && self.lifetime.is_empty()
    }

    pub fn summary(&self) -> ExtractionSummary {
        ExtractionSummary {
            playlists: self.ranks.len(),
            sessions: self.sessions.len(),
            heatmap_days: self.heatmap.len(),
            lifetime_stats: self.lifetime.len(),
            total_matches: self.total_matches(),
            failed_families: Vec::new(),
        }
    }
}

/// Independent data families recovered from the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFamily {
    Ranks,
    Sessions,
    Lifetime,
}

impl DataFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFamily::Ranks => "ranks",
            DataFamily::Sessions => "sessions",
            DataFamily::Lifetime => "lifetime",
        }
    }
}

/// Diagnostic counts derived from a result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionSummary {
    pub playlists: usize,
    pub sessions: usize,
    pub heatmap_days: usize,
    pub lifetime_stats: usize,
    pub total_matches: u32,
    /// Families whose extractor failed and were degraded to empty
    pub failed_families: Vec<DataFamily>,
}
