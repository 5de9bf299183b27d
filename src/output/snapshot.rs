use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::domain::{ExtractionResult, HeatmapEntry, LifetimeLabel, RankMap, Session};
use crate::errors::file_context;

/// Rank mapping plus the lifetime totals under a reserved key
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    #[serde(flatten)]
    pub ranks: RankMap,
    #[serde(rename = "__lifetime__", skip_serializing_if = "BTreeMap::is_empty")]
    pub lifetime: BTreeMap<LifetimeLabel, String>,
}

/// JSON document handed to the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub timestamp: DateTime<Local>,
    pub overview: Overview,
    pub sessions: Vec<Session>,
    pub activity_heatmap: Vec<HeatmapEntry>,
    pub performance: BTreeMap<String, String>,
}

impl StatsSnapshot {
    /// Copy an extraction result into a timestamped document
    pub fn new(
        timestamp: DateTime<Local>,
        result: &ExtractionResult,
        performance: BTreeMap<String, String>,
    ) -> Self {
        let lifetime = result
            .lifetime
            .iter()
            .map(|(label, stat)| (*label, stat.value.clone()))
            .collect();

        Self {
            timestamp,
            overview: Overview {
                ranks: result.ranks.clone(),
                lifetime,
            },
            sessions: result.sessions.clone(),
            activity_heatmap: result.heatmap.clone(),
            performance,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize stats snapshot")
    }
}

/// Write the snapshot as pretty JSON
pub fn save_snapshot(path: &Path, snapshot: &StatsSnapshot) -> Result<()> {
    let json = snapshot.to_json()?;
    fs::write(path, json).with_context(|| file_context("write", &path.display().to_string()))?;

    info!("Stats saved to {}", path.display());
    Ok(())
}
