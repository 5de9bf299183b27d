use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use log::{info, warn};
use scraper::Html;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::domain::ExtractionSummary;
use crate::errors::file_context;
use crate::extract::{Clock, PerformanceExtractor, StatsExtractor};
use crate::fetchers::flatten_html;
use crate::output::{StatsSnapshot, save_snapshot};

/// What to read and where to write
#[derive(Debug, Clone, Default)]
pub struct ExtractRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Force HTML flattening even without an .html extension
    pub html: bool,
    pub performance: Option<PathBuf>,
}

pub struct ExtractionService {
    extractor: StatsExtractor,
    performance: PerformanceExtractor,
}

impl ExtractionService {
    pub fn new(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        Ok(Self {
            extractor: StatsExtractor::new(&config.extractor, clock)?,
            performance: PerformanceExtractor::new()?,
        })
    }

    pub fn run(&self, request: &ExtractRequest) -> Result<StatsSnapshot> {
        info!("=== Starting Extraction ===\n");

        // Step 1: Load page text
        let text = self.load_page_text(&request.input, request.html)?;
        info!("  → Loaded {} characters from {}\n", text.len(), request.input.display());

        // Step 2: Extract all families
        let (result, summary) = self.extractor.extract_with_summary(&text);
        if result.is_empty() {
            warn!("No stats recovered from {}", request.input.display());
        }

        // Step 3: Optional performance page
        let performance = match &request.performance {
            Some(path) => self.extract_performance(path)?,
            None => BTreeMap::new(),
        };

        // Step 4: Write snapshot
        let snapshot = StatsSnapshot::new(Local::now(), &result, performance);
        self.write_output(request.output.as_deref(), &snapshot)?;

        Self::print_summary(&summary, snapshot.performance.len());
        info!("=== Extraction Complete ===");
        Ok(snapshot)
    }

    /// Auxiliary stats from a saved performance page
    pub fn extract_performance(&self, path: &Path) -> Result<BTreeMap<String, String>> {
        info!(">> Parsing performance from {}...", path.display());
        let html = Self::read_file(path)?;
        Ok(self.performance.extract(&Html::parse_document(&html)))
    }

    // --- Input ---

    fn load_page_text(&self, path: &Path, force_html: bool) -> Result<String> {
        let raw = Self::read_file(path)?;

        if force_html || Self::is_html_file(path) {
            Ok(flatten_html(&raw))
        } else {
            Ok(raw)
        }
    }

    fn is_html_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
    }

    fn read_file(path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| file_context("read", &path.display().to_string()))
    }

    // --- Output ---

    fn write_output(&self, output: Option<&Path>, snapshot: &StatsSnapshot) -> Result<()> {
        match output {
            Some(path) => save_snapshot(path, snapshot),
            None => {
                println!("{}", snapshot.to_json()?);
                Ok(())
            }
        }
    }

    fn print_summary(summary: &ExtractionSummary, performance_stats: usize) {
        eprintln!("\n{}", "Summary:".bold());
        eprintln!("  Playlists: {}", summary.playlists.to_string().green());
        eprintln!("  Sessions: {}", summary.sessions.to_string().green());
        eprintln!("  Heatmap Days: {}", summary.heatmap_days.to_string().green());
        eprintln!("  Lifetime Stats: {}", summary.lifetime_stats.to_string().green());
        eprintln!("  Performance Stats: {}", performance_stats.to_string().green());
        eprintln!("  Total Matches: {}", summary.total_matches.to_string().green());

        for family in &summary.failed_families {
            eprintln!("  {} {} extraction failed, left empty", "!".red(), family.as_str());
        }
    }
}
