pub mod dates;
pub mod lifetime;
pub mod numbers;
pub mod performance;
pub mod ranks;
pub mod sessions;

use anyhow::Result;
use log::{info, warn};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::config::ExtractorSettings;
use crate::domain::{DataFamily, ExtractionResult, ExtractionSummary};

pub use dates::{Clock, DateNormalizer, FixedClock, SystemClock};
pub use lifetime::LifetimeExtractor;
pub use performance::PerformanceExtractor;
pub use ranks::RankExtractor;
pub use sessions::SessionExtractor;

/// Runs every family extractor over one page text and merges the results.
///
/// Holds only compiled patterns and a clock, so one instance can serve
/// concurrent callers.
pub struct StatsExtractor {
    ranks: RankExtractor,
    sessions: SessionExtractor,
    lifetime: LifetimeExtractor,
}

impl StatsExtractor {
    pub fn new(settings: &ExtractorSettings, clock: Arc<dyn Clock>) -> Result<Self> {
        let dates = DateNormalizer::new(clock)?;

        Ok(Self {
            ranks: RankExtractor::new(settings)?,
            sessions: SessionExtractor::new(settings, dates)?,
            lifetime: LifetimeExtractor::new()?,
        })
    }

    pub fn with_system_clock(settings: &ExtractorSettings) -> Result<Self> {
        Self::new(settings, Arc::new(SystemClock))
    }

    /// Extract every family; never fails, a broken family comes back empty
    pub fn extract_all(&self, text: &str) -> ExtractionResult {
        self.extract_with_summary(text).0
    }

    /// Like [`Self::extract_all`], also reporting counts and degraded families
    pub fn extract_with_summary(&self, text: &str) -> (ExtractionResult, ExtractionSummary) {
        let mut failed = Vec::new();

        info!(">> Parsing ranks...");
        let ranks = Self::isolate(DataFamily::Ranks, &mut failed, || self.ranks.extract(text));

        info!(">> Parsing session-grouped matches...");
        let (sessions, heatmap) =
            Self::isolate(DataFamily::Sessions, &mut failed, || self.sessions.extract(text));

        info!(">> Parsing lifetime stats...");
        let lifetime = Self::isolate(DataFamily::Lifetime, &mut failed, || self.lifetime.extract(text));

        let result = ExtractionResult {
            ranks,
            sessions,
            heatmap,
            lifetime,
        };

        let mut summary = result.summary();
        summary.failed_families = failed;

        info!(
            "  → {} playlists, {} sessions, {} heatmap days, {} lifetime stats",
            summary.playlists, summary.sessions, summary.heatmap_days, summary.lifetime_stats
        );
        (result, summary)
    }

    /// Run one family, turning a panic into that family's empty value
    fn isolate<T: Default>(family: DataFamily, failed: &mut Vec<DataFamily>, run: impl FnOnce() -> T) -> T {
        match panic::catch_unwind(AssertUnwindSafe(run)) {
            Ok(value) => value,
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown error".to_string());
                warn!("! Error parsing {}: {}", family.as_str(), reason);
                failed.push(family);
                T::default()
            }
        }
    }
}
