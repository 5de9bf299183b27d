use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use log::debug;
use regex::Regex;
use std::sync::Arc;

use crate::errors::with_pattern_context;

/// Absolute formats tried in order; the first that parses wins
const ABSOLUTE_FORMATS: [&str; 5] = ["%m/%d/%Y", "%Y-%m-%d", "%d/%m/%Y", "%b %d, %Y", "%B %d, %Y"];

/// Months are approximated as 30 days
const DAYS_PER_MONTH: u64 = 30;
const DAYS_PER_WEEK: u64 = 7;

/// Source of "today" for relative phrases
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar day of the running machine
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Turns "3 days ago" or "Nov 12, 2025" into a calendar day
pub struct DateNormalizer {
    clock: Arc<dyn Clock>,
    integer_regex: Regex,
}

impl DateNormalizer {
    pub fn new(clock: Arc<dyn Clock>) -> Result<Self> {
        let integer_regex = with_pattern_context(Regex::new(r"\d+"), "relative date integer")?;
        Ok(Self {
            clock,
            integer_regex,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Resolve a relative phrase against today's date.
    ///
    /// Anything finer than a day collapses to today. `None` when the phrase
    /// has no integer, no known unit, or the offset falls off the calendar.
    pub fn normalize_relative(&self, phrase: &str) -> Option<NaiveDate> {
        let text = phrase.to_lowercase();
        let amount: u64 = self.integer_regex.find(&text)?.as_str().parse().ok()?;
        let today = self.today();

        if ["second", "minute", "hour"].iter().any(|unit| text.contains(unit)) {
            Some(today)
        } else if text.contains("day") {
            today.checked_sub_days(Days::new(amount))
        } else if text.contains("week") {
            today.checked_sub_days(Days::new(amount.checked_mul(DAYS_PER_WEEK)?))
        } else if text.contains("month") {
            today.checked_sub_days(Days::new(amount.checked_mul(DAYS_PER_MONTH)?))
        } else {
            debug!("No date unit in phrase: {:?}", phrase);
            None
        }
    }

    /// Parse an absolute date in one of the accepted formats
    pub fn normalize_absolute(&self, phrase: &str) -> Option<NaiveDate> {
        let trimmed = phrase.trim();
        ABSOLUTE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
    }

    /// Relative first, then absolute
    pub fn normalize(&self, phrase: &str) -> Option<NaiveDate> {
        self.normalize_relative(phrase)
            .or_else(|| self.normalize_absolute(phrase))
    }
}
