pub struct ExtractorSettings {
    /// Session blocks examined per page; later ones are never scanned
    pub max_sessions: usize,
    /// Characters after a playlist label searched by the fallback rank scan
    pub rank_window_chars: usize,
    pub session_marker: &'static str,
    /// Phrases that close the session list (the marker also closes a body)
    pub terminal_sentinels: Vec<&'static str>,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            max_sessions: 20,
            rank_window_chars: 200,
            session_marker: "Session Overview",
            terminal_sentinels: vec!["Get the Mobile", "Premium users"],
        }
    }
}

pub struct AppConfig {
    pub extractor: ExtractorSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            extractor: ExtractorSettings::default(),
        }
    }
}
