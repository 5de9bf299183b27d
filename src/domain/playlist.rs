use serde::{Deserialize, Serialize};
use std::fmt;

/// Competitive queue a rank or match tally belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Playlist {
    #[serde(rename = "Ranked Duel 1v1")]
    Duel1v1,
    #[serde(rename = "Ranked Doubles 2v2")]
    Doubles2v2,
    #[serde(rename = "Ranked Standard 3v3")]
    Standard3v3,
    #[serde(rename = "Hoops")]
    Hoops,
    #[serde(rename = "Rumble")]
    Rumble,
    #[serde(rename = "Dropshot")]
    Dropshot,
    #[serde(rename = "Snow Day")]
    SnowDay,
}

impl Playlist {
    pub const ALL: [Playlist; 7] = [
        Playlist::Duel1v1,
        Playlist::Doubles2v2,
        Playlist::Standard3v3,
        Playlist::Hoops,
        Playlist::Rumble,
        Playlist::Dropshot,
        Playlist::SnowDay,
    ];

    /// Name used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Playlist::Duel1v1 => "Ranked Duel 1v1",
            Playlist::Doubles2v2 => "Ranked Doubles 2v2",
            Playlist::Standard3v3 => "Ranked Standard 3v3",
            Playlist::Hoops => "Hoops",
            Playlist::Rumble => "Rumble",
            Playlist::Dropshot => "Dropshot",
            Playlist::SnowDay => "Snow Day",
        }
    }

    /// Label as it is rendered on the profile overview
    pub fn page_label(&self) -> &'static str {
        match self {
            Playlist::SnowDay => "Snowday",
            other => other.as_str(),
        }
    }

    /// Map a captured playlist label onto the closed set by keyword containment.
    ///
    /// Checked in a fixed order so "Ranked Standard 3v3" never lands in a
    /// shorter mode by accident. Unknown labels (e.g. "4v4 Quads") yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();

        if lower.contains("standard") || lower.contains("3v3") {
            Some(Playlist::Standard3v3)
        } else if lower.contains("doubles") || lower.contains("2v2") {
            Some(Playlist::Doubles2v2)
        } else if lower.contains("duel") || lower.contains("1v1") {
            Some(Playlist::Duel1v1)
        } else if lower.contains("hoops") {
            Some(Playlist::Hoops)
        } else if lower.contains("rumble") {
            Some(Playlist::Rumble)
        } else if lower.contains("dropshot") {
            Some(Playlist::Dropshot)
        } else if lower.contains("snow") {
            Some(Playlist::SnowDay)
        } else {
            None
        }
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
