// Track model
use serde::{Deserialize, Serialize};

/// One audio sample in the catalog. A track without `source_uri` is a
/// placeholder and can never be played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration_label: String, // Display only, never checked against the media
    #[serde(default)]
    pub source_uri: Option<String>,
    #[serde(default)]
    pub waveform: Vec<f32>, // Normalized 0.0-1.0, decorative
    #[serde(default)]
    pub is_live: bool,
}

impl Track {
    pub fn is_playable(&self) -> bool {
        self.playable_source().is_some()
    }

    /// The source URI, treating a blank string the same as no source at all
    pub fn playable_source(&self) -> Option<&str> {
        self.source_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(source_uri: Option<&str>) -> Track {
        Track {
            id: "t".to_string(),
            title: "T".to_string(),
            description: String::new(),
            duration_label: "0:30".to_string(),
            source_uri: source_uri.map(str::to_string),
            waveform: vec![],
            is_live: false,
        }
    }

    #[test]
    fn test_placeholder_is_not_playable() {
        assert!(!track(None).is_playable());
        assert!(!track(Some("   ")).is_playable());
    }

    #[test]
    fn test_playable_source_is_trimmed() {
        assert_eq!(track(Some(" a.mp3 ")).playable_source(), Some("a.mp3"));
    }

    #[test]
    fn test_optional_fields_default_when_missing() {
        let json = r#"{"id":"x","title":"X","description":"d","duration_label":"1:00"}"#;
        let parsed: Track = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.source_uri, None);
        assert!(parsed.waveform.is_empty());
        assert!(!parsed.is_live);
    }
}
