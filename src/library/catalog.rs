use std::collections::HashSet;
use thiserror::Error;

use super::track::Track;

#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("Track catalog is empty")]
    Empty,

    #[error("Duplicate track id: {0}")]
    DuplicateId(String),

    #[error("Track {id} has an invalid waveform sample at {index}: {value}")]
    InvalidWaveform { id: String, index: usize, value: f32 },
}

/// Validated, non-empty list of tracks in display order
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for track in &tracks {
            if !seen.insert(track.id.as_str()) {
                return Err(CatalogError::DuplicateId(track.id.clone()));
            }

            if let Some((index, &value)) = track
                .waveform
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_finite() || !(0.0..=1.0).contains(*v))
            {
                return Err(CatalogError::InvalidWaveform {
                    id: track.id.clone(),
                    index,
                    value,
                });
            }
        }

        Ok(Self { tracks })
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// The samples shipped with the page
pub fn default_tracks() -> Vec<Track> {
    vec![
        Track {
            id: "amara-preview".to_string(),
            title: "Amara Preview".to_string(),
            description: "Experience Amara's world in her own voice".to_string(),
            duration_label: "2:34".to_string(),
            source_uri: Some(
                "https://docs.google.com/uc?export=download&id=141SpfNCtA0EwsomO6mIx_zXAIbx9p2d6"
                    .to_string(),
            ),
            waveform: vec![
                0.20, 0.35, 0.60, 0.45, 0.80, 0.55, 0.30, 0.70, 0.90, 0.65, 0.40, 0.25, 0.50,
                0.75, 0.60, 0.35,
            ],
            is_live: true,
        },
        Track {
            id: "river-whispers".to_string(),
            title: "River Whispers".to_string(),
            description: "The river speaks its ancient language".to_string(),
            duration_label: "3:12".to_string(),
            source_uri: None,
            waveform: vec![
                0.15, 0.25, 0.40, 0.30, 0.55, 0.45, 0.35, 0.50, 0.60, 0.40, 0.30, 0.20, 0.35,
                0.45, 0.30, 0.20,
            ],
            is_live: false,
        },
    ]
}
