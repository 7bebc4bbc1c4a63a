// Audio session controller
// Single source of truth for "what is playing". Play state is only ever
// derived from resource notifications, never from the requests we issue.

use serde::Serialize;

use super::resource::{PlaybackResource, ResourceEvent, ResourceEvents};
use crate::library::{Catalog, Track};

/// Lifecycle of the bound source as last reported by the resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    /// Nothing bound
    #[default]
    Idle,
    /// Play requested, waiting for the resource to confirm
    Loading,
    Playing,
    /// Paused or ended
    Paused,
    Failed,
}

/// Read-only snapshot for rendering the player
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackStatus {
    pub track: Track,
    pub track_index: usize,
    pub is_playing: bool,
    pub phase: PlaybackPhase,
    pub loaded_source: Option<String>,
    pub last_error: Option<String>,
}

pub struct AudioSession<R: PlaybackResource> {
    catalog: Catalog,
    resource: R,
    events: ResourceEvents,
    current_index: usize,
    loaded_source: Option<String>,
    phase: PlaybackPhase,
    last_error: Option<String>,
    released: bool,
}

impl<R: PlaybackResource> AudioSession<R> {
    pub fn new(catalog: Catalog, resource: R, events: ResourceEvents) -> Self {
        Self {
            catalog,
            resource,
            events,
            current_index: 0,
            loaded_source: None,
            phase: PlaybackPhase::Idle,
            last_error: None,
            released: false,
        }
    }

    /// Play or pause the current track
    pub fn toggle_play(&mut self) {
        if self.released {
            tracing::warn!("toggle_play called after the session was released");
            return;
        }

        let track = self.current_track();
        let Some(uri) = track.playable_source().map(str::to_string) else {
            tracing::debug!(track = %track.id, "current track is a placeholder, ignoring toggle");
            return;
        };

        let bound = self.is_bound_to(&uri);
        match self.phase {
            PlaybackPhase::Playing if bound => self.request_pause(),
            PlaybackPhase::Loading if bound => {
                tracing::debug!(uri = %uri, "play already requested, waiting for the resource");
            }
            phase => self.request_play(&uri, !bound || phase == PlaybackPhase::Failed),
        }
    }

    /// Make `track_id` the current track and start it.
    /// Selecting the current track again toggles it.
    pub fn select_and_play(&mut self, track_id: &str) {
        if self.released {
            tracing::warn!(track = %track_id, "select_and_play called after the session was released");
            return;
        }

        let Some(index) = self.catalog.position(track_id) else {
            tracing::warn!(track = %track_id, "unknown track id");
            return;
        };

        let Some(uri) = self
            .catalog
            .get(index)
            .and_then(Track::playable_source)
            .map(str::to_string)
        else {
            tracing::debug!(track = %track_id, "track has no source, ignoring selection");
            return;
        };

        if index == self.current_index {
            self.toggle_play();
            return;
        }

        tracing::info!(from = self.current_index, to = index, track = %track_id, "switching track");
        self.current_index = index;

        let bound = self.is_bound_to(&uri);
        if bound && matches!(self.phase, PlaybackPhase::Playing | PlaybackPhase::Loading) {
            // Another catalog entry already playing the same source
            return;
        }
        self.request_play(&uri, !bound || self.phase == PlaybackPhase::Failed);
    }

    /// Apply one lifecycle notification from the resource
    pub fn handle_event(&mut self, event: ResourceEvent) {
        if self.released {
            tracing::trace!(?event, "notification after release ignored");
            return;
        }

        match event {
            ResourceEvent::Started => {
                if self.loaded_source.is_none() {
                    tracing::warn!("resource reported start with no bound source");
                    return;
                }
                self.phase = PlaybackPhase::Playing;
                self.last_error = None;
                tracing::debug!(source = ?self.loaded_source, "playback started");
            }
            ResourceEvent::Paused | ResourceEvent::Ended => {
                if self.loaded_source.is_some() {
                    self.phase = PlaybackPhase::Paused;
                }
                tracing::debug!(?event, "playback stopped");
            }
            ResourceEvent::Failed { reason } => self.fail(reason),
        }
    }

    /// Drain every queued notification. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.events.try_next() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    pub fn current_status(&self) -> PlaybackStatus {
        PlaybackStatus {
            track: self.current_track().clone(),
            track_index: self.current_index,
            is_playing: self.is_playing(),
            phase: self.phase,
            loaded_source: self.loaded_source.clone(),
            last_error: self.last_error.clone(),
        }
    }

    pub fn current_track(&self) -> &Track {
        // current_index only ever comes from Catalog::position, and catalogs are never empty
        &self.catalog.tracks()[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn loaded_source(&self) -> Option<&str> {
        self.loaded_source.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Stop and release the resource. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.resource.release() {
            tracing::warn!("Failed to release playback resource: {:#}", e);
        }
        self.loaded_source = None;
        self.phase = PlaybackPhase::Idle;
        self.released = true;
        tracing::info!("audio session released");
    }

    fn is_bound_to(&self, uri: &str) -> bool {
        self.loaded_source.as_deref() == Some(uri)
    }

    fn request_pause(&mut self) {
        // Phase only changes when the resource confirms the pause
        if let Err(e) = self.resource.pause() {
            self.fail(format!("Failed to pause: {:#}", e));
        }
    }

    fn request_play(&mut self, uri: &str, reload: bool) {
        if reload {
            if matches!(self.phase, PlaybackPhase::Playing | PlaybackPhase::Loading) {
                if let Err(e) = self.resource.pause() {
                    tracing::warn!("Failed to stop previous source: {:#}", e);
                }
            }
            if let Err(e) = self.resource.load(uri) {
                self.loaded_source = None;
                self.fail(format!("Failed to load {}: {:#}", uri, e));
                return;
            }
            self.loaded_source = Some(uri.to_string());
            tracing::debug!(uri = %uri, "source bound");
        }

        self.last_error = None;
        match self.resource.play() {
            Ok(()) => self.phase = PlaybackPhase::Loading,
            Err(e) => self.fail(format!("Failed to start playback: {:#}", e)),
        }
    }

    fn fail(&mut self, reason: String) {
        tracing::warn!(source = ?self.loaded_source, "playback failed: {}", reason);
        self.phase = PlaybackPhase::Failed;
        self.last_error = Some(reason);
    }
}

impl<R: PlaybackResource> Drop for AudioSession<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
