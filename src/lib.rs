// The Current's Edge - book microsite core
// Module declarations
pub mod audio;
pub mod commands;
pub mod library;
pub mod mailing;
pub mod page;
pub mod reveal;
pub mod settings;
pub mod state;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use audio::{AudioSession, PlaybackResource, ResourceEvents};
use library::Catalog;
use mailing::{JsonFileStore, MailingList};
use page::PageView;
use reveal::ScrollRevealEngine;
use settings::PageSettings;
use state::AppState;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// `info` filter; calling this more than once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build the page state from the settings in `app_dir`.
///
/// `resource` is the host's playback capability; it reports lifecycle events
/// through the notifier paired with `events` (see [`audio::resource_channel`]).
pub fn mount<R: PlaybackResource>(
    app_dir: PathBuf,
    resource: R,
    events: ResourceEvents,
) -> Result<AppState<R>> {
    let settings = PageSettings::load(&app_dir)
        .map_err(anyhow::Error::msg)
        .context("Failed to load page settings")?;

    let catalog = Catalog::new(settings.tracks.clone()).context("Invalid track catalog")?;

    let store = Arc::new(JsonFileStore::new(app_dir.join("storage")));
    let mailing = MailingList::new(store, settings.signup.storage_key.clone());

    let reveal = ScrollRevealEngine::new(settings.reveal.threshold_px);
    let page = PageView::new(settings.nav.solid_after_px, settings.signup.confirmation_ms);
    let session = AudioSession::new(catalog, resource, events);

    tracing::info!(
        tracks = session.catalog().len(),
        app_dir = %app_dir.display(),
        "page mounted"
    );

    Ok(AppState::new(
        session,
        reveal,
        page,
        mailing,
        settings.book,
        app_dir,
    ))
}
