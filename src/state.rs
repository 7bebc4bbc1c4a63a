// Application state management
use chrono::Utc;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

use crate::audio::{AudioSession, PlaybackResource};
use crate::mailing::MailingList;
use crate::page::{BookContent, PageView};
use crate::reveal::{ElementId, Layout, ScrollRevealEngine};

/// Everything the page shell holds for one mounted page
pub struct AppState<R: PlaybackResource> {
    pub session: Arc<Mutex<AudioSession<R>>>,
    pub reveal: Arc<Mutex<ScrollRevealEngine>>,
    pub page: Arc<Mutex<PageView>>,
    pub mailing: MailingList,
    pub book: BookContent,
    pub app_dir: PathBuf,
}

impl<R: PlaybackResource> AppState<R> {
    pub fn new(
        session: AudioSession<R>,
        reveal: ScrollRevealEngine,
        page: PageView,
        mailing: MailingList,
        book: BookContent,
        app_dir: PathBuf,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            reveal: Arc::new(Mutex::new(reveal)),
            page: Arc::new(Mutex::new(page)),
            mailing,
            book,
            app_dir,
        }
    }

    /// Initial reveal pass so content above the fold shows without scrolling
    pub fn ready<L: Layout>(
        &self,
        scroll_y: f64,
        layout: &L,
        apply: impl FnMut(&ElementId),
    ) -> Vec<ElementId> {
        tracing::debug!(scroll_y, "page ready, running initial reveal pass");
        self.on_scroll(scroll_y, layout, apply)
    }

    /// Handle a scroll or resize signal. `apply` is called for each newly
    /// revealed element after the registry lock is released, so it may
    /// trigger another evaluation.
    pub fn on_scroll<L: Layout>(
        &self,
        scroll_y: f64,
        layout: &L,
        mut apply: impl FnMut(&ElementId),
    ) -> Vec<ElementId> {
        let revealed = {
            let mut reveal = self.reveal.lock();
            if !reveal.is_attached() {
                tracing::trace!("scroll signal after unmount ignored");
                return Vec::new();
            }
            reveal.evaluate(layout)
        };

        self.page.lock().on_scroll(scroll_y);

        for id in &revealed {
            apply(id);
        }
        revealed
    }

    /// Record a successful signup so the confirmation banner shows
    pub fn mark_subscribed(&self) {
        self.page.lock().mark_subscribed(Utc::now());
    }

    /// Tear down: release the playback resource and detach the scroll listener
    pub fn unmount(&self) {
        self.session.lock().shutdown();
        self.reveal.lock().detach();
        tracing::info!(app_dir = %self.app_dir.display(), "page unmounted");
    }
}
