// Small pieces of page chrome state: nav bar, excerpt modal, signup banner
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Snapshot sent to the page for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub nav_solid: bool,
    pub excerpt_open: bool,
    pub signup_confirmed: bool,
}

#[derive(Debug, Clone)]
pub struct PageView {
    solid_after_px: f64,
    confirmation: Duration,
    nav_solid: bool,
    excerpt_open: bool,
    confirmed_until: Option<DateTime<Utc>>,
}

impl PageView {
    pub fn new(solid_after_px: f64, confirmation_ms: i64) -> Self {
        Self {
            solid_after_px,
            confirmation: Duration::milliseconds(confirmation_ms.max(0)),
            nav_solid: false,
            excerpt_open: false,
            confirmed_until: None,
        }
    }

    /// Returns whether the nav bar is solid at this scroll offset
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let solid = scroll_y > self.solid_after_px;
        if solid != self.nav_solid {
            tracing::trace!(solid, scroll_y, "nav bar style changed");
            self.nav_solid = solid;
        }
        self.nav_solid
    }

    pub fn nav_solid(&self) -> bool {
        self.nav_solid
    }

    pub fn open_excerpt(&mut self) {
        self.excerpt_open = true;
    }

    pub fn close_excerpt(&mut self) {
        self.excerpt_open = false;
    }

    pub fn excerpt_open(&self) -> bool {
        self.excerpt_open
    }

    pub fn mark_subscribed(&mut self, now: DateTime<Utc>) {
        let until = now
            .checked_add_signed(self.confirmation)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.confirmed_until = Some(until);
    }

    /// The "you're on the list" banner, shown for a short while after signup
    pub fn signup_confirmed(&self, now: DateTime<Utc>) -> bool {
        self.confirmed_until.is_some_and(|until| now < until)
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> PageSnapshot {
        PageSnapshot {
            nav_solid: self.nav_solid,
            excerpt_open: self.excerpt_open,
            signup_confirmed: self.signup_confirmed(now),
        }
    }
}
