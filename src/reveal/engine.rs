use std::collections::HashMap;

use super::layout::{ElementId, Layout};

/// Default distance (px) above the bottom edge of the viewport an element
/// must reach before it is revealed
pub const DEFAULT_THRESHOLD_PX: f64 = 80.0;

/// Registry of revealable elements.
///
/// Each element is revealed at most once. Revealed elements are dropped from
/// `pending`, so a scroll tick only costs as much as the elements still hidden.
#[derive(Debug)]
pub struct ScrollRevealEngine {
    threshold_px: f64,
    revealed: HashMap<ElementId, bool>,
    pending: Vec<ElementId>,
    attached: bool,
}

impl Default for ScrollRevealEngine {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_PX)
    }
}

impl ScrollRevealEngine {
    pub fn new(threshold_px: f64) -> Self {
        let threshold_px = if threshold_px.is_finite() {
            threshold_px
        } else {
            DEFAULT_THRESHOLD_PX
        };
        Self {
            threshold_px,
            revealed: HashMap::new(),
            pending: Vec::new(),
            attached: true,
        }
    }

    /// Add an element. Returns `false` for blank ids, repeats, or after detach.
    pub fn register(&mut self, id: &str) -> bool {
        if !self.attached {
            tracing::trace!(id, "register after detach ignored");
            return false;
        }
        let Some(id) = ElementId::parse(id) else {
            return false;
        };
        if self.revealed.contains_key(id.as_str()) {
            return false;
        }

        self.revealed.insert(id.clone(), false);
        self.pending.push(id);
        true
    }

    /// Reveal every hidden element whose top edge is above
    /// `viewport_height - threshold_px`. Returns the newly revealed ids in
    /// registration order; calling again at the same position returns nothing.
    pub fn evaluate(&mut self, layout: &impl Layout) -> Vec<ElementId> {
        if !self.attached || self.pending.is_empty() {
            return Vec::new();
        }

        let limit = layout.viewport_height() - self.threshold_px;
        let revealed = &mut self.revealed;
        let mut newly_revealed = Vec::new();

        self.pending.retain(|id| match layout.element_top(id) {
            Some(top) if top.is_finite() && top < limit => {
                if let Some(flag) = revealed.get_mut(id.as_str()) {
                    *flag = true;
                }
                newly_revealed.push(id.clone());
                false
            }
            _ => true,
        });

        if !newly_revealed.is_empty() {
            tracing::debug!(
                count = newly_revealed.len(),
                remaining = self.pending.len(),
                "elements revealed"
            );
        }
        newly_revealed
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        ElementId::parse(id)
            .and_then(|id| self.revealed.get(&id).copied())
            .unwrap_or(false)
    }

    pub fn is_registered(&self, id: &str) -> bool {
        ElementId::parse(id).is_some_and(|id| self.revealed.contains_key(&id))
    }

    /// Elements still waiting to be revealed
    pub fn pending(&self) -> &[ElementId] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    /// Stop reacting to scroll signals and drop the registry
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.pending.clear();
        self.revealed.clear();
        tracing::debug!("scroll reveal detached");
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::layout::LayoutSnapshot;
    use std::cell::Cell;
    use std::collections::HashMap;

    fn layout(viewport_height: f64, tops: &[(&str, f64)]) -> LayoutSnapshot {
        LayoutSnapshot {
            scroll_y: 0.0,
            viewport_height,
            element_tops: tops.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    struct CountingLayout {
        inner: LayoutSnapshot,
        queries: Cell<usize>,
    }

    impl Layout for CountingLayout {
        fn viewport_height(&self) -> f64 {
            self.inner.viewport_height()
        }

        fn element_top(&self, id: &ElementId) -> Option<f64> {
            self.queries.set(self.queries.get() + 1);
            self.inner.element_top(id)
        }
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut engine = ScrollRevealEngine::default();
        assert!(engine.register("about"));
        assert!(!engine.register("about"));
        assert!(!engine.register(" about "));
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.pending().len(), 1);
    }

    #[test]
    fn test_lookups_use_trimmed_handle() {
        let mut engine = ScrollRevealEngine::default();
        engine.register(" about ");
        assert!(engine.is_registered(" about "));
        assert!(!engine.is_registered(""));

        engine.evaluate(&layout(800.0, &[("about", 10.0)]));
        assert!(engine.is_revealed(" about "));
        assert!(engine.is_revealed("about"));
        assert!(!engine.is_revealed("   "));
    }

    #[test]
    fn test_blank_handle_is_noop() {
        let mut engine = ScrollRevealEngine::default();
        assert!(!engine.register(""));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_reveals_only_within_threshold() {
        let mut engine = ScrollRevealEngine::new(100.0);
        engine.register("near");
        engine.register("edge");
        engine.register("far");

        let revealed = engine.evaluate(&layout(
            800.0,
            &[("near", 200.0), ("edge", 700.0), ("far", 2400.0)],
        ));

        assert_eq!(revealed, vec![ElementId::parse("near").unwrap()]);
        assert!(engine.is_revealed("near"));
        assert!(!engine.is_revealed("edge"));
        assert!(!engine.is_revealed("far"));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mut engine = ScrollRevealEngine::default();
        engine.register("a");
        engine.register("b");
        let view = layout(800.0, &[("a", 10.0), ("b", 5000.0)]);

        assert_eq!(engine.evaluate(&view).len(), 1);
        let after_first: HashMap<_, _> = engine.revealed.clone();
        assert!(engine.evaluate(&view).is_empty());
        assert_eq!(engine.revealed, after_first);
    }

    #[test]
    fn test_reveal_is_monotonic() {
        let mut engine = ScrollRevealEngine::default();
        engine.register("a");
        engine.evaluate(&layout(800.0, &[("a", 100.0)]));
        assert!(engine.is_revealed("a"));

        // scrolled back up, element now far below
        engine.evaluate(&layout(800.0, &[("a", 3000.0)]));
        engine.evaluate(&layout(800.0, &[]));
        assert!(engine.is_revealed("a"));
    }

    #[test]
    fn test_elements_scrolled_past_are_revealed() {
        let mut engine = ScrollRevealEngine::default();
        engine.register("hero");
        engine.evaluate(&layout(800.0, &[("hero", -400.0)]));
        assert!(engine.is_revealed("hero"));
    }

    #[test]
    fn test_unlaid_out_or_nan_elements_stay_pending() {
        let mut engine = ScrollRevealEngine::default();
        engine.register("a");
        engine.register("b");
        engine.evaluate(&layout(800.0, &[("b", f64::NAN)]));
        assert_eq!(engine.pending().len(), 2);
    }

    #[test]
    fn test_revealed_elements_are_not_queried_again() {
        let mut engine = ScrollRevealEngine::default();
        for id in ["a", "b", "c", "d"] {
            engine.register(id);
        }
        let counting = CountingLayout {
            inner: layout(800.0, &[("a", 0.0), ("b", 100.0), ("c", 200.0), ("d", 5000.0)]),
            queries: Cell::new(0),
        };

        engine.evaluate(&counting);
        assert_eq!(counting.queries.get(), 4);

        engine.evaluate(&counting);
        assert_eq!(counting.queries.get(), 5);
    }

    #[test]
    fn test_detach_stops_evaluation() {
        let mut engine = ScrollRevealEngine::default();
        engine.register("a");
        engine.detach();

        assert!(engine.evaluate(&layout(800.0, &[("a", 0.0)])).is_empty());
        assert!(!engine.register("b"));
        assert!(!engine.is_attached());
    }

    #[test]
    fn test_non_finite_threshold_falls_back() {
        let engine = ScrollRevealEngine::new(f64::INFINITY);
        assert_eq!(engine.threshold_px(), DEFAULT_THRESHOLD_PX);
    }
}
