// Viewport geometry as seen by the reveal engine
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

/// Handle of a revealable element (the DOM id on the page)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Returns `None` for blank ids, which can't refer to a mounted element
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim();
        if id.is_empty() {
            None
        } else {
            Some(Self(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position queries the engine needs. `element_top` may be expensive, so the
/// engine only asks about elements that are still hidden.
pub trait Layout {
    fn viewport_height(&self) -> f64;

    /// Top edge of the element relative to the top of the viewport.
    /// `None` when the element isn't currently laid out.
    fn element_top(&self, id: &ElementId) -> Option<f64>;
}

/// Layout measured by the page and shipped over the bridge in one message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub scroll_y: f64,
    pub viewport_height: f64,
    #[serde(default)]
    pub element_tops: HashMap<String, f64>,
}

impl Layout for LayoutSnapshot {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn element_top(&self, id: &ElementId) -> Option<f64> {
        self.element_tops.get(id.as_str()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_ids_rejected() {
        assert_eq!(ElementId::parse(""), None);
        assert_eq!(ElementId::parse("  "), None);
        assert_eq!(ElementId::parse(" about ").unwrap().as_str(), "about");
    }

    #[test]
    fn test_snapshot_from_bridge_json() {
        let json = r#"{"scroll_y":120.0,"viewport_height":800.0,"element_tops":{"about":300.5}}"#;
        let snapshot: LayoutSnapshot = serde_json::from_str(json).unwrap();
        let about = ElementId::parse("about").unwrap();
        let excerpt = ElementId::parse("excerpt").unwrap();

        assert_eq!(snapshot.viewport_height(), 800.0);
        assert_eq!(snapshot.element_top(&about), Some(300.5));
        assert_eq!(snapshot.element_top(&excerpt), None);
    }
}
