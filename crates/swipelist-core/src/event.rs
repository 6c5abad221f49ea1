#![forbid(unsafe_code)]

//! Normalized pointer and scroll input.
//!
//! Hosts translate their native touch or mouse events into [`PointerEvent`]
//! values before handing them to the engine. Only one pointer is tracked per
//! gesture; the `pointer_id` lets the engine ignore secondary fingers.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer sample in list coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pointer_id: u32,
    pub position: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerKind, pointer_id: u32, position: Point) -> Self {
        Self {
            kind,
            pointer_id,
            position,
        }
    }

    /// Primary-pointer down at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, 0, Point::new(x, y))
    }

    /// Primary-pointer move to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, 0, Point::new(x, y))
    }

    /// Primary-pointer up at `(x, y)`.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, 0, Point::new(x, y))
    }

    /// Primary-pointer cancel at `(x, y)`.
    #[must_use]
    pub const fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Cancel, 0, Point::new(x, y))
    }

    /// Same event attributed to a different pointer.
    #[must_use]
    pub const fn with_pointer(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}

/// Scroll phase reported by the host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollState {
    /// Not scrolling.
    #[default]
    Idle,
    /// The user is dragging the list.
    TouchScroll,
    /// The list is coasting after a fling.
    Fling,
}

impl ScrollState {
    /// `true` when the list is not moving.
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Vertical scroll metrics of the host list.
///
/// `offset + extent <= range` for a well-formed host; `offset` is the
/// scrolled distance from the top of the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct ScrollMetrics {
    /// Current scroll offset.
    pub offset: i32,
    /// Visible extent (viewport height in content units).
    pub extent: i32,
    /// Total scrollable range.
    pub range: i32,
}

impl ScrollMetrics {
    /// Whether content exists above the viewport.
    #[must_use]
    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    /// Whether content exists below the viewport.
    #[must_use]
    pub const fn can_scroll_down(&self) -> bool {
        self.offset.saturating_add(self.extent) < self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_use_primary_pointer() {
        let ev = PointerEvent::moved(3.0, 4.0);
        assert_eq!(ev.kind, PointerKind::Move);
        assert_eq!(ev.pointer_id, 0);
        assert_eq!(ev.position, Point::new(3.0, 4.0));
        assert_eq!(ev.with_pointer(7).pointer_id, 7);
    }

    #[test]
    fn scroll_metrics_edges() {
        let top = ScrollMetrics {
            offset: 0,
            extent: 400,
            range: 1000,
        };
        assert!(!top.can_scroll_up());
        assert!(top.can_scroll_down());

        let bottom = ScrollMetrics {
            offset: 600,
            extent: 400,
            range: 1000,
        };
        assert!(bottom.can_scroll_up());
        assert!(!bottom.can_scroll_down());
    }

    #[test]
    fn pointer_event_serde_shape() {
        let ev = PointerEvent::down(1.0, 2.0);
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("\"kind\":\"down\""));
        let back: PointerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }
}
