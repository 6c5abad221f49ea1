#![forbid(unsafe_code)]

//! JSONL event trace.
//!
//! Each reported [`SwipeListEvent`] becomes one JSON object tagged with the
//! frame it was produced in:
//!
//! ```json
//! {"event":"move_started","frame":0,"position":2}
//! {"event":"dismissed","frame":14,"positions":[5,2]}
//! ```
//!
//! Keys are emitted in sorted order, so traces of identical runs compare
//! byte-for-byte.

use serde_json::Value;
use swipelist::SwipeListEvent;

/// Append-only log of engine events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTrace {
    lines: Vec<String>,
}

impl EventTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event` as produced during `frame`.
    pub fn record(&mut self, frame: u64, event: &SwipeListEvent) {
        let Ok(mut value) = serde_json::to_value(event) else {
            return;
        };
        if let Value::Object(map) = &mut value {
            map.insert("frame".to_owned(), Value::from(frame));
        }
        self.lines.push(value.to_string());
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The whole trace, one object per line.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Event tags in order, e.g. `["move_started", "move_ended"]`.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .filter_map(|value| value.get("event")?.as_str().map(str::to_owned))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_frame_and_sorted_keys() {
        let mut trace = EventTrace::new();
        trace.record(3, &SwipeListEvent::Dismissed {
            positions: vec![5, 2],
        });
        trace.record(4, &SwipeListEvent::ListChanged);
        assert_eq!(
            trace.lines(),
            &[
                r#"{"event":"dismissed","frame":3,"positions":[5,2]}"#.to_owned(),
                r#"{"event":"list_changed","frame":4}"#.to_owned(),
            ]
        );
        assert_eq!(trace.event_names(), vec!["dismissed", "list_changed"]);
        assert!(trace.to_jsonl().ends_with('\n'));
    }
}
