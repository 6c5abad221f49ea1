#![forbid(unsafe_code)]

//! Swipe gesture classifier.
//!
//! Turns the pointer samples of one interaction into a directional,
//! thresholded gesture. The classifier is pure: it never talks to the host.
//! [`crate::SwipeList`] feeds it samples and applies what it reports.
//!
//! # State Machine
//!
//! ```text
//!            down on eligible row
//!   Idle ───────────────────────────► Armed
//!                                       │  |dx| > slop, direction permitted
//!                                       ├──────────────────────────────► Tracking
//!                                       │  |dy| > slop first
//!                                       └──────────────────────────────► Cancelled
//!   any state ── up / cancel / hand-off ──► Idle
//! ```
//!
//! # Invariants
//!
//! 1. At most one of the five classifications holds at any accepted sample.
//! 2. The initial direction is fixed by the first accepted sample.
//! 3. Regret is sticky: once an accepted sample moves against the initial
//!    direction, the session resolves to a no-op.
//! 4. Samples are accepted only when the incremental horizontal movement since
//!    the previous accepted sample (initially the down point) exceeds the
//!    minimum movement.
//! 5. The closing direction of an open row is always permitted.

use serde::{Deserialize, Serialize};
use swipelist_core::config::{ActionTable, SwipeAction, SwipeConfig, Thresholds};
use swipelist_core::direction::{Directions, SwipeDirection};
use swipelist_core::geometry::Point;
use swipelist_core::trace;

use crate::host::RealizedRow;

/// Tier and direction of a swipe displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    #[default]
    None,
    SwipeRight,
    SwipeLeft,
    LongSwipeRight,
    LongSwipeLeft,
}

impl Classification {
    #[must_use]
    pub const fn new(direction: SwipeDirection, long: bool) -> Self {
        match (direction, long) {
            (SwipeDirection::Right, false) => Self::SwipeRight,
            (SwipeDirection::Left, false) => Self::SwipeLeft,
            (SwipeDirection::Right, true) => Self::LongSwipeRight,
            (SwipeDirection::Left, true) => Self::LongSwipeLeft,
        }
    }

    #[must_use]
    pub const fn direction(self) -> Option<SwipeDirection> {
        match self {
            Self::None => None,
            Self::SwipeRight | Self::LongSwipeRight => Some(SwipeDirection::Right),
            Self::SwipeLeft | Self::LongSwipeLeft => Some(SwipeDirection::Left),
        }
    }

    #[must_use]
    pub const fn is_long(self) -> bool {
        matches!(self, Self::LongSwipeRight | Self::LongSwipeLeft)
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

/// Phase of an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Down recorded; no horizontal move yet.
    Armed,
    /// Horizontal swipe in progress.
    Tracking,
    /// The host took the gesture (vertical scroll).
    Cancelled,
}

/// One pointer interaction with one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    row: RealizedRow,
    pointer_id: u32,
    down: Point,
    last: Point,
    prev_sample_x: f32,
    phase: Phase,
    displacement: f32,
    initial_direction: Option<SwipeDirection>,
    current_direction: Option<SwipeDirection>,
    classification: Classification,
    action: SwipeAction,
    regretted: bool,
    exceeded_slop: bool,
    was_open: bool,
    opened_right: bool,
    resting: f32,
    allowed: Directions,
}

impl Session {
    #[must_use]
    pub const fn row(&self) -> &RealizedRow {
        &self.row
    }

    #[must_use]
    pub const fn pointer_id(&self) -> u32 {
        self.pointer_id
    }

    #[must_use]
    pub const fn down(&self) -> Point {
        self.down
    }

    #[must_use]
    pub const fn last(&self) -> Point {
        self.last
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Signed horizontal displacement from the down point.
    #[must_use]
    pub const fn displacement(&self) -> f32 {
        self.displacement
    }

    #[must_use]
    pub const fn initial_direction(&self) -> Option<SwipeDirection> {
        self.initial_direction
    }

    #[must_use]
    pub const fn current_direction(&self) -> Option<SwipeDirection> {
        self.current_direction
    }

    /// Classification at the latest accepted sample.
    #[must_use]
    pub const fn classification(&self) -> Classification {
        self.classification
    }

    /// Action that would commit at the latest accepted sample.
    #[must_use]
    pub const fn action(&self) -> SwipeAction {
        self.action
    }

    #[must_use]
    pub const fn is_regretted(&self) -> bool {
        self.regretted
    }

    /// Whether the pointer ever moved beyond the touch slop on either axis.
    #[must_use]
    pub const fn exceeded_slop(&self) -> bool {
        self.exceeded_slop
    }

    #[must_use]
    pub const fn was_open(&self) -> bool {
        self.was_open
    }

    #[must_use]
    pub const fn opened_right(&self) -> bool {
        self.opened_right
    }

    /// Front-layer translation of the row at rest.
    #[must_use]
    pub const fn resting_translation(&self) -> f32 {
        self.resting
    }

    /// Direction that closes an open row.
    #[must_use]
    pub const fn closing_direction(&self) -> Option<SwipeDirection> {
        if !self.was_open {
            None
        } else if self.opened_right {
            Some(SwipeDirection::Left)
        } else {
            Some(SwipeDirection::Right)
        }
    }

    fn permits(&self, direction: SwipeDirection) -> bool {
        self.allowed.allows(direction) || self.closing_direction() == Some(direction)
    }

    /// Front-layer translation for the current displacement.
    ///
    /// Movement in a direction the row does not permit leaves the layer at rest.
    #[must_use]
    pub fn translation(&self) -> f32 {
        match SwipeDirection::from_delta(self.displacement) {
            Some(dir) if self.permits(dir) => self.resting + self.displacement,
            _ => self.resting,
        }
    }
}

/// Description of an accepted sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub direction: SwipeDirection,
    pub classification: Classification,
    pub action: SwipeAction,
    pub regretted: bool,
}

/// What a pointer move did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveStep {
    /// No session, foreign pointer, or cancelled session.
    Ignored,
    /// Still armed.
    Pending,
    /// Vertical movement won; the session stopped tracking on this move.
    Cancelled,
    Tracking {
        /// Horizontal movement started on this move.
        started: bool,
        /// Front-layer translation to apply.
        translation: f32,
        sample: Option<Sample>,
    },
}

/// Outcome of a committed horizontal swipe at pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeRelease {
    pub row: RealizedRow,
    pub displacement: f32,
    pub swap: bool,
    pub swap_right: bool,
    pub classification: Classification,
    pub regretted: bool,
    pub was_open: bool,
    pub opened_right: bool,
    pub resting: f32,
}

/// How an interaction ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Release {
    /// Down and up without movement beyond the slop.
    Tap { row: RealizedRow, down: Point },
    /// The pointer moved but no swipe was tracked.
    Abandoned { row: RealizedRow },
    Swipe(SwipeRelease),
}

/// Classifies pointer samples for at most one active session.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    thresholds: Thresholds,
    long_allowed: Directions,
    actions: ActionTable,
    session: Option<Session>,
}

impl GestureClassifier {
    #[must_use]
    pub fn new(config: &SwipeConfig) -> Self {
        Self {
            thresholds: config.thresholds(),
            long_allowed: config.long_swipe_directions(),
            actions: config.actions,
            session: None,
        }
    }

    /// Adopt new thresholds and actions; an active session keeps running.
    pub fn reconfigure(&mut self, config: &SwipeConfig) {
        self.thresholds = config.thresholds();
        self.long_allowed = config.long_swipe_directions();
        self.actions = config.actions;
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Whether a horizontal swipe is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.phase == Phase::Tracking)
    }

    /// Start a session on `row`.
    ///
    /// `allowed` is the row's effective swipe mode; `resting` is the front
    /// layer's translation at rest (non-zero for open rows).
    pub fn arm(
        &mut self,
        row: RealizedRow,
        pointer_id: u32,
        down: Point,
        open: Option<bool>,
        resting: f32,
        allowed: Directions,
    ) {
        trace!(position = row.position, x = down.x, y = down.y, "swipe session armed");
        self.session = Some(Session {
            row,
            pointer_id,
            down,
            last: down,
            prev_sample_x: down.x,
            phase: Phase::Armed,
            displacement: 0.0,
            initial_direction: None,
            current_direction: None,
            classification: Classification::None,
            action: SwipeAction::None,
            regretted: false,
            exceeded_slop: false,
            was_open: open.is_some(),
            opened_right: open.unwrap_or(false),
            resting,
            allowed,
        });
    }

    /// Feed a move sample.
    pub fn on_move(&mut self, pointer_id: u32, position: Point) -> MoveStep {
        let thresholds = self.thresholds;
        let long_allowed = self.long_allowed;
        let actions = self.actions;
        let Some(session) = self.session.as_mut() else {
            return MoveStep::Ignored;
        };
        if session.pointer_id != pointer_id || session.phase == Phase::Cancelled {
            return MoveStep::Ignored;
        }

        session.last = position;
        session.displacement = position.x - session.down.x;
        let abs_dx = session.displacement.abs();
        let abs_dy = (position.y - session.down.y).abs();
        if abs_dx > thresholds.touch_slop || abs_dy > thresholds.touch_slop {
            session.exceeded_slop = true;
        }

        let mut started = false;
        if session.phase == Phase::Armed {
            let horizontal = abs_dx > thresholds.touch_slop && abs_dx >= abs_dy;
            let direction = SwipeDirection::from_delta(session.displacement);
            if horizontal && direction.is_some_and(|dir| session.permits(dir)) {
                session.phase = Phase::Tracking;
                started = true;
            } else if abs_dy > thresholds.touch_slop && abs_dy > abs_dx {
                trace!(position = session.row.position, "swipe session yielded to scroll");
                session.phase = Phase::Cancelled;
                return MoveStep::Cancelled;
            } else {
                return MoveStep::Pending;
            }
        }

        let mut sample = None;
        let increment = position.x - session.prev_sample_x;
        if increment.abs() > thresholds.min_movement
            && let Some(direction) = SwipeDirection::from_delta(increment)
        {
            session.prev_sample_x = position.x;
            session.current_direction = Some(direction);
            let initial = *session.initial_direction.get_or_insert(direction);
            if direction != initial {
                session.regretted = true;
            }
            let classification = classify(
                session.displacement,
                &thresholds,
                long_allowed,
                |dir| session.permits(dir),
            );
            session.classification = classification;
            let action = action_at(session, &actions);
            session.action = action;
            trace!(
                position = session.row.position,
                displacement = session.displacement,
                classification = ?session.classification,
                regretted = session.regretted,
                "swipe sample accepted"
            );
            sample = Some(Sample {
                direction,
                classification: session.classification,
                action: session.action,
                regretted: session.regretted,
            });
        }

        MoveStep::Tracking {
            started,
            translation: session.translation(),
            sample,
        }
    }

    /// End the session on pointer-up.
    ///
    /// Returns `None` when there is no session or `pointer_id` is not the
    /// session's pointer.
    pub fn release(&mut self, pointer_id: u32, position: Point) -> Option<Release> {
        if self
            .session
            .as_ref()
            .is_none_or(|s| s.pointer_id != pointer_id)
        {
            return None;
        }
        let session = self.session.take()?;
        let release = match session.phase {
            Phase::Armed if !session.exceeded_slop => Release::Tap {
                row: session.row,
                down: session.down,
            },
            Phase::Armed | Phase::Cancelled => Release::Abandoned { row: session.row },
            Phase::Tracking => Release::Swipe(self.swipe_release(&session, position)),
        };
        Some(release)
    }

    /// Drop the session without resolving it.
    pub fn cancel(&mut self) -> Option<Session> {
        self.session.take()
    }

    fn swipe_release(&self, session: &Session, position: Point) -> SwipeRelease {
        let displacement = position.x - session.down.x;
        let direction = SwipeDirection::from_delta(displacement);
        let classification = classify(displacement, &self.thresholds, self.long_allowed, |dir| {
            session.permits(dir)
        });
        let swap = !session.regretted
            && displacement.abs() > self.thresholds.short
            && direction.is_some_and(|dir| {
                session.permits(dir)
                    && (!session.was_open || session.closing_direction() == Some(dir))
            });
        SwipeRelease {
            row: session.row,
            displacement,
            swap,
            swap_right: displacement > 0.0,
            classification,
            regretted: session.regretted,
            was_open: session.was_open,
            opened_right: session.opened_right,
            resting: session.resting,
        }
    }
}

/// Classify a signed displacement.
///
/// `permits` decides whether a direction may be swiped at all.
#[must_use]
pub fn classify(
    displacement: f32,
    thresholds: &Thresholds,
    long_allowed: Directions,
    permits: impl Fn(SwipeDirection) -> bool,
) -> Classification {
    let Some(direction) = SwipeDirection::from_delta(displacement) else {
        return Classification::None;
    };
    if !permits(direction) {
        return Classification::None;
    }
    let magnitude = displacement.abs();
    if magnitude < thresholds.short {
        Classification::None
    } else if magnitude >= thresholds.long && long_allowed.allows(direction) {
        Classification::new(direction, true)
    } else {
        Classification::new(direction, false)
    }
}

fn action_at(session: &Session, actions: &ActionTable) -> SwipeAction {
    if session.regretted {
        return SwipeAction::None;
    }
    match session.classification.direction() {
        None => SwipeAction::None,
        Some(dir) if session.closing_direction() == Some(dir) => SwipeAction::Reveal,
        Some(dir) => actions.get(dir, session.classification.is_long()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{RowId, ViewId};
    use swipelist_core::geometry::Rect;

    fn row() -> RealizedRow {
        RealizedRow {
            view: ViewId(1),
            id: RowId(10),
            position: 0,
            bounds: Rect::new(0, 0, 400, 60),
        }
    }

    fn armed(config: &SwipeConfig) -> GestureClassifier {
        let mut classifier = GestureClassifier::new(config);
        classifier.arm(row(), 0, Point::new(0.0, 30.0), None, 0.0, config.swipe_mode.directions());
        classifier
    }

    fn sample_at(classifier: &mut GestureClassifier, x: f32) -> MoveStep {
        classifier.on_move(0, Point::new(x, 30.0))
    }

    fn classification(classifier: &GestureClassifier) -> Classification {
        classifier.session().unwrap().classification()
    }

    #[test]
    fn tiers_progress_with_displacement() {
        let config = SwipeConfig::default();
        let mut classifier = armed(&config);

        sample_at(&mut classifier, 50.0);
        assert_eq!(classification(&classifier), Classification::None);
        sample_at(&mut classifier, 120.0);
        assert_eq!(classification(&classifier), Classification::SwipeRight);
        sample_at(&mut classifier, 200.0);
        assert_eq!(classification(&classifier), Classification::LongSwipeRight);

        let Some(Release::Swipe(release)) = classifier.release(0, Point::new(200.0, 30.0)) else {
            panic!("expected swipe release");
        };
        assert!(release.swap);
        assert!(release.swap_right);
        assert_eq!(release.classification, Classification::LongSwipeRight);
    }

    #[test]
    fn reversal_is_regret() {
        let config = SwipeConfig::default();
        let mut classifier = armed(&config);
        sample_at(&mut classifier, 100.0);
        let step = sample_at(&mut classifier, 40.0);
        let MoveStep::Tracking { sample: Some(sample), .. } = step else {
            panic!("expected accepted sample");
        };
        assert_eq!(sample.direction, SwipeDirection::Left);
        assert!(sample.regretted);
        assert_eq!(sample.action, SwipeAction::None);

        // Moving forward again does not clear regret.
        sample_at(&mut classifier, 150.0);
        assert!(classifier.session().unwrap().is_regretted());
        let Some(Release::Swipe(release)) = classifier.release(0, Point::new(150.0, 30.0)) else {
            panic!("expected swipe release");
        };
        assert!(!release.swap);
    }

    #[test]
    fn small_increments_are_not_samples() {
        let config = SwipeConfig::default();
        let mut classifier = armed(&config);
        let step = sample_at(&mut classifier, 20.0);
        assert!(matches!(step, MoveStep::Tracking { started: true, sample: None, .. }));
        let step = sample_at(&mut classifier, 45.0);
        assert!(
            matches!(step, MoveStep::Tracking { sample: Some(_), .. }),
            "45px from the down point exceeds the 30px minimum"
        );
        let step = sample_at(&mut classifier, 60.0);
        assert!(matches!(step, MoveStep::Tracking { sample: None, .. }));
    }

    #[test]
    fn long_tier_requires_long_mode() {
        let config = SwipeConfig::default().with_long_swipe_enabled(false);
        let mut classifier = armed(&config);
        sample_at(&mut classifier, 100.0);
        sample_at(&mut classifier, 250.0);
        assert_eq!(classification(&classifier), Classification::SwipeRight);
    }

    #[test]
    fn disallowed_direction_never_tracks() {
        let config = SwipeConfig::default()
            .with_swipe_mode(swipelist_core::config::SwipeMode::Left);
        let mut classifier = armed(&config);
        assert_eq!(sample_at(&mut classifier, 100.0), MoveStep::Pending);
        let release = classifier.release(0, Point::new(100.0, 30.0));
        assert!(matches!(release, Some(Release::Abandoned { .. })));
    }

    #[test]
    fn vertical_motion_cancels() {
        let config = SwipeConfig::default();
        let mut classifier = armed(&config);
        let step = classifier.on_move(0, Point::new(2.0, 60.0));
        assert_eq!(step, MoveStep::Cancelled);
        assert_eq!(
            classifier.on_move(0, Point::new(150.0, 60.0)),
            MoveStep::Ignored
        );
        assert!(matches!(
            classifier.release(0, Point::new(150.0, 60.0)),
            Some(Release::Abandoned { .. })
        ));
    }

    #[test]
    fn tap_without_movement() {
        let config = SwipeConfig::default();
        let mut classifier = armed(&config);
        classifier.on_move(0, Point::new(3.0, 32.0));
        assert!(matches!(
            classifier.release(0, Point::new(3.0, 32.0)),
            Some(Release::Tap { .. })
        ));
    }

    #[test]
    fn foreign_pointer_is_ignored() {
        let config = SwipeConfig::default();
        let mut classifier = armed(&config);
        assert_eq!(
            classifier.on_move(1, Point::new(100.0, 30.0)),
            MoveStep::Ignored
        );
        assert!(classifier.release(1, Point::new(100.0, 30.0)).is_none());
        assert!(classifier.is_active());
    }

    #[test]
    fn open_row_swaps_only_when_closing() {
        let config = SwipeConfig::default();
        let mut classifier = GestureClassifier::new(&config);
        classifier.arm(
            row(),
            0,
            Point::new(300.0, 30.0),
            Some(true),
            400.0,
            config.swipe_mode.directions(),
        );
        let step = classifier.on_move(0, Point::new(180.0, 30.0));
        let MoveStep::Tracking { translation, sample: Some(sample), .. } = step else {
            panic!("expected accepted sample");
        };
        assert_eq!(translation, 280.0);
        assert_eq!(sample.action, SwipeAction::Reveal);
        let Some(Release::Swipe(release)) = classifier.release(0, Point::new(180.0, 30.0)) else {
            panic!("expected swipe release");
        };
        assert!(release.swap);
        assert!(!release.swap_right);

        classifier.arm(
            row(),
            0,
            Point::new(0.0, 30.0),
            Some(true),
            400.0,
            config.swipe_mode.directions(),
        );
        classifier.on_move(0, Point::new(120.0, 30.0));
        let Some(Release::Swipe(release)) = classifier.release(0, Point::new(120.0, 30.0)) else {
            panic!("expected swipe release");
        };
        assert!(!release.swap, "release toward the opened side does not toggle");
    }

    #[test]
    fn closing_direction_is_permitted_despite_mode() {
        let config = SwipeConfig::default()
            .with_swipe_mode(swipelist_core::config::SwipeMode::Right);
        let mut classifier = GestureClassifier::new(&config);
        classifier.arm(
            row(),
            0,
            Point::new(300.0, 30.0),
            Some(true),
            400.0,
            config.swipe_mode.directions(),
        );
        classifier.on_move(0, Point::new(150.0, 30.0));
        assert_eq!(classification(&classifier), Classification::SwipeLeft);
    }

    #[test]
    fn classify_boundaries() {
        let t = SwipeConfig::default().thresholds();
        let all = |_: SwipeDirection| true;
        assert_eq!(classify(89.9, &t, Directions::BOTH, all), Classification::None);
        assert_eq!(classify(90.0, &t, Directions::BOTH, all), Classification::SwipeRight);
        assert_eq!(classify(-180.0, &t, Directions::BOTH, all), Classification::LongSwipeLeft);
        assert_eq!(classify(-180.0, &t, Directions::RIGHT, all), Classification::SwipeLeft);
        assert_eq!(classify(0.0, &t, Directions::BOTH, all), Classification::None);
        assert_eq!(classify(150.0, &t, Directions::BOTH, |_| false), Classification::None);
    }
}
