#![forbid(unsafe_code)]

//! Swipe and reorder policy.
//!
//! [`SwipeConfig`] is the single policy object the engine reads. Distances
//! are stored in density-independent units ([`Dp`]) and resolved to pixels
//! once, through [`SwipeConfig::thresholds`].
//!
//! # Invariants
//!
//! A config returned by [`SwipeConfig::validated`] satisfies:
//! - `density > 0`
//! - `0 < short_threshold < long_threshold`
//! - `min_movement >= 0`, `touch_slop >= 0`
//! - `offset_left >= 0`, `offset_right >= 0`
//!
//! # Environment
//!
//! [`SwipeConfig::from_env`] overlays `SWIPELIST_*` variables on the
//! defaults. Unparseable values are ignored; out-of-range values surface as
//! [`ConfigError`] from validation.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::direction::{Directions, SwipeDirection};

/// Default short-swipe threshold (dp).
pub const DEFAULT_SHORT_THRESHOLD_DP: f32 = 90.0;
/// Default long-swipe threshold (dp).
pub const DEFAULT_LONG_THRESHOLD_DP: f32 = 180.0;
/// Default incremental movement needed to accept a sample (dp).
pub const DEFAULT_MIN_MOVEMENT_DP: f32 = 30.0;
/// Default touch slop (dp).
pub const DEFAULT_TOUCH_SLOP_DP: f32 = 8.0;
/// Default auto-scroll step while dragging at a list edge (dp).
pub const DEFAULT_AUTO_SCROLL_STEP_DP: f32 = 15.0;
/// Short animation time used when the configured duration is zero.
pub const DEFAULT_ANIMATION_TIME_MS: u64 = 200;
/// Default long-press timeout before a drag starts.
pub const DEFAULT_LONG_PRESS_TIMEOUT_MS: u64 = 500;
/// Default duration of the displaced-row settle animation.
pub const DEFAULT_SETTLE_DURATION_MS: u64 = 200;
/// Default delay after scrolling stops before swiping resumes.
pub const DEFAULT_SCROLL_RESUME_DELAY_MS: u64 = 500;

const ENV_SWIPE_MODE: &str = "SWIPELIST_SWIPE_MODE";
const ENV_LONG_SWIPE_MODE: &str = "SWIPELIST_LONG_SWIPE_MODE";
const ENV_LONG_SWIPE: &str = "SWIPELIST_LONG_SWIPE";
const ENV_SHORT_THRESHOLD_DP: &str = "SWIPELIST_SHORT_THRESHOLD_DP";
const ENV_LONG_THRESHOLD_DP: &str = "SWIPELIST_LONG_THRESHOLD_DP";
const ENV_MIN_MOVEMENT_DP: &str = "SWIPELIST_MIN_MOVEMENT_DP";
const ENV_TOUCH_SLOP_DP: &str = "SWIPELIST_TOUCH_SLOP_DP";
const ENV_DENSITY: &str = "SWIPELIST_DENSITY";
const ENV_ANIMATION_TIME_MS: &str = "SWIPELIST_ANIMATION_TIME_MS";
const ENV_LONG_PRESS_TIMEOUT_MS: &str = "SWIPELIST_LONG_PRESS_TIMEOUT_MS";
const ENV_CLOSE_ALL_ON_SCROLL: &str = "SWIPELIST_CLOSE_ALL_ON_SCROLL";
const ENV_DRAG_AND_DROP: &str = "SWIPELIST_DRAG_AND_DROP";

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// A density-independent length.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dp(pub f32);

impl Dp {
    /// Convert to pixels at the given display density.
    #[inline]
    #[must_use]
    pub fn to_px(self, density: f32) -> f32 {
        self.0 * density
    }
}

/// Pixel thresholds resolved from a [`SwipeConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub short: f32,
    pub long: f32,
    pub min_movement: f32,
    pub touch_slop: f32,
    pub auto_scroll_step: f32,
}

// ---------------------------------------------------------------------------
// Modes and actions
// ---------------------------------------------------------------------------

/// Which horizontal directions a row may be swiped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeMode {
    /// Swiping disabled.
    None,
    #[default]
    Both,
    Right,
    Left,
}

impl SwipeMode {
    /// Directions this mode permits.
    #[must_use]
    pub const fn directions(self) -> Directions {
        match self {
            Self::None => Directions::empty(),
            Self::Both => Directions::BOTH,
            Self::Right => Directions::RIGHT,
            Self::Left => Directions::LEFT,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Some(Self::None),
            "both" => Some(Self::Both),
            "right" => Some(Self::Right),
            "left" => Some(Self::Left),
            _ => None,
        }
    }
}

/// Which directions long swipes are recognized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongSwipeMode {
    Left,
    Right,
    #[default]
    Both,
}

impl LongSwipeMode {
    /// Directions this mode permits.
    #[must_use]
    pub const fn directions(self) -> Directions {
        match self {
            Self::Left => Directions::LEFT,
            Self::Right => Directions::RIGHT,
            Self::Both => Directions::BOTH,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// What a committed swipe does to its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    /// Slide the front layer open or closed.
    Reveal,
    /// Slide the row off-screen and remove it.
    Dismiss,
    /// Return to rest.
    #[default]
    None,
}

/// Action per direction and tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionTable {
    pub left: SwipeAction,
    pub right: SwipeAction,
    pub long_left: SwipeAction,
    pub long_right: SwipeAction,
}

impl Default for ActionTable {
    fn default() -> Self {
        Self {
            left: SwipeAction::Reveal,
            right: SwipeAction::Reveal,
            long_left: SwipeAction::Dismiss,
            long_right: SwipeAction::Dismiss,
        }
    }
}

impl ActionTable {
    /// Look up the action for a direction and tier.
    #[must_use]
    pub const fn get(&self, direction: SwipeDirection, long: bool) -> SwipeAction {
        match (direction, long) {
            (SwipeDirection::Left, false) => self.left,
            (SwipeDirection::Right, false) => self.right,
            (SwipeDirection::Left, true) => self.long_left,
            (SwipeDirection::Right, true) => self.long_right,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Side of the row an open offset applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetSide {
    Left,
    Right,
}

/// Invalid [`SwipeConfig`] values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    NonPositiveDensity { density: f32 },
    NonPositiveShortThreshold { short: Dp },
    LongNotAboveShort { short: Dp, long: Dp },
    NegativeMinMovement { min_movement: Dp },
    NegativeTouchSlop { touch_slop: Dp },
    NegativeOffset { side: OffsetSide, offset: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDensity { density } => {
                write!(f, "display density must be > 0 (got {density})")
            }
            Self::NonPositiveShortThreshold { short } => {
                write!(f, "short swipe threshold must be > 0dp (got {}dp)", short.0)
            }
            Self::LongNotAboveShort { short, long } => write!(
                f,
                "long swipe threshold ({}dp) must exceed short threshold ({}dp)",
                long.0, short.0
            ),
            Self::NegativeMinMovement { min_movement } => write!(
                f,
                "minimum movement must be >= 0dp (got {}dp)",
                min_movement.0
            ),
            Self::NegativeTouchSlop { touch_slop } => {
                write!(f, "touch slop must be >= 0dp (got {}dp)", touch_slop.0)
            }
            Self::NegativeOffset { side, offset } => {
                let side = match side {
                    OffsetSide::Left => "left",
                    OffsetSide::Right => "right",
                };
                write!(f, "{side} open offset must be >= 0px (got {offset})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// SwipeConfig
// ---------------------------------------------------------------------------

/// Policy for swiping, dismissal, and drag reordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Directions rows may be swiped in. Default: both.
    pub swipe_mode: SwipeMode,
    /// Directions long swipes are recognized in. Default: both.
    pub long_swipe_mode: LongSwipeMode,
    /// Whether long swipes are recognized at all. Default: true.
    pub long_swipe_enabled: bool,
    /// Action per direction and tier.
    pub actions: ActionTable,
    pub short_threshold: Dp,
    pub long_threshold: Dp,
    /// Incremental horizontal movement needed to accept a sample.
    pub min_movement: Dp,
    pub touch_slop: Dp,
    /// Pixels per dp.
    pub density: f32,
    /// Commit animation duration; zero selects the platform short time.
    pub animation_time: Duration,
    /// Pixels of front layer left visible when opened to the left.
    pub offset_left: f32,
    /// Pixels of front layer left visible when opened to the right.
    pub offset_right: f32,
    /// Close every open row when the list starts a touch scroll.
    pub close_all_on_scroll: bool,
    pub drag_and_drop_enabled: bool,
    pub long_press_timeout: Duration,
    pub auto_scroll_step: Dp,
    pub settle_duration: Duration,
    pub scroll_resume_delay: Duration,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            swipe_mode: SwipeMode::Both,
            long_swipe_mode: LongSwipeMode::Both,
            long_swipe_enabled: true,
            actions: ActionTable::default(),
            short_threshold: Dp(DEFAULT_SHORT_THRESHOLD_DP),
            long_threshold: Dp(DEFAULT_LONG_THRESHOLD_DP),
            min_movement: Dp(DEFAULT_MIN_MOVEMENT_DP),
            touch_slop: Dp(DEFAULT_TOUCH_SLOP_DP),
            density: 1.0,
            animation_time: Duration::from_millis(DEFAULT_ANIMATION_TIME_MS),
            offset_left: 0.0,
            offset_right: 0.0,
            close_all_on_scroll: true,
            drag_and_drop_enabled: false,
            long_press_timeout: Duration::from_millis(DEFAULT_LONG_PRESS_TIMEOUT_MS),
            auto_scroll_step: Dp(DEFAULT_AUTO_SCROLL_STEP_DP),
            settle_duration: Duration::from_millis(DEFAULT_SETTLE_DURATION_MS),
            scroll_resume_delay: Duration::from_millis(DEFAULT_SCROLL_RESUME_DELAY_MS),
        }
    }
}

impl SwipeConfig {
    #[must_use]
    pub fn with_swipe_mode(mut self, mode: SwipeMode) -> Self {
        self.swipe_mode = mode;
        self
    }

    #[must_use]
    pub fn with_long_swipe_mode(mut self, mode: LongSwipeMode) -> Self {
        self.long_swipe_mode = mode;
        self
    }

    #[must_use]
    pub fn with_long_swipe_enabled(mut self, enabled: bool) -> Self {
        self.long_swipe_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_actions(mut self, actions: ActionTable) -> Self {
        self.actions = actions;
        self
    }

    /// Set short and long thresholds together (dp).
    #[must_use]
    pub fn with_thresholds(mut self, short: f32, long: f32) -> Self {
        self.short_threshold = Dp(short);
        self.long_threshold = Dp(long);
        self
    }

    #[must_use]
    pub fn with_min_movement(mut self, dp: f32) -> Self {
        self.min_movement = Dp(dp);
        self
    }

    #[must_use]
    pub fn with_touch_slop(mut self, dp: f32) -> Self {
        self.touch_slop = Dp(dp);
        self
    }

    #[must_use]
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    #[must_use]
    pub fn with_animation_time(mut self, duration: Duration) -> Self {
        self.animation_time = duration;
        self
    }

    /// Set the left and right open offsets (pixels).
    #[must_use]
    pub fn with_offsets(mut self, left: f32, right: f32) -> Self {
        self.offset_left = left;
        self.offset_right = right;
        self
    }

    #[must_use]
    pub fn with_close_all_on_scroll(mut self, close: bool) -> Self {
        self.close_all_on_scroll = close;
        self
    }

    #[must_use]
    pub fn with_drag_and_drop(mut self, enabled: bool) -> Self {
        self.drag_and_drop_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_long_press_timeout(mut self, timeout: Duration) -> Self {
        self.long_press_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_settle_duration(mut self, duration: Duration) -> Self {
        self.settle_duration = duration;
        self
    }

    #[must_use]
    pub fn with_scroll_resume_delay(mut self, delay: Duration) -> Self {
        self.scroll_resume_delay = delay;
        self
    }

    /// Directions long swipes are recognized in (empty when disabled).
    #[must_use]
    pub fn long_swipe_directions(&self) -> Directions {
        if self.long_swipe_enabled {
            self.long_swipe_mode.directions()
        } else {
            Directions::empty()
        }
    }

    /// Resolve dp distances to pixels.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            short: self.short_threshold.to_px(self.density),
            long: self.long_threshold.to_px(self.density),
            min_movement: self.min_movement.to_px(self.density),
            touch_slop: self.touch_slop.to_px(self.density),
            auto_scroll_step: self.auto_scroll_step.to_px(self.density),
        }
    }

    /// Commit animation duration, falling back to the short animation time.
    #[must_use]
    pub fn effective_animation_time(&self) -> Duration {
        if self.animation_time.is_zero() {
            Duration::from_millis(DEFAULT_ANIMATION_TIME_MS)
        } else {
            self.animation_time
        }
    }

    /// Open offset for the side a row opens toward.
    #[must_use]
    pub fn open_offset(&self, right: bool) -> f32 {
        if right {
            self.offset_right
        } else {
            self.offset_left
        }
    }

    /// Check every invariant listed in the module docs.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        if !(self.density > 0.0) {
            return Err(ConfigError::NonPositiveDensity {
                density: self.density,
            });
        }
        if !(self.short_threshold.0 > 0.0) {
            return Err(ConfigError::NonPositiveShortThreshold {
                short: self.short_threshold,
            });
        }
        if !(self.long_threshold.0 > self.short_threshold.0) {
            return Err(ConfigError::LongNotAboveShort {
                short: self.short_threshold,
                long: self.long_threshold,
            });
        }
        if !(self.min_movement.0 >= 0.0) {
            return Err(ConfigError::NegativeMinMovement {
                min_movement: self.min_movement,
            });
        }
        if !(self.touch_slop.0 >= 0.0) {
            return Err(ConfigError::NegativeTouchSlop {
                touch_slop: self.touch_slop,
            });
        }
        if !(self.offset_left >= 0.0) {
            return Err(ConfigError::NegativeOffset {
                side: OffsetSide::Left,
                offset: self.offset_left,
            });
        }
        if !(self.offset_right >= 0.0) {
            return Err(ConfigError::NegativeOffset {
                side: OffsetSide::Right,
                offset: self.offset_right,
            });
        }
        Ok(self)
    }

    /// Load config from environment variables.
    ///
    /// Reads:
    /// - `SWIPELIST_SWIPE_MODE`: `none`, `both`, `left`, or `right`
    /// - `SWIPELIST_LONG_SWIPE_MODE`: `left`, `right`, or `both`
    /// - `SWIPELIST_LONG_SWIPE`: enable long swipes (`1/0/true/false`)
    /// - `SWIPELIST_SHORT_THRESHOLD_DP`, `SWIPELIST_LONG_THRESHOLD_DP`
    /// - `SWIPELIST_MIN_MOVEMENT_DP`, `SWIPELIST_TOUCH_SLOP_DP`
    /// - `SWIPELIST_DENSITY`: pixels per dp
    /// - `SWIPELIST_ANIMATION_TIME_MS`, `SWIPELIST_LONG_PRESS_TIMEOUT_MS`
    /// - `SWIPELIST_CLOSE_ALL_ON_SCROLL`, `SWIPELIST_DRAG_AND_DROP`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the resulting config fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Load config using a custom environment lookup (for tests).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the resulting config fails validation.
    pub fn from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = get_env(ENV_SWIPE_MODE)
            && let Some(mode) = SwipeMode::parse(&val)
        {
            config.swipe_mode = mode;
        }
        if let Some(val) = get_env(ENV_LONG_SWIPE_MODE)
            && let Some(mode) = LongSwipeMode::parse(&val)
        {
            config.long_swipe_mode = mode;
        }
        if let Some(val) = get_env(ENV_LONG_SWIPE)
            && let Some(enabled) = parse_bool(&val)
        {
            config.long_swipe_enabled = enabled;
        }

        let dp_vars: [(&str, &mut Dp); 4] = [
            (ENV_SHORT_THRESHOLD_DP, &mut config.short_threshold),
            (ENV_LONG_THRESHOLD_DP, &mut config.long_threshold),
            (ENV_MIN_MOVEMENT_DP, &mut config.min_movement),
            (ENV_TOUCH_SLOP_DP, &mut config.touch_slop),
        ];
        for (key, slot) in dp_vars {
            if let Some(val) = get_env(key)
                && let Ok(dp) = val.trim().parse::<f32>()
            {
                *slot = Dp(dp);
            }
        }

        if let Some(val) = get_env(ENV_DENSITY)
            && let Ok(density) = val.trim().parse::<f32>()
        {
            config.density = density;
        }
        if let Some(val) = get_env(ENV_ANIMATION_TIME_MS)
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            config.animation_time = Duration::from_millis(ms);
        }
        if let Some(val) = get_env(ENV_LONG_PRESS_TIMEOUT_MS)
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            config.long_press_timeout = Duration::from_millis(ms);
        }
        if let Some(val) = get_env(ENV_CLOSE_ALL_ON_SCROLL)
            && let Some(close) = parse_bool(&val)
        {
            config.close_all_on_scroll = close;
        }
        if let Some(val) = get_env(ENV_DRAG_AND_DROP)
            && let Some(enabled) = parse_bool(&val)
        {
            config.drag_and_drop_enabled = enabled;
        }

        config.validated()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
