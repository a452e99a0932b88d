//! Spring-back of the dial to rest once it is released.
//!
//! The animation is sampled, never driven: the host polls [`ReturnAnimation::sample`]
//! from its own frame or timer callback and the returned angle depends only on
//! the time elapsed since the first sample.

use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::PI;
use std::time::{Duration, Instant};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_RETURN_DURATION: Duration = Duration::from_millis(300);

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[strum(serialize = "linear")]
    Linear,
    #[default]
    #[strum(
        to_string = "accelerate-decelerate",
        serialize = "AccelerateDecelerate",
        serialize = "ease-in-out"
    )]
    AccelerateDecelerate,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` onto the eased curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub angle: i32,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct ReturnAnimation {
    from: i32,
    duration: Duration,
    easing: Easing,
    started: Option<Instant>,
}

impl ReturnAnimation {
    pub fn new(from: i32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            duration,
            easing,
            started: None,
        }
    }

    pub fn from_angle(&self) -> i32 {
        self.from
    }

    /// Angle at `now`. The first call starts the clock and yields the
    /// starting angle (or rest, for a zero duration).
    pub fn sample(&mut self, now: Instant) -> Frame {
        let started = *self.started.get_or_insert(now);

        let progress = if self.duration.is_zero() {
            1.0
        } else {
            now.saturating_duration_since(started).as_secs_f64() / self.duration.as_secs_f64()
        };

        if progress >= 1.0 {
            return Frame {
                angle: 0,
                finished: true,
            };
        }

        let eased = self.easing.apply(progress);
        let angle = (self.from as f64 + (0.0 - self.from as f64) * eased) as i32;
        Frame {
            angle,
            finished: angle == 0,
        }
    }
}
