//! The dial state machine.
//!
//! A dial is idle at rest, dragging while a gesture pulls it away from rest,
//! and returning while the spring-back animation runs after release:
//!
//! ```text
//! Idle --touch_down--> Dragging --touch_up--> Returning --tick (at rest)--> Idle
//!                         ^                       |
//!                         +------touch_down-------+
//! ```

use crate::angle::{self, RotationPolicy};
use crate::animator::ReturnAnimation;
use crate::code::{CodeBuffer, Digit};
use crate::config::{ConfigError, DialConfig};
use crate::digits::DigitAngleMap;
use crate::geometry::{DEFAULT_DIMENSION, Geometry, Point, Size};
use crate::observer::{DialFrame, DialObserver};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Instant;
use strum::Display as StrumDisplay;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DialError {
    #[error("Invalid dial configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Dial is busy dispatching an event")]
    Busy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay)]
pub enum DialPhase {
    #[default]
    Idle,
    Dragging,
    Returning,
}

pub struct Dial {
    config: DialConfig,
    policy: RotationPolicy,
    digits: DigitAngleMap,
    size: Size,
    geometry: Geometry,
    rotation: i32,
    code: CodeBuffer,
    last_touch: Point,
    phase: DialPhase,
    animation: Option<ReturnAnimation>,
    observer: Box<dyn DialObserver>,
    disposed: bool,
}

impl Dial {
    pub fn new(
        config: DialConfig,
        observer: impl DialObserver + 'static,
    ) -> Result<Self, DialError> {
        config.validate()?;
        Ok(Self::build(config, observer))
    }

    /// A dial with [`DialConfig::default`], which always validates.
    pub fn with_default_config(observer: impl DialObserver + 'static) -> Self {
        Self::build(DialConfig::default(), observer)
    }

    fn build(config: DialConfig, observer: impl DialObserver + 'static) -> Self {
        let size = Size::square(DEFAULT_DIMENSION);
        Self {
            config,
            policy: RotationPolicy::new(config.max_rotation_bound),
            digits: DigitAngleMap::new(),
            size,
            geometry: Geometry::compute(size),
            rotation: 0,
            code: CodeBuffer::new(config.max_code_length),
            last_touch: Point::default(),
            phase: DialPhase::Idle,
            animation: None,
            observer: Box::new(observer),
            disposed: false,
        }
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    pub fn phase(&self) -> DialPhase {
        self.phase
    }

    /// Signed degrees from rest; `0` at rest, negative while pulled.
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Digits dialed toward the next code.
    pub fn pending_digits(&self) -> &[Digit] {
        self.code.digits()
    }

    pub fn frame(&self) -> DialFrame {
        DialFrame {
            geometry: self.geometry,
            rotation: self.rotation,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn resize(&mut self, size: Size) {
        if self.disposed {
            return;
        }
        self.size = size;
        self.geometry = Geometry::compute(size);
        self.request_redraw();
    }

    /// Starts a drag. A return animation still in flight is cancelled and the
    /// drag picks up from wherever the animation left the dial.
    pub fn touch_down(&mut self, point: Point) {
        if self.disposed {
            return;
        }
        if self.animation.take().is_some() {
            log::debug!("Return interrupted at {} degrees", self.rotation);
        }
        self.last_touch = point;
        self.phase = DialPhase::Dragging;
    }

    pub fn touch_move(&mut self, point: Point) {
        if self.disposed || self.phase != DialPhase::Dragging {
            return;
        }

        let Some(delta) = angle::rotation_delta(self.geometry.center, self.last_touch, point)
        else {
            return;
        };
        let Some(rotation) = self.policy.accept(self.rotation, delta) else {
            return;
        };

        self.rotation = rotation;
        self.last_touch = point;
        log::debug!("rotation: {}", self.rotation);
        self.request_redraw();
    }

    /// Ends the drag: records the digit the dial was pulled to, if any, and
    /// starts returning to rest.
    pub fn touch_up(&mut self) {
        if self.disposed || self.phase != DialPhase::Dragging {
            return;
        }

        let total = self.rotation.abs();
        match self.digits.lookup(total, self.config.tolerance_window) {
            Some(digit) => {
                log::debug!("Released at {} degrees, digit {}", total, digit);
                if let Some(code) = self.code.push(digit) {
                    log::info!("Code complete ({} digits)", code.len());
                    self.observer.code_completed(code);
                }
            }
            None => log::debug!("Released at {} degrees, no digit", total),
        }

        self.animation = Some(ReturnAnimation::new(
            self.rotation,
            self.config.return_duration(),
            self.config.easing,
        ));
        self.phase = DialPhase::Returning;
    }

    /// Advances the return animation. Returns `true` while more ticks are needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.disposed {
            return false;
        }
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let frame = animation.sample(now);
        self.rotation = frame.angle;
        self.request_redraw();

        if frame.finished {
            self.animation = None;
            self.phase = DialPhase::Idle;
        }
        !frame.finished
    }

    /// Applies new settings. Pending digits are kept when they still fit.
    /// A dial pulled past a tighter bound is pulled back inside it.
    pub fn reconfigure(&mut self, config: DialConfig) -> Result<(), DialError> {
        config.validate()?;
        self.policy = RotationPolicy::new(config.max_rotation_bound);
        self.code.set_capacity(config.max_code_length);
        self.config = config;

        let limit = 1 - config.max_rotation_bound;
        if self.rotation < limit {
            log::debug!("Rotation {} clamped to {} degrees", self.rotation, limit);
            self.rotation = limit;
            if self.animation.is_some() {
                self.animation = Some(ReturnAnimation::new(
                    self.rotation,
                    config.return_duration(),
                    config.easing,
                ));
            }
            if !self.disposed {
                self.request_redraw();
            }
        }
        Ok(())
    }

    /// Stops the dial for good. Later events and ticks are ignored.
    pub fn dispose(&mut self) {
        self.animation = None;
        self.phase = DialPhase::Idle;
        self.disposed = true;
    }

    fn request_redraw(&mut self) {
        let frame = self.frame();
        self.observer.redraw_requested(frame);
    }
}

/// Shared handle to a [`Dial`] for gesture handlers and animation ticks.
///
/// Events that arrive while the dial is already handling one (an observer
/// calling back into the dial synchronously) are dropped.
#[derive(Clone)]
pub struct DialHandle(Rc<RefCell<Dial>>);

#[derive(Clone)]
pub struct WeakDialHandle(Weak<RefCell<Dial>>);

impl DialHandle {
    pub fn new(dial: Dial) -> Self {
        Self(Rc::new(RefCell::new(dial)))
    }

    fn dispatch<R>(&self, event: &str, f: impl FnOnce(&mut Dial) -> R) -> Option<R> {
        match self.0.try_borrow_mut() {
            Ok(mut dial) => Some(f(&mut dial)),
            Err(_) => {
                log::debug!("Ignoring {} received during dispatch", event);
                None
            }
        }
    }

    pub fn touch_down(&self, point: Point) {
        self.dispatch("touch_down", |dial| dial.touch_down(point));
    }

    pub fn touch_move(&self, point: Point) {
        self.dispatch("touch_move", |dial| dial.touch_move(point));
    }

    pub fn touch_up(&self) {
        self.dispatch("touch_up", Dial::touch_up);
    }

    pub fn resize(&self, size: Size) {
        self.dispatch("resize", |dial| dial.resize(size));
    }

    /// See [`Dial::tick`]. A tick that lands mid-dispatch asks to be retried.
    pub fn tick(&self, now: Instant) -> bool {
        self.dispatch("tick", |dial| dial.tick(now)).unwrap_or(true)
    }

    pub fn reconfigure(&self, config: DialConfig) -> Result<(), DialError> {
        self.dispatch("reconfigure", |dial| dial.reconfigure(config))
            .unwrap_or(Err(DialError::Busy))
    }

    pub fn dispose(&self) {
        self.dispatch("dispose", Dial::dispose);
    }

    /// Reads the dial, or `None` while it is being mutated.
    pub fn with<R>(&self, f: impl FnOnce(&Dial) -> R) -> Option<R> {
        self.0.try_borrow().ok().map(|dial| f(&dial))
    }

    pub fn frame(&self) -> Option<DialFrame> {
        self.with(Dial::frame)
    }

    pub fn downgrade(&self) -> WeakDialHandle {
        WeakDialHandle(Rc::downgrade(&self.0))
    }
}

impl WeakDialHandle {
    pub fn upgrade(&self) -> Option<DialHandle> {
        self.0.upgrade().map(DialHandle)
    }
}
