//! Headless core of a rotary-phone style dial: drag gestures become a
//! rotation angle, a released rotation becomes a digit, and digits add up
//! to a fixed-length code.

pub mod macros;

pub mod angle;
pub mod animator;
pub mod code;
pub mod config;
pub mod dial;
pub mod digits;
pub mod face;
pub mod geometry;
pub mod observer;

pub use code::{Code, CodeBuffer, Digit};
pub use config::DialConfig;
pub use dial::{Dial, DialError, DialHandle, DialPhase, WeakDialHandle};
pub use geometry::{Geometry, Point, Size};
pub use observer::{DialEvent, DialFrame, DialObserver, NullObserver};
