use crate::code::Code;
use crate::geometry::Geometry;
use async_channel::{Sender, TrySendError};

/// Everything a renderer needs to paint the dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialFrame {
    pub geometry: Geometry,
    pub rotation: i32,
}

/// Receives notifications from a [`crate::Dial`].
///
/// Both methods run while the dial is being mutated. Implementations that feed
/// back into the same dial should queue the work instead of calling it directly;
/// a direct call through a [`crate::DialHandle`] is dropped.
pub trait DialObserver {
    /// The visible state changed and the dial should be painted again.
    fn redraw_requested(&mut self, frame: DialFrame);

    /// A full code was dialed. Fired once per code; the dial's buffer is
    /// already empty when this runs.
    fn code_completed(&mut self, code: Code);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl DialObserver for NullObserver {
    fn redraw_requested(&mut self, _frame: DialFrame) {}

    fn code_completed(&mut self, _code: Code) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialEvent {
    Redraw(DialFrame),
    CodeComplete(Code),
}

impl DialObserver for Sender<DialEvent> {
    fn redraw_requested(&mut self, frame: DialFrame) {
        // A full queue already holds a pending redraw.
        if let Err(TrySendError::Closed(_)) = self.try_send(DialEvent::Redraw(frame)) {
            log::warn!("Dial event channel closed, dropping redraw");
        }
    }

    fn code_completed(&mut self, code: Code) {
        if let Err(e) = self.try_send(DialEvent::CodeComplete(code)) {
            log::error!("Failed to deliver completed code: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    #[test]
    fn test_channel_observer_forwards_events() {
        let (mut tx, rx) = async_channel::unbounded::<DialEvent>();
        let frame = DialFrame {
            geometry: Geometry::compute(Size::square(100)),
            rotation: -42,
        };

        tx.redraw_requested(frame);
        tx.code_completed(Code::new("1234"));

        assert_eq!(rx.try_recv(), Ok(DialEvent::Redraw(frame)));
        assert_eq!(rx.try_recv(), Ok(DialEvent::CodeComplete(Code::new("1234"))));
        assert!(rx.is_empty());
    }

    #[test]
    fn test_full_channel_drops_redraw_quietly() {
        let (mut tx, rx) = async_channel::bounded::<DialEvent>(1);
        let frame = DialFrame {
            geometry: Geometry::default(),
            rotation: 0,
        };
        tx.redraw_requested(frame);
        tx.redraw_requested(frame);
        assert_eq!(rx.len(), 1);
    }
}
