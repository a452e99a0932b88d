pub mod view;

pub use view::draw;

use crate::gui::app::AppMsg;
use gtk::prelude::*;
use gtk4 as gtk;
use rotary::{Code, DialFrame, DialObserver};

pub const LABEL_FONT_SIZE: f64 = 20.0;

/// Forwards dial notifications into GTK: redraws are queued on the drawing
/// area, completed codes go back to the component as messages.
#[derive(Clone)]
pub struct AreaObserver {
    area: gtk::DrawingArea,
    input: relm4::Sender<AppMsg>,
}

impl AreaObserver {
    pub fn new(area: gtk::DrawingArea, input: relm4::Sender<AppMsg>) -> Self {
        Self { area, input }
    }
}

impl DialObserver for AreaObserver {
    fn redraw_requested(&mut self, _frame: DialFrame) {
        self.area.queue_draw();
    }

    fn code_completed(&mut self, code: Code) {
        self.input.emit(AppMsg::CodeComplete(code));
    }
}
