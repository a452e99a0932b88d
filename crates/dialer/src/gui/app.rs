use crate::access::AccessPolicy;
use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::dial::{self, AreaObserver};
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use rotary::geometry::DEFAULT_DIMENSION;
use rotary::{Code, Dial, DialHandle, Point, Size};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

const FEEDBACK_DURATION: Duration = Duration::from_secs(2);

pub struct AppInit {
    pub config: Config,
    pub config_path: PathBuf,
    pub events: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub dial: DialHandle,
    pub access: AccessPolicy,
    pub feedback: Option<String>,
    feedback_serial: u64,
    config_path: PathBuf,
    ticking: Rc<Cell<bool>>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    TouchDown(Point),
    TouchMove(Point),
    TouchUp,
    Resize(Size),
    CodeComplete(Code),
    ClearFeedback(u64),
    ConfigReload,
    Close,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Dialer"),
            set_default_size: (DEFAULT_DIMENSION, DEFAULT_DIMENSION),

            connect_close_request[dial = model.dial.clone()] => move |_| {
                dial.dispose();
                glib::Propagation::Proceed
            },

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Overlay {
                #[local_ref]
                drawing_area -> gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "dialer-drawing-area",

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(Size::new(width, height)));
                    },

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::TouchDown(Point::new(x, y)));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::TouchMove(Point::new(x + dx, y + dy)));
                            }
                        },
                        connect_drag_end[sender] => move |_, _, _| {
                            sender.input(AppMsg::TouchUp);
                        }
                    }
                },

                add_overlay = &gtk::Label {
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::End,
                    set_margin_bottom: 24,
                    add_css_class: "dialer-feedback",
                    #[watch]
                    set_visible: model.feedback.is_some(),
                    #[watch]
                    set_label: model.feedback.as_deref().unwrap_or_default(),
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            config_path,
            events,
        } = init;

        theme::load_css();

        let drawing_area = gtk::DrawingArea::default();
        let observer = AreaObserver::new(drawing_area.clone(), sender.input_sender().clone());
        let dial = Dial::new(config.dial, observer.clone()).unwrap_or_else(|e| {
            log::error!("{}, falling back to defaults", e);
            Dial::with_default_config(observer)
        });

        let model = AppModel {
            dial: DialHandle::new(dial),
            access: AccessPolicy::from_config(&config.access),
            feedback: None,
            feedback_serial: 0,
            config_path,
            ticking: Rc::new(Cell::new(false)),
            root: root.clone(),
            drawing_area: drawing_area.clone(),
        };

        let widgets = view_output!();

        let dial_draw = model.dial.downgrade();
        model
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let Some(frame) = dial_draw.upgrade().and_then(|d| d.frame()) else {
                    return;
                };
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                if let Err(e) = dial::draw(cr, &frame, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::TouchDown(point) => self.dial.touch_down(point),
            AppMsg::TouchMove(point) => self.dial.touch_move(point),
            AppMsg::TouchUp => {
                self.dial.touch_up();
                self.start_return_animation();
            }
            AppMsg::Resize(size) => self.dial.resize(size),
            AppMsg::CodeComplete(code) => {
                let verdict = self.access.check(&code);
                log::debug!("{}", verdict);
                self.feedback = Some(verdict.to_string());
                self.feedback_serial += 1;

                let serial = self.feedback_serial;
                glib::timeout_add_local_once(FEEDBACK_DURATION, move || {
                    sender.input(AppMsg::ClearFeedback(serial));
                });
            }
            AppMsg::ClearFeedback(serial) => {
                if serial == self.feedback_serial {
                    self.feedback = None;
                }
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    if let Err(e) = self.dial.reconfigure(new_config.dial) {
                        log::error!("Failed to apply dial settings: {}", e);
                        return;
                    }
                    self.access = AccessPolicy::from_config(&new_config.access);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Close => {
                self.dial.dispose();
                self.root.close();
            }
        }
    }
}

impl AppModel {
    /// Drives the dial's return animation from the frame clock until it
    /// reports rest, the dial is gone, or a new drag cancels it.
    fn start_return_animation(&self) {
        if self.ticking.replace(true) {
            return;
        }

        let dial = self.dial.downgrade();
        let ticking = self.ticking.clone();
        self.drawing_area.add_tick_callback(move |_, _| {
            let animating = dial.upgrade().is_some_and(|d| d.tick(Instant::now()));
            if animating {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }
}
