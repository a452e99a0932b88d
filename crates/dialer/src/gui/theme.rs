use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub face: Srgba<f64>,
    pub plate: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            face: Self::lookup_color(
                context,
                "dialer_face_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            plate: Self::lookup_color(
                context,
                "dialer_plate_color",
                Srgba::new(0.8, 0.1, 0.1, 1.0),
                None,
            ),
            label: Self::lookup_color(
                context,
                "theme_text_color",
                Srgba::new(0.0, 0.0, 0.0, 1.0),
                Some(1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color dialer_face_color #ffffff;
@define-color dialer_plate_color #c62828;

.dialer-drawing-area {
    background: none;
    background-color: transparent;
}

.dialer-feedback {
    background-color: alpha(black, 0.75);
    color: white;
    border-radius: 16px;
    padding: 8px 16px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
