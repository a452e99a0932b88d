use super::LABEL_FONT_SIZE;
use crate::gui::theme::ThemeColors;
use cairo::{Context, Operator};
use palette::Srgba;
use rotary::face::DialFace;
use rotary::{DialFrame, Geometry};
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn fill_disc(cr: &Context, geometry: &Geometry) -> Result<(), cairo::Error> {
    cr.arc(
        geometry.center.x,
        geometry.center.y,
        geometry.radius,
        0.0,
        2.0 * PI,
    );
    cr.fill()
}

/// Paints the face with its digits, then the plate on top with the finger
/// holes cut out, turned by the frame's rotation.
pub fn draw(cr: &Context, frame: &DialFrame, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let face = DialFace::new(frame.geometry);

    set_color(cr, colors.face);
    fill_disc(cr, &frame.geometry)?;
    draw_labels(cr, &face, colors)?;
    draw_plate(cr, frame, &face, colors)
}

fn draw_labels(cr: &Context, face: &DialFace, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.label);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(LABEL_FONT_SIZE);

    for (digit, center) in face.labels() {
        let text = digit.to_string();
        if let Ok(ext) = cr.text_extents(&text) {
            cr.move_to(center.x - ext.width() / 2.0, center.y + ext.height() / 2.0);
            cr.show_text(&text)?;
        }
    }
    Ok(())
}

fn draw_plate(
    cr: &Context,
    frame: &DialFrame,
    face: &DialFace,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.push_group();

    set_color(cr, colors.plate);
    fill_disc(cr, &frame.geometry)?;

    cr.set_operator(Operator::Clear);
    for hole in face.holes(frame.rotation) {
        cr.arc(hole.center.x, hole.center.y, hole.radius, 0.0, 2.0 * PI);
        cr.fill()?;
    }
    cr.set_operator(Operator::Over);

    cr.pop_group_to_source()?;
    cr.paint()?;
    cr.restore()
}
