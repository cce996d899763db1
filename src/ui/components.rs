//! UI components module
//!
//! Reusable pieces of the launcher lists: the round glyph icon and the row
//! that pairs it with a multi-line label.

use gtk4::cairo;
use gtk4::prelude::*;
use gtk4::{DrawingArea, Label, ListBoxRow, Orientation};
use std::f64::consts::PI;

use crate::presenter::{DisplayItem, Rgb};

/// Side of the glyph icon in pixels
pub const ICON_SIZE: i32 = 48;
/// Space between the icon and the label in pixels
pub const ROW_SPACING: i32 = 10;

/// Creates a round icon filled with `color` showing `glyph` in white
///
/// # Arguments
///
/// * `glyph` - Up to two characters drawn centered
/// * `color` - Fill color of the disc
///
/// # Returns
///
/// A drawing area of `ICON_SIZE` x `ICON_SIZE` pixels
pub fn create_glyph_icon(glyph: &str, color: Rgb) -> DrawingArea {
    let icon = DrawingArea::new();
    icon.set_content_width(ICON_SIZE);
    icon.set_content_height(ICON_SIZE);
    icon.set_hexpand(false);
    icon.set_valign(gtk4::Align::Center);

    let glyph = glyph.to_string();
    icon.set_draw_func(move |_, cr, width, height| {
        let w = width as f64;
        let h = height as f64;
        let (r, g, b) = color.to_unit();

        cr.set_source_rgb(r, g, b);
        cr.arc(w / 2.0, h / 2.0, w.min(h) / 2.0 - 1.0, 0.0, 2.0 * PI);
        if let Err(e) = cr.fill() {
            log::debug!("Failed to paint icon: {}", e);
            return;
        }

        if glyph.is_empty() {
            return;
        }
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.select_font_face("Verdana", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(h * 0.375);
        if let Ok(extents) = cr.text_extents(&glyph) {
            let x = w / 2.0 - (extents.width() / 2.0 + extents.x_bearing());
            let y = h / 2.0 - (extents.height() / 2.0 + extents.y_bearing());
            cr.move_to(x, y);
            cr.show_text(&glyph).ok();
        }
    });

    icon
}

/// Creates a list row: glyph icon on the left, label on the right
pub fn create_item_row(item: &DisplayItem) -> ListBoxRow {
    let hbox = gtk4::Box::new(Orientation::Horizontal, ROW_SPACING);
    hbox.set_margin_top(4);
    hbox.set_margin_bottom(4);
    hbox.set_margin_start(4);
    hbox.set_margin_end(4);

    let label = Label::new(Some(item.label.as_str()));
    label.set_xalign(0.0);
    label.set_hexpand(true);
    label.set_wrap(true);

    hbox.append(&create_glyph_icon(&item.glyph, item.color));
    hbox.append(&label);

    let row = ListBoxRow::new();
    row.set_child(Some(&hbox));
    row.set_tooltip_text(Some(item.identifier.as_str()));
    row
}
