//! Docked panel listing the sections of the loaded binary
//!
//! A table of sections next to a proportional map of their sizes. The two
//! sit side by side when the dock is wide and stacked when it is tall, unless
//! the user picks an orientation from the context menu.

use gtk4::prelude::*;
use gtk4::{
    DrawingArea, Frame, GestureClick, Label, ListBox, Orientation, PopoverMenu, ScrolledWindow,
    SelectionMode,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::presenter::color_for;
use crate::sections::{DockLayout, SECTION_COLUMNS, Section};
use crate::ui::helpers::clear_list_box;

/// Thickness of the section map in pixels
pub const MAP_THICKNESS: i32 = 48;

pub struct SectionsDock {
    pub root: Frame,
    container: gtk4::Box,
    list: ListBox,
    map: DrawingArea,
    sections: Rc<RefCell<Vec<Section>>>,
    layout: Cell<DockLayout>,
    /// Set once the user chose an orientation by hand
    pinned: Cell<bool>,
}

fn columns_row(columns: &[String]) -> gtk4::Box {
    let hbox = gtk4::Box::new(Orientation::Horizontal, 10);
    hbox.set_homogeneous(true);
    for text in columns {
        let label = Label::new(None);
        label.set_markup(text);
        label.set_xalign(0.0);
        hbox.append(&label);
    }
    hbox
}

fn draw_map(cr: &gtk4::cairo::Context, width: f64, height: f64, sections: &[Section], layout: DockLayout) {
    let total: u64 = sections.iter().map(|s| s.vsize.max(s.size)).sum();
    if total == 0 {
        return;
    }
    // The map runs along the long side of the dock
    let length = match layout {
        DockLayout::Horizontal => height,
        DockLayout::Vertical => width,
    };
    let mut offset = 0.0;
    for (i, section) in sections.iter().enumerate() {
        let extent = section.vsize.max(section.size) as f64 / total as f64 * length;
        let (r, g, b) = color_for(&section.name, i).to_unit();
        cr.set_source_rgb(r, g, b);
        match layout {
            DockLayout::Horizontal => cr.rectangle(0.0, offset, width, extent),
            DockLayout::Vertical => cr.rectangle(offset, 0.0, extent, height),
        }
        if cr.fill().is_err() {
            return;
        }
        offset += extent;
    }
}

impl SectionsDock {
    pub fn new() -> Rc<Self> {
        let list = ListBox::new();
        list.set_selection_mode(SelectionMode::Single);
        let scrolled = ScrolledWindow::builder()
            .hscrollbar_policy(gtk4::PolicyType::Automatic)
            .vscrollbar_policy(gtk4::PolicyType::Automatic)
            .hexpand(true)
            .vexpand(true)
            .child(&list)
            .build();

        let map = DrawingArea::new();
        let container = gtk4::Box::new(Orientation::Vertical, 6);
        container.append(&scrolled);
        container.append(&map);

        let root = Frame::new(Some("Sections"));
        root.set_child(Some(&container));

        let dock = Rc::new(Self {
            root,
            container,
            list,
            map,
            sections: Rc::new(RefCell::new(Vec::new())),
            layout: Cell::new(DockLayout::Vertical),
            pinned: Cell::new(false),
        });
        dock.apply_layout(DockLayout::Vertical);

        let sections = dock.sections.clone();
        let layout = Rc::downgrade(&dock);
        dock.map.set_draw_func(move |_, cr, width, height| {
            let current = layout
                .upgrade()
                .map(|dock| dock.layout.get())
                .unwrap_or(DockLayout::Vertical);
            draw_map(cr, width as f64, height as f64, &sections.borrow(), current);
        });

        dock.setup_context_menu();
        dock
    }

    pub fn set_sections(&self, sections: Vec<Section>) {
        clear_list_box(&self.list);
        let header: Vec<String> = SECTION_COLUMNS
            .iter()
            .map(|title| format!("<b>{}</b>", title))
            .collect();
        self.list.append(&columns_row(&header));
        for section in &sections {
            let escaped: Vec<String> = section
                .columns()
                .iter()
                .map(|c| glib::markup_escape_text(c).to_string())
                .collect();
            self.list.append(&columns_row(&escaped));
        }
        *self.sections.borrow_mut() = sections;
        self.map.queue_draw();
    }

    /// Follows the dock's aspect ratio unless the user pinned an orientation.
    pub fn follow_size(&self, width: i32, height: i32) {
        if !self.pinned.get() {
            self.apply_layout(DockLayout::for_size(width, height));
        }
    }

    pub fn pin_layout(&self, layout: DockLayout) {
        self.pinned.set(true);
        self.apply_layout(layout);
    }

    fn apply_layout(&self, layout: DockLayout) {
        self.layout.set(layout);
        match layout {
            DockLayout::Horizontal => {
                self.container.set_orientation(Orientation::Horizontal);
                self.map.set_content_width(MAP_THICKNESS);
                self.map.set_content_height(0);
                self.map.set_hexpand(false);
                self.map.set_vexpand(true);
            }
            DockLayout::Vertical => {
                self.container.set_orientation(Orientation::Vertical);
                self.map.set_content_width(0);
                self.map.set_content_height(MAP_THICKNESS);
                self.map.set_hexpand(true);
                self.map.set_vexpand(false);
            }
        }
        self.map.queue_draw();
    }

    fn setup_context_menu(self: &Rc<Self>) {
        let actions = gio::SimpleActionGroup::new();
        for (name, layout) in [
            ("vertical", DockLayout::Vertical),
            ("horizontal", DockLayout::Horizontal),
        ] {
            let action = gio::SimpleAction::new(name, None);
            let dock = Rc::downgrade(self);
            action.connect_activate(move |_, _| {
                if let Some(dock) = dock.upgrade() {
                    dock.pin_layout(layout);
                }
            });
            actions.add_action(&action);
        }
        self.root.insert_action_group("dock", Some(&actions));

        let menu = gio::Menu::new();
        menu.append(Some("Vertical"), Some("dock.vertical"));
        menu.append(Some("Horizontal"), Some("dock.horizontal"));
        let popover = PopoverMenu::from_model(Some(&menu));
        popover.set_parent(&self.container);
        popover.set_has_arrow(false);

        let gesture = GestureClick::new();
        gesture.set_button(gtk4::gdk::BUTTON_SECONDARY);
        gesture.connect_pressed(move |_, _, x, y| {
            popover.set_pointing_to(Some(&gtk4::gdk::Rectangle::new(x as i32, y as i32, 1, 1)));
            popover.popup();
        });
        self.container.add_controller(gesture);
    }
}
