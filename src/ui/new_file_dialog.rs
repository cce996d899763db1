//! The launcher window
//!
//! Two tabs: recently opened binaries and engine projects. Activating a row
//! hands its identifier to the [`Launcher`] and closes the window.

use gtk4::prelude::*;
use gtk4::{
    Align, Application, ApplicationWindow, Button, Entry, GestureClick, Label, ListBox,
    ListBoxRow, Notebook, Orientation, PopoverMenu, ScrolledWindow, SelectionMode,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

use crate::dialogs::{choose_file, choose_folder, show_error};
use crate::error::LaunchError;
use crate::launcher::{Launcher, Tab};
use crate::ui::helpers::{clear_list_box, fill_list_box, identifier_at};
use crate::ui::windows::create_about_dialog;

const RECENT_FILES_PAGE: u32 = 0;
const PROJECTS_PAGE: u32 = 1;

pub struct NewFileDialog {
    pub window: ApplicationWindow,
    launcher: Rc<RefCell<Launcher>>,
    notebook: Notebook,
    file_entry: Entry,
    load_file_button: Button,
    recents_list: ListBox,
    recent_ids: RefCell<Vec<String>>,
    projects_list: ListBox,
    project_ids: RefCell<Vec<String>>,
    projects_dir_entry: Entry,
    load_project_button: Button,
}

fn padded_box(orientation: Orientation) -> gtk4::Box {
    let vbox = gtk4::Box::new(orientation, 10);
    vbox.set_margin_top(10);
    vbox.set_margin_bottom(10);
    vbox.set_margin_start(10);
    vbox.set_margin_end(10);
    vbox
}

fn scrolled(list: &ListBox) -> ScrolledWindow {
    ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .vscrollbar_policy(gtk4::PolicyType::Automatic)
        .hexpand(true)
        .vexpand(true)
        .child(list)
        .build()
}

impl NewFileDialog {
    pub fn new(app: &Application, launcher: Rc<RefCell<Launcher>>) -> Rc<Self> {
        let window = ApplicationWindow::builder()
            .application(app)
            .title("Open")
            .default_width(640)
            .default_height(480)
            .build();

        let notebook = Notebook::new();
        notebook.set_vexpand(true);

        // --- Recent files tab ---
        let recents_list = ListBox::new();
        recents_list.set_selection_mode(SelectionMode::Single);
        recents_list.set_activate_on_single_click(false);

        let file_entry = Entry::builder()
            .hexpand(true)
            .placeholder_text("Path of the binary to open")
            .build();
        let select_file_button = Button::with_label("Select…");
        let load_file_button = Button::with_label("Load");

        let file_hbox = gtk4::Box::new(Orientation::Horizontal, 10);
        file_hbox.append(&file_entry);
        file_hbox.append(&select_file_button);
        file_hbox.append(&load_file_button);

        let files_tab = padded_box(Orientation::Vertical);
        files_tab.append(&scrolled(&recents_list));
        files_tab.append(&file_hbox);

        // --- Projects tab ---
        let projects_list = ListBox::new();
        projects_list.set_selection_mode(SelectionMode::Single);
        projects_list.set_activate_on_single_click(false);

        let projects_dir_entry = Entry::builder().hexpand(true).build();
        projects_dir_entry.set_editable(false);
        let select_dir_button = Button::with_label("Select…");
        let dir_hbox = gtk4::Box::new(Orientation::Horizontal, 10);
        dir_hbox.append(&Label::new(Some("Projects path:")));
        dir_hbox.append(&projects_dir_entry);
        dir_hbox.append(&select_dir_button);

        let load_project_button = Button::with_label("Load project");
        load_project_button.set_halign(Align::End);

        let projects_tab = padded_box(Orientation::Vertical);
        projects_tab.append(&dir_hbox);
        projects_tab.append(&scrolled(&projects_list));
        projects_tab.append(&load_project_button);

        notebook.append_page(&files_tab, Some(&Label::new(Some("Recent files"))));
        notebook.append_page(&projects_tab, Some(&Label::new(Some("Projects"))));

        // --- Bottom bar ---
        let about_button = Button::with_label("About");
        let cancel_button = Button::with_label("Cancel");
        let spacer = gtk4::Box::new(Orientation::Horizontal, 0);
        spacer.set_hexpand(true);
        let bottom_hbox = padded_box(Orientation::Horizontal);
        bottom_hbox.append(&about_button);
        bottom_hbox.append(&spacer);
        bottom_hbox.append(&cancel_button);

        let vbox = gtk4::Box::new(Orientation::Vertical, 0);
        vbox.append(&notebook);
        vbox.append(&bottom_hbox);
        window.set_child(Some(&vbox));

        let dialog = Rc::new(Self {
            window,
            launcher,
            notebook,
            file_entry,
            load_file_button,
            recents_list,
            recent_ids: RefCell::new(Vec::new()),
            projects_list,
            project_ids: RefCell::new(Vec::new()),
            projects_dir_entry,
            load_project_button,
        });

        dialog.fill_recent_files();
        let project_count = dialog.fill_projects();
        let page = match dialog.launcher.borrow().initial_tab(project_count) {
            Tab::Projects => PROJECTS_PAGE,
            Tab::RecentFiles => RECENT_FILES_PAGE,
        };
        dialog.notebook.set_current_page(Some(page));

        let this = Rc::downgrade(&dialog);
        dialog.connect_recents(&this);
        dialog.connect_projects(&this, &select_dir_button);

        let weak = this.clone();
        select_file_button.connect_clicked(move |_| {
            let Some(dialog) = weak.upgrade() else {
                return;
            };
            let start = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            let entry = dialog.file_entry.clone();
            let load_button = dialog.load_file_button.clone();
            choose_file(&dialog.window, &start, move |path| {
                entry.set_text(&path.to_string_lossy());
                load_button.grab_focus();
            });
        });

        let weak = this.clone();
        dialog.load_file_button.connect_clicked(move |_| {
            if let Some(dialog) = weak.upgrade() {
                let text = dialog.file_entry.text();
                dialog.load_file(Path::new(text.as_str()));
            }
        });

        let weak = this.clone();
        about_button.connect_clicked(move |_| {
            if let Some(dialog) = weak.upgrade() {
                create_about_dialog(&dialog.window).present();
            }
        });

        let weak = this;
        cancel_button.connect_clicked(move |_| {
            if let Some(dialog) = weak.upgrade() {
                dialog.window.close();
            }
        });

        // The window owns the dialog until it is closed
        let keep_alive = RefCell::new(Some(dialog.clone()));
        dialog.window.connect_close_request(move |_| {
            keep_alive.borrow_mut().take();
            glib::Propagation::Proceed
        });

        dialog
    }

    pub fn present(&self) {
        self.window.present();
    }

    /// Reconciles and lists recent files.
    fn fill_recent_files(&self) {
        let items: Vec<_> = self
            .launcher
            .borrow()
            .recent_items()
            .into_iter()
            .map(|(_, item)| item)
            .collect();
        *self.recent_ids.borrow_mut() = fill_list_box(&self.recents_list, &items);
    }

    fn fill_projects(&self) -> usize {
        let launcher = self.launcher.borrow();
        self.projects_dir_entry.set_text(&launcher.projects_dir());
        let items: Vec<_> = launcher
            .project_items()
            .into_iter()
            .map(|(_, item)| item)
            .collect();
        *self.project_ids.borrow_mut() = fill_list_box(&self.projects_list, &items);
        self.load_project_button
            .set_sensitive(self.projects_list.selected_row().is_some());
        items.len()
    }

    fn load_file(&self, path: &Path) {
        let result = self.launcher.borrow().load_file(path);
        match result {
            Ok(()) => self.window.close(),
            Err(LaunchError::NoFileSelected { path }) => {
                log::debug!("Refusing to load {}", path.display());
                show_error(
                    &self.window,
                    "No file selected",
                    "Select a new program or a previous one\nbefore continuing",
                );
            }
            Err(e) => {
                show_error(&self.window, "Cannot open file", &e);
            }
        }
    }

    fn load_project(&self, name: &str) {
        self.launcher.borrow().load_project(name);
        self.window.close();
    }

    fn selected_recent(&self) -> Option<(ListBoxRow, String)> {
        let row = self.recents_list.selected_row()?;
        let id = identifier_at(&self.recent_ids.borrow(), &row)?;
        Some((row, id))
    }

    fn remove_selected_recent(&self) {
        let Some((row, id)) = self.selected_recent() else {
            return;
        };
        self.launcher.borrow().remove_recent(Path::new(&id));
        if let Ok(index) = usize::try_from(row.index()) {
            let mut ids = self.recent_ids.borrow_mut();
            if index < ids.len() {
                ids.remove(index);
            }
        }
        self.recents_list.remove(&row);
        self.file_entry.set_text("");
    }

    fn clear_recents(&self) {
        self.launcher.borrow().clear_recents();
        clear_list_box(&self.recents_list);
        self.recent_ids.borrow_mut().clear();
        self.file_entry.set_text("");
    }

    fn connect_recents(&self, this: &Weak<Self>) {
        let weak = this.clone();
        self.recents_list.connect_row_selected(move |_, row| {
            let (Some(dialog), Some(row)) = (weak.upgrade(), row) else {
                return;
            };
            let id = identifier_at(&dialog.recent_ids.borrow(), row);
            if let Some(id) = id {
                dialog.file_entry.set_text(&id);
            }
        });

        let weak = this.clone();
        self.recents_list.connect_row_activated(move |_, row| {
            let Some(dialog) = weak.upgrade() else {
                return;
            };
            let id = identifier_at(&dialog.recent_ids.borrow(), row);
            if let Some(id) = id {
                dialog.load_file(Path::new(&id));
            }
        });

        // Context menu: remove one entry or clear the list
        let actions = gio::SimpleActionGroup::new();
        let remove_action = gio::SimpleAction::new("remove-item", None);
        let weak = this.clone();
        remove_action.connect_activate(move |_, _| {
            if let Some(dialog) = weak.upgrade() {
                dialog.remove_selected_recent();
            }
        });
        let clear_action = gio::SimpleAction::new("clear-all", None);
        let weak = this.clone();
        clear_action.connect_activate(move |_, _| {
            if let Some(dialog) = weak.upgrade() {
                dialog.clear_recents();
            }
        });
        actions.add_action(&remove_action);
        actions.add_action(&clear_action);
        self.window.insert_action_group("recents", Some(&actions));

        let menu = gio::Menu::new();
        menu.append(Some("Remove item"), Some("recents.remove-item"));
        menu.append(Some("Clear all"), Some("recents.clear-all"));
        let popover = PopoverMenu::from_model(Some(&menu));
        popover.set_parent(&self.recents_list);
        popover.set_has_arrow(false);

        let gesture = GestureClick::new();
        gesture.set_button(gtk4::gdk::BUTTON_SECONDARY);
        let list = self.recents_list.clone();
        gesture.connect_pressed(move |_, _, x, y| {
            if let Some(row) = list.row_at_y(y as i32) {
                list.select_row(Some(&row));
            }
            popover.set_pointing_to(Some(&gtk4::gdk::Rectangle::new(x as i32, y as i32, 1, 1)));
            popover.popup();
        });
        self.recents_list.add_controller(gesture);
    }

    fn connect_projects(&self, this: &Weak<Self>, select_dir_button: &Button) {
        let button = self.load_project_button.clone();
        self.projects_list.connect_row_selected(move |_, row| {
            button.set_sensitive(row.is_some());
        });

        let weak = this.clone();
        self.projects_list.connect_row_activated(move |_, row| {
            let Some(dialog) = weak.upgrade() else {
                return;
            };
            let id = identifier_at(&dialog.project_ids.borrow(), row);
            if let Some(id) = id {
                dialog.load_project(&id);
            }
        });

        let weak = this.clone();
        self.load_project_button.connect_clicked(move |_| {
            let Some(dialog) = weak.upgrade() else {
                return;
            };
            let id = dialog
                .projects_list
                .selected_row()
                .and_then(|row| identifier_at(&dialog.project_ids.borrow(), &row));
            if let Some(id) = id {
                dialog.load_project(&id);
            }
        });

        let this = this.clone();
        select_dir_button.connect_clicked(move |_| {
            let Some(dialog) = this.upgrade() else {
                return;
            };
            let start = dialog.launcher.borrow().projects_dir_on_disk();
            let weak = Rc::downgrade(&dialog);
            choose_folder(
                &dialog.window,
                "Select project path (dir.projects)",
                &start,
                move |dir| {
                    if let Some(dialog) = weak.upgrade() {
                        let changed = dialog
                            .launcher
                            .borrow_mut()
                            .set_projects_dir(&dir.to_string_lossy());
                        if changed {
                            dialog.fill_projects();
                        }
                    }
                },
            );
        });
    }
}
