use gtk4::prelude::*;
use gtk4::{ListBox, ListBoxRow};

use crate::presenter::DisplayItem;
use crate::ui::components::create_item_row;

/// Removes every row of a list box.
pub fn clear_list_box(list: &ListBox) {
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }
}

/// Replaces the rows of `list` and returns the identifiers in row order.
pub fn fill_list_box(list: &ListBox, items: &[DisplayItem]) -> Vec<String> {
    clear_list_box(list);
    items
        .iter()
        .map(|item| {
            list.append(&create_item_row(item));
            item.identifier.clone()
        })
        .collect()
}

/// Identifier carried by `row`, looked up by its position.
pub fn identifier_at(identifiers: &[String], row: &ListBoxRow) -> Option<String> {
    usize::try_from(row.index())
        .ok()
        .and_then(|i| identifiers.get(i))
        .cloned()
}
