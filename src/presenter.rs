//! Presentation of list rows
//!
//! Everything here is a pure function of its inputs: the same name at the same
//! position always renders with the same color and glyph.

use crate::projects::ProjectEntry;
use crate::recent::RecentEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `0.0..=1.0`, as cairo wants them.
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

pub const PALETTE: [Rgb; 6] = [
    Rgb::new(29, 188, 156),  // turquoise
    Rgb::new(52, 152, 219),  // blue
    Rgb::new(155, 89, 182),  // violet
    Rgb::new(52, 73, 94),    // grey
    Rgb::new(231, 76, 60),   // red
    Rgb::new(243, 156, 17),  // orange
];

const BYTE_SUFFIXES: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

/// A row ready to be shown. `identifier` is handed back on activation.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub label: String,
    pub glyph: String,
    pub color: Rgb,
    pub identifier: String,
}

impl DisplayItem {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }
}

/// Palette color for the row at `index`.
pub fn color_for(_name: &str, index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

/// First two characters of the uppercased name.
pub fn glyph_for(name: &str) -> String {
    name.to_uppercase().chars().take(2).collect()
}

pub fn present(name: &str, index: usize) -> DisplayItem {
    DisplayItem {
        label: name.to_string(),
        glyph: glyph_for(name),
        color: color_for(name, index),
        identifier: name.to_string(),
    }
}

/// Human readable size with three significant digits, in powers of 1000.
pub fn format_bytecount(bytes: u64) -> String {
    if bytes < 1000 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut exp = 0;
    while value >= 1000.0 && exp < BYTE_SUFFIXES.len() - 1 {
        value /= 1000.0;
        exp += 1;
    }

    let mut text = three_significant(value);
    // 999.6 kB rounds to "1000"
    if text == "1000" && exp < BYTE_SUFFIXES.len() - 1 {
        value /= 1000.0;
        exp += 1;
        text = three_significant(value);
    }
    format!("{} {}", text, BYTE_SUFFIXES[exp])
}

fn three_significant(value: f64) -> String {
    if value >= 99.95 {
        format!("{:.0}", value)
    } else if value >= 9.995 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Path, creation time and size, one per line.
pub fn recent_file_label(entry: &RecentEntry) -> String {
    let created = entry
        .created
        .map(|t| t.format("%a %b %-d %H:%M:%S %Y").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "{}\nCreated: {}\nSize: {}",
        entry.path.display(),
        created,
        format_bytecount(entry.size)
    )
}

pub fn project_label(project: &ProjectEntry) -> String {
    format!("{}\n{}", project.name, project.summary)
}

/// Recent-file row: glyph from the file name, identifier is the full path.
pub fn present_recent(entry: &RecentEntry, index: usize) -> DisplayItem {
    present(&entry.name(), index)
        .with_label(recent_file_label(entry))
        .with_identifier(entry.path.to_string_lossy())
}

pub fn present_project(project: &ProjectEntry, index: usize) -> DisplayItem {
    present(&project.name, index).with_label(project_label(project))
}
