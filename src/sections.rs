use serde::Deserialize;

use crate::error::EngineError;
use crate::presenter::format_bytecount;

/// One section as reported by radare2's `iSj`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub vsize: u64,
    #[serde(default)]
    pub paddr: u64,
    #[serde(default)]
    pub vaddr: u64,
    #[serde(default)]
    pub perm: String,
}

impl Section {
    /// Name, address, size and permissions, in column order.
    pub fn columns(&self) -> [String; 4] {
        [
            self.name.clone(),
            format!("0x{:08x}", self.vaddr),
            format_bytecount(self.vsize.max(self.size)),
            self.perm.clone(),
        ]
    }
}

pub const SECTION_COLUMNS: [&str; 4] = ["Name", "Address", "Size", "Perm"];

// Older radare2 releases wrap the list in an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum SectionsReply {
    List(Vec<Section>),
    Wrapped { sections: Vec<Section> },
}

pub fn parse_sections(json: &str) -> Result<Vec<Section>, EngineError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(match serde_json::from_str(json)? {
        SectionsReply::List(sections) => sections,
        SectionsReply::Wrapped { sections } => sections,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockLayout {
    Vertical,
    Horizontal,
}

impl DockLayout {
    /// Horizontal when the dock is wider than tall.
    pub fn for_size(width: i32, height: i32) -> Self {
        if width > height {
            DockLayout::Horizontal
        } else {
            DockLayout::Vertical
        }
    }
}
