//! Recently opened files
//!
//! The list lives in the settings file, most recent first. Every mutation is a
//! pure transformation of a snapshot; `RecentFiles::commit` is the only place
//! that writes the result back.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::settings::SettingsStore;

/// A recent file that still exists on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentEntry {
    pub path: PathBuf,
    pub size: u64,
    pub created: Option<DateTime<Local>>,
}

impl RecentEntry {
    /// Returns `None` when the file is gone.
    pub fn from_path(path: &Path) -> Option<Self> {
        let metadata = fs::metadata(path).ok()?;
        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .ok()
            .map(DateTime::<Local>::from);
        Some(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
            created,
        })
    }

    /// File name component, falling back to the whole path.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

/// Drops paths whose file no longer exists, keeping the order of the rest.
pub fn prune_missing(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().filter(|p| p.exists()).cloned().collect()
}

/// Moves `opened` to the front and evicts from the tail beyond `max`.
pub fn record_opened(paths: &[PathBuf], opened: &Path, max: usize) -> Vec<PathBuf> {
    let mut files = Vec::with_capacity(paths.len() + 1);
    files.push(opened.to_path_buf());
    files.extend(paths.iter().filter(|p| p.as_path() != opened).cloned());
    files.truncate(max.max(1));
    files
}

pub fn remove_one(paths: &[PathBuf], target: &Path) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| p.as_path() != target)
        .cloned()
        .collect()
}

/// Recent-file operations backed by the settings file.
#[derive(Debug, Clone)]
pub struct RecentFiles {
    store: SettingsStore,
}

impl RecentFiles {
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn paths(&self) -> Vec<PathBuf> {
        self.store.load().recent_file_list
    }

    /// Prunes missing files, caps the list, persists the result and returns
    /// the survivors.
    pub fn reconcile(&self) -> Vec<RecentEntry> {
        let settings = self.store.load();
        let mut files = prune_missing(&settings.recent_file_list);
        let dropped = settings.recent_file_list.len() - files.len();
        if dropped > 0 {
            log::debug!("Dropping {} missing recent files", dropped);
        }
        files.truncate(settings.max_recent_files.max(1));

        let entries: Vec<RecentEntry> = files
            .iter()
            .filter_map(|p| RecentEntry::from_path(p))
            .collect();
        let survivors: Vec<PathBuf> = entries.iter().map(|e| e.path.clone()).collect();
        self.commit(survivors);
        entries
    }

    pub fn record_opened(&self, opened: &Path) -> Vec<PathBuf> {
        let settings = self.store.load();
        let files = record_opened(&settings.recent_file_list, opened, settings.max_recent_files);
        self.commit(files)
    }

    pub fn remove(&self, target: &Path) -> Vec<PathBuf> {
        let files = remove_one(&self.store.load().recent_file_list, target);
        self.commit(files)
    }

    pub fn clear(&self) {
        self.commit(Vec::new());
    }

    /// Best-effort write of the whole list.
    fn commit(&self, files: Vec<PathBuf>) -> Vec<PathBuf> {
        let mut settings = self.store.load();
        if settings.recent_file_list == files {
            return files;
        }
        settings.recent_file_list = files.clone();
        if let Err(e) = self.store.save(&settings) {
            log::warn!("Could not persist recent files: {}", e);
        }
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppSettings;
    use tempfile::TempDir;

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    fn fixture(files: &[&str]) -> (TempDir, RecentFiles) {
        let dir = TempDir::new().unwrap();
        for name in files {
            fs::write(dir.path().join(name), b"\x7fELF").unwrap();
        }
        let store = SettingsStore::new(dir.path().join("settings.json"));
        (dir, RecentFiles::new(store))
    }

    fn persist(recent: &RecentFiles, files: Vec<PathBuf>) {
        let settings = AppSettings {
            recent_file_list: files,
            ..AppSettings::default()
        };
        recent.store().save(&settings).unwrap();
    }

    #[test]
    fn record_opened_already_front_is_unchanged() {
        let files = record_opened(&paths(&["/x", "/y"]), Path::new("/x"), 5);
        assert_eq!(files, paths(&["/x", "/y"]));
    }

    #[test]
    fn record_opened_moves_to_front_without_duplicates() {
        let files = record_opened(&paths(&["/a", "/b", "/c"]), Path::new("/c"), 5);
        assert_eq!(files, paths(&["/c", "/a", "/b"]));
        assert_eq!(files.iter().filter(|p| *p == Path::new("/c")).count(), 1);
    }

    #[test]
    fn record_opened_respects_capacity() {
        let start = paths(&["/1", "/2", "/3", "/4", "/5"]);
        for max in 1..=6 {
            let files = record_opened(&start, Path::new("/new"), max);
            assert!(files.len() <= max);
            assert_eq!(files[0], PathBuf::from("/new"));
        }
        let files = record_opened(&start, Path::new("/new"), 5);
        assert_eq!(files, paths(&["/new", "/1", "/2", "/3", "/4"]));
    }

    #[test]
    fn record_opened_zero_capacity_keeps_one() {
        let files = record_opened(&paths(&["/a"]), Path::new("/b"), 0);
        assert_eq!(files, paths(&["/b"]));
    }

    #[test]
    fn remove_one_absent_target_is_noop() {
        let files = remove_one(&paths(&["/a", "/b"]), Path::new("/z"));
        assert_eq!(files, paths(&["/a", "/b"]));
        let files = remove_one(&paths(&["/a", "/b"]), Path::new("/a"));
        assert_eq!(files, paths(&["/b"]));
    }

    #[test]
    fn prune_missing_is_idempotent() {
        let (dir, _) = fixture(&["b.bin", "d.bin"]);
        let list = vec![
            dir.path().join("a.bin"),
            dir.path().join("b.bin"),
            dir.path().join("c.bin"),
            dir.path().join("d.bin"),
        ];
        let once = prune_missing(&list);
        assert_eq!(once, vec![dir.path().join("b.bin"), dir.path().join("d.bin")]);
        assert_eq!(prune_missing(&once), once);
    }

    #[test]
    fn reconcile_drops_missing_and_updates_store() {
        let (dir, recent) = fixture(&["b.bin"]);
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        persist(&recent, vec![a, b.clone()]);

        let entries = recent.reconcile();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, b);
        assert_eq!(entries[0].size, 4);
        assert_eq!(entries[0].name(), "b.bin");
        assert_eq!(recent.paths(), vec![b]);
    }

    #[test]
    fn reconcile_twice_is_stable() {
        let (dir, recent) = fixture(&["b.bin", "c.bin"]);
        persist(
            &recent,
            vec![
                dir.path().join("c.bin"),
                dir.path().join("gone.bin"),
                dir.path().join("b.bin"),
            ],
        );
        let first: Vec<PathBuf> = recent.reconcile().into_iter().map(|e| e.path).collect();
        let second: Vec<PathBuf> = recent.reconcile().into_iter().map(|e| e.path).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![dir.path().join("c.bin"), dir.path().join("b.bin")]);
    }

    #[test]
    fn reconcile_applies_lowered_capacity() {
        let (dir, recent) = fixture(&["1.bin", "2.bin", "3.bin", "4.bin"]);
        let files: Vec<PathBuf> = ["1.bin", "2.bin", "3.bin", "4.bin"]
            .iter()
            .map(|n| dir.path().join(n))
            .collect();
        let settings = AppSettings {
            recent_file_list: files.clone(),
            max_recent_files: 2,
            ..AppSettings::default()
        };
        recent.store().save(&settings).unwrap();

        let entries = recent.reconcile();
        assert_eq!(entries.len(), 2);
        assert_eq!(recent.paths(), files[..2].to_vec());
    }

    #[test]
    fn reconcile_caps_after_pruning() {
        let (dir, recent) = fixture(&["b.bin", "c.bin"]);
        let settings = AppSettings {
            recent_file_list: vec![
                dir.path().join("gone.bin"),
                dir.path().join("b.bin"),
                dir.path().join("c.bin"),
            ],
            max_recent_files: 2,
            ..AppSettings::default()
        };
        recent.store().save(&settings).unwrap();

        let paths: Vec<PathBuf> = recent.reconcile().into_iter().map(|e| e.path).collect();
        assert_eq!(paths, vec![dir.path().join("b.bin"), dir.path().join("c.bin")]);
    }

    #[test]
    fn record_remove_and_clear_persist() {
        let (dir, recent) = fixture(&["a.bin", "b.bin"]);
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");

        recent.record_opened(&a);
        recent.record_opened(&b);
        assert_eq!(recent.paths(), vec![b.clone(), a.clone()]);

        recent.remove(&b);
        assert_eq!(recent.paths(), vec![a]);

        recent.clear();
        assert!(recent.paths().is_empty());
    }

    #[test]
    fn commit_keeps_other_settings() {
        let (dir, recent) = fixture(&["a.bin"]);
        let settings = AppSettings {
            theme: "light".to_string(),
            max_recent_files: 2,
            ..AppSettings::default()
        };
        recent.store().save(&settings).unwrap();
        recent.record_opened(&dir.path().join("a.bin"));
        let reloaded = recent.store().load();
        assert_eq!(reloaded.theme, "light");
        assert_eq!(reloaded.max_recent_files, 2);
    }
}
