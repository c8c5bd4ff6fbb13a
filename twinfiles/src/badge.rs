//! Application badge for per-app storage folders.
//!
//! Children of an `Android/data` or `Android/obb` directory are named
//! after application identifiers. After each relist we check whether a
//! matching desktop entry is installed and flag the row so it can be
//! drawn with a badge. Every lookup failure is swallowed; a folder
//! without a badge is never an error.

use std::path::{Path, PathBuf};

use crate::entry::Entry;
use crate::pathutil;

/// True when `path`'s parent is an app-storage container, making the
/// entry itself a per-app folder.
pub fn is_app_storage_child(path: &Path) -> bool {
    let Some(parent) = path.parent() else {
        return false;
    };
    let cleaned = pathutil::strip_zero_width(&parent.to_string_lossy()).to_lowercase();
    cleaned.ends_with("android/data") || cleaned.ends_with("android/obb")
}

/// Directories scanned for installed-application entries.
fn application_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from("/usr/share/applications")];
    if let Some(base) = directories::BaseDirs::new() {
        dirs.push(base.data_dir().join("applications"));
    }
    dirs
}

fn desktop_entry_exists(dirs: &[PathBuf], app_id: &str) -> bool {
    let file = format!("{app_id}.desktop");
    dirs.iter().any(|dir| dir.join(&file).is_file())
}

fn annotate_with_dirs(entries: &mut [Entry], dirs: &[PathBuf]) {
    for entry in entries.iter_mut() {
        if entry.is_parent || !entry.is_dir || !is_app_storage_child(&entry.path) {
            continue;
        }
        entry.app_badge = desktop_entry_exists(dirs, &entry.name);
    }
}

/// Flag listing entries that correspond to installed applications.
/// Runs once per relist, not per frame.
pub fn annotate(entries: &mut [Entry]) {
    annotate_with_dirs(entries, &application_dirs());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn dir_entry(path: &Path) -> Entry {
        Entry {
            path: path.to_path_buf(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            is_parent: false,
            is_dir: true,
            newly_created: false,
            modified: String::new(),
            app_badge: false,
        }
    }

    #[test]
    fn detects_app_storage_children_case_insensitively() {
        assert!(is_app_storage_child(Path::new(
            "/storage/Android/data/com.example.app"
        )));
        assert!(is_app_storage_child(Path::new(
            "/storage/android/OBB/com.example.game"
        )));
        assert!(!is_app_storage_child(Path::new(
            "/storage/Android/media/com.example.app"
        )));
        assert!(!is_app_storage_child(Path::new("/storage/Android/data")));
    }

    #[test]
    fn marker_characters_do_not_defeat_detection() {
        let marked = format!("/storage/Android\u{200B}/data/com.example.app");
        assert!(is_app_storage_child(Path::new(&marked)));
    }

    #[test]
    fn annotates_only_installed_apps() {
        let tmp = tempfile::tempdir().unwrap();
        let apps = tmp.path().join("applications");
        fs::create_dir(&apps).unwrap();
        fs::write(apps.join("com.example.app.desktop"), b"[Desktop Entry]").unwrap();

        let data = Path::new("/storage/Android/data");
        let mut entries = vec![
            dir_entry(&data.join("com.example.app")),
            dir_entry(&data.join("com.example.missing")),
            dir_entry(Path::new("/storage/Documents")),
        ];
        annotate_with_dirs(&mut entries, &[apps]);

        assert!(entries[0].app_badge);
        assert!(!entries[1].app_badge);
        assert!(!entries[2].app_badge);
    }

    #[test]
    fn missing_lookup_dirs_are_harmless() {
        let data = Path::new("/storage/Android/data");
        let mut entries = vec![dir_entry(&data.join("com.example.app"))];
        annotate_with_dirs(&mut entries, &[PathBuf::from("/nonexistent/applications")]);
        assert!(!entries[0].app_badge);
    }
}
