//! Directory listing: the entry model and the synchronous fs layer.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::pathutil;

/// What can go wrong when listing or creating entries. Surfaced to the
/// user as a transient status notice, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("'{0}' already exists")]
    AlreadyExists(String),
    #[error("could not read directory: {0}")]
    Read(#[from] std::io::Error),
    #[error("creation failed: {0}")]
    Create(std::io::Error),
}

/// What kind of object to create from the add dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateKind {
    Folder,
    File,
}

/// One row of a pane listing. Immutable once listed; the whole vector
/// is replaced on relist.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub is_parent: bool,
    pub is_dir: bool,
    /// Set on the entry just created from the add dialog; cleared by
    /// the next relist.
    pub newly_created: bool,
    /// Pre-formatted modification time; empty for the parent row.
    pub modified: String,
    /// Folder belongs to an installed application (best-effort lookup).
    pub app_badge: bool,
}

impl Entry {
    fn parent_of(dir: &Path) -> Self {
        Self {
            path: dir.to_path_buf(),
            name: "..".to_string(),
            is_parent: true,
            is_dir: true,
            newly_created: false,
            modified: String::new(),
            app_badge: false,
        }
    }
}

/// A fresh listing plus its folder/file counts.
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<Entry>,
    pub folders: usize,
    pub files: usize,
}

fn format_time(t: std::time::SystemTime) -> String {
    let dt: DateTime<Local> = t.into();
    dt.format("%y-%m-%d %H:%M").to_string()
}

/// List a directory: folders first, then files, each alphabetical by
/// lowercased name. Index 0 is the synthetic ".." entry unless `dir` is
/// the filesystem root. Hidden (dot-prefixed) entries are skipped unless
/// `show_hidden`; the folder/file counts ignore the filter.
pub fn list_dir(dir: &Path, show_hidden: bool) -> Result<Listing, FsError> {
    let access = pathutil::resolve(&dir.to_string_lossy());

    let mut dirs: Vec<Entry> = Vec::new();
    let mut files: Vec<Entry> = Vec::new();
    let mut folder_count = 0;
    let mut file_count = 0;

    for item in std::fs::read_dir(&access)? {
        let item = match item {
            Ok(i) => i,
            Err(e) => {
                log::debug!("skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let name = item.file_name().to_string_lossy().to_string();
        let is_dir = item.file_type().map(|t| t.is_dir()).unwrap_or(false);

        if is_dir {
            folder_count += 1;
        } else {
            file_count += 1;
        }
        if !show_hidden && name.starts_with('.') {
            continue;
        }

        let modified = item
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .map(format_time)
            .unwrap_or_default();

        let entry = Entry {
            path: item.path(),
            name,
            is_parent: false,
            is_dir,
            newly_created: false,
            modified,
            app_badge: false,
        };
        if is_dir {
            dirs.push(entry);
        } else {
            files.push(entry);
        }
    }

    dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if dir.parent().is_some() {
        entries.push(Entry::parent_of(dir));
    }
    entries.extend(dirs);
    entries.extend(files);

    Ok(Listing {
        entries,
        folders: folder_count,
        files: file_count,
    })
}

/// Create a file or folder under `dir`. A single synchronous attempt;
/// duplicates are reported before touching the filesystem.
pub fn create_entry(dir: &Path, name: &str, kind: CreateKind) -> Result<PathBuf, FsError> {
    let target = dir.join(name);
    if target.exists() {
        return Err(FsError::AlreadyExists(name.to_string()));
    }
    let result = match kind {
        CreateKind::Folder => std::fs::create_dir(&target),
        CreateKind::File => std::fs::File::create(&target).map(|_| ()),
    };
    result.map_err(FsError::Create)?;
    log::info!("created {} {}", kind_label(kind), target.display());
    Ok(target)
}

fn kind_label(kind: CreateKind) -> &'static str {
    match kind {
        CreateKind::Folder => "folder",
        CreateKind::File => "file",
    }
}

/// Flag the listing entry with this name as newly created. Returns its
/// index when found.
pub fn mark_newly_created(entries: &mut [Entry], name: &str) -> Option<usize> {
    let index = entries.iter().position(|e| !e.is_parent && e.name == name)?;
    entries[index].newly_created = true;
    Some(index)
}
