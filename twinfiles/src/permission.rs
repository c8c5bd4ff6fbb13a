//! Storage access gate shown before the panes become interactive.

use std::path::{Path, PathBuf};

/// Tracks whether the browsing root is readable and what the user chose
/// when it was not. Probed every frame while the prompt is up so an
/// external grant is picked up without restarting.
#[derive(Debug)]
pub struct PermissionGate {
    root: PathBuf,
    granted: bool,
    declined: bool,
}

impl PermissionGate {
    pub fn new(root: &Path) -> Self {
        let mut gate = Self {
            root: root.to_path_buf(),
            granted: false,
            declined: false,
        };
        gate.probe();
        gate
    }

    /// Re-check readability of the root. Returns true on a fresh grant.
    pub fn probe(&mut self) -> bool {
        if self.granted {
            return false;
        }
        if std::fs::read_dir(&self.root).is_ok() {
            self.granted = true;
            log::info!("storage access granted for {}", self.root.display());
            return true;
        }
        false
    }

    /// User chose to browse without access. The prompt goes away; reads
    /// will keep failing until access arrives externally.
    pub fn decline(&mut self) {
        self.declined = true;
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }

    /// Whether the blocking prompt should be shown this frame.
    pub fn prompting(&self) -> bool {
        !self.granted && !self.declined
    }

    /// Best-effort reveal of the browse root in the system file manager,
    /// where access can be granted.
    pub fn open_settings(&self) {
        if let Err(e) = open::that_detached(&self.root) {
            log::warn!("could not open {}: {e}", self.root.display());
        }
    }
}
