//! Transient context-menu state, rebuilt per right-click.
//!
//! Menu items carry a tagged [`MenuAction`] instead of callbacks; the
//! session dispatches every action through one handler. Two menus exist:
//! the entry menu (Delete/Rename) and the background menu (New
//! Directory/New File).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::files::{EntryKind, FileEntry};

/// Action bound to a context-menu item, dispatched by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Delete the named entry.
    Delete { name: String },
    /// Start inline-renaming the entry at `index` (name captured for
    /// stale-index detection at dispatch time).
    Rename { name: String, index: usize },
    /// Open the create dialog for a new file.
    NewFile,
    /// Open the create dialog for a new directory.
    NewDirectory,
}

/// Icon reference for a menu item; the frontend maps these to glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuIcon {
    Delete,
    Rename,
    NewFolder,
    NewFile,
}

/// One row of the context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub icon: MenuIcon,
    pub action: MenuAction,
}

/// Absolute pointer coordinates captured at click time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuPosition {
    pub x: f64,
    pub y: f64,
}

/// Context-menu state. Invariant: `open` is true only when `items` is
/// non-empty; both menus rebuild items and position from scratch.
#[derive(Debug, Default)]
pub struct ContextMenuController {
    open: bool,
    position: MenuPosition,
    items: Vec<MenuItem>,
    protected_index: Option<usize>,
}

impl ContextMenuController {
    pub fn new(protected_index: Option<usize>) -> Self {
        Self {
            protected_index,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn position(&self) -> MenuPosition {
        self.position
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Open the Delete/Rename menu for `entry`. Returns `false` when the
    /// gesture is ignored: entries of unknown kind get no menu, and a
    /// configured protected index suppresses the menu entirely, leaving
    /// the previous menu state untouched.
    pub fn open_for_entry(
        &mut self,
        entry: &FileEntry,
        index: usize,
        position: MenuPosition,
    ) -> bool {
        if self.protected_index == Some(index) {
            debug!(index, "context menu suppressed for protected entry");
            return false;
        }
        if entry.kind == EntryKind::Unknown {
            debug!(name = %entry.name, "no context menu for entry of unknown kind");
            return false;
        }

        self.items = vec![
            MenuItem {
                label: "Delete",
                icon: MenuIcon::Delete,
                action: MenuAction::Delete {
                    name: entry.name.clone(),
                },
            },
            MenuItem {
                label: "Rename",
                icon: MenuIcon::Rename,
                action: MenuAction::Rename {
                    name: entry.name.clone(),
                    index,
                },
            },
        ];
        self.position = position;
        self.open = true;
        true
    }

    /// Open the New Directory/New File menu for a background right-click.
    pub fn open_for_background(&mut self, position: MenuPosition) {
        self.items = vec![
            MenuItem {
                label: "New Directory",
                icon: MenuIcon::NewFolder,
                action: MenuAction::NewDirectory,
            },
            MenuItem {
                label: "New File",
                icon: MenuIcon::NewFile,
                action: MenuAction::NewFile,
            },
        ];
        self.position = position;
        self.open = true;
    }

    /// Close the menu (outside click, Escape, or an action being invoked).
    pub fn dismiss(&mut self) {
        self.open = false;
        self.items.clear();
    }
}
