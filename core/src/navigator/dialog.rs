//! Modal text-prompt flow for creating files and directories.
//!
//! The dialog is opened from the background context menu with its target
//! kind fixed. While hidden, accept and decline are no-ops. An empty
//! accept is treated as a cancel, not a validation error: the dialog
//! closes and no request is produced.

use tracing::debug;

/// What the create dialog will create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateKind {
    File,
    Directory,
}

/// Create-dialog state.
#[derive(Debug, Default)]
pub struct CreateDialogController {
    visible: bool,
    kind: Option<CreateKind>,
}

impl CreateDialogController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn kind(&self) -> Option<CreateKind> {
        self.kind
    }

    /// Show the dialog for the given kind.
    pub fn open(&mut self, kind: CreateKind) {
        self.visible = true;
        self.kind = Some(kind);
    }

    /// Accept with the entered text. Returns the create request to issue,
    /// or `None` when the dialog was hidden or the text was empty (the
    /// dialog closes in either accepted or empty case).
    pub fn accept(&mut self, text: &str) -> Option<(CreateKind, String)> {
        if !self.visible {
            return None;
        }
        let kind = self.kind.take()?;
        self.visible = false;

        if text.is_empty() {
            debug!("create dialog accepted with empty input, treated as cancel");
            return None;
        }
        Some((kind, text.to_string()))
    }

    /// Close without a request.
    pub fn decline(&mut self) {
        self.visible = false;
        self.kind = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_fixes_kind_and_shows() {
        let mut dialog = CreateDialogController::new();
        dialog.open(CreateKind::Directory);
        assert!(dialog.is_visible());
        assert_eq!(dialog.kind(), Some(CreateKind::Directory));
    }

    #[test]
    fn accept_returns_kind_and_text_then_closes() {
        let mut dialog = CreateDialogController::new();
        dialog.open(CreateKind::File);

        let request = dialog.accept("notes.txt");
        assert_eq!(request, Some((CreateKind::File, "notes.txt".to_string())));
        assert!(!dialog.is_visible());
    }

    #[test]
    fn accept_while_hidden_is_noop() {
        let mut dialog = CreateDialogController::new();
        assert_eq!(dialog.accept("notes.txt"), None);
    }

    #[test]
    fn empty_accept_closes_without_request() {
        let mut dialog = CreateDialogController::new();
        dialog.open(CreateKind::Directory);

        assert_eq!(dialog.accept(""), None);
        assert!(!dialog.is_visible());
        // A later accept stays a no-op; the handlers were dropped with
        // the dialog.
        assert_eq!(dialog.accept("reports"), None);
    }

    #[test]
    fn decline_closes_without_request() {
        let mut dialog = CreateDialogController::new();
        dialog.open(CreateKind::File);
        dialog.decline();
        assert!(!dialog.is_visible());
        assert_eq!(dialog.kind(), None);
    }
}
