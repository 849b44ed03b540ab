//! Composition root binding the controllers to the remote backend.
//!
//! One `NavigatorSession` exists per connected backend. Every gesture
//! handler takes `&mut self`, so gestures cannot interleave; the
//! [`OperationGate`] additionally guards the in-flight request window
//! across await points and feeds the frontend's input-blocking overlay
//! through [`SessionSink::lock_changed`].
//!
//! Mutating requests and the listing refresh that follows them run
//! inside a single gate acquisition, so mutations are totally ordered
//! and a trailing refresh can never race a later mutation. The
//! activation-time refresh goes through the same gate.

use tracing::{debug, error, info, warn};

use crate::config::NavigatorConfig;
use crate::errors::GateError;
use crate::files::{EntryKind, RemoteFileService};
use crate::navigator::dialog::{CreateDialogController, CreateKind};
use crate::navigator::events::{Notice, SessionSink};
use crate::navigator::gate::OperationGate;
use crate::navigator::listing::ListingStore;
use crate::navigator::menu::{ContextMenuController, MenuAction, MenuPosition};
use crate::navigator::rename::{RenameController, RenameState};

/// Session controller for one connected remote backend.
///
/// `S` is the backend, `E` the outward event surface; both are injected
/// and monomorphize at compile time.
pub struct NavigatorSession<S, E> {
    service: S,
    sink: E,
    gate: OperationGate,
    listing: ListingStore,
    menu: ContextMenuController,
    rename: RenameController,
    dialog: CreateDialogController,
    active: bool,
}

impl<S, E> NavigatorSession<S, E>
where
    S: RemoteFileService,
    E: SessionSink,
{
    pub fn new(service: S, sink: E, config: NavigatorConfig) -> Self {
        Self {
            gate: OperationGate::new(config.request_timeout()),
            menu: ContextMenuController::new(config.protected_index),
            listing: ListingStore::new(),
            rename: RenameController::new(),
            dialog: CreateDialogController::new(),
            service,
            sink,
            active: false,
        }
    }

    // --- State read by the frontend ---

    pub fn listing(&self) -> &ListingStore {
        &self.listing
    }

    pub fn menu(&self) -> &ContextMenuController {
        &self.menu
    }

    pub fn dialog(&self) -> &CreateDialogController {
        &self.dialog
    }

    pub fn rename_state(&self) -> RenameState {
        self.rename.state()
    }

    /// Whether the listing view must currently block input.
    pub fn is_locked(&self) -> bool {
        self.gate.is_busy()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // --- Lifecycle ---

    /// Begin the session: the embedder installs its session-scoped
    /// listeners (outside-click dismiss, default-menu suppression)
    /// around this call, and the initial listing loads through the gate.
    pub async fn activate(&mut self) {
        if self.active {
            debug!("session already active");
            return;
        }
        self.active = true;
        info!("navigator session activated");
        self.refresh().await;
    }

    /// End gesture processing and drop all transient state. The embedder
    /// removes its listeners around this call.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.reset_transient_state();
        self.active = false;
        info!("navigator session deactivated");
    }

    /// Disconnect from the backend and end the session.
    ///
    /// The outward session-ended signal fires exactly once per
    /// disconnect action even when the backend reports a failure: local
    /// teardown must not get stuck behind a broken connection.
    pub async fn disconnect(&mut self) {
        if !self.active {
            debug!("disconnect on inactive session ignored");
            return;
        }
        info!("disconnecting navigator session");
        if let Err(err) = self.service.disconnect().await {
            warn!(%err, "backend disconnect failed, ending session anyway");
        }
        self.reset_transient_state();
        self.active = false;
        self.sink.session_ended();
    }

    // --- Listing ---

    /// Reload the current directory's entries through the gate. On
    /// failure the listing keeps its previous contents and a passive
    /// notice is emitted.
    pub async fn refresh(&mut self) {
        if !self.active {
            return;
        }
        if self.gate.is_busy() {
            debug!("refresh skipped, gate busy");
            return;
        }
        self.sink.lock_changed(true);
        let outcome = self.gate.run(self.service.list()).await;
        self.sink.lock_changed(false);
        match outcome {
            Ok(entries) => self.listing.replace(entries),
            Err(GateError::Busy) => debug!("refresh not issued, gate busy"),
            Err(err) => {
                error!(%err, "listing refresh failed");
                self.sink.notice(Notice::RefreshFailed {
                    message: err.to_string(),
                });
            }
        }
    }

    /// Primary click on the entry at `index`: directories are entered,
    /// files are downloaded and opened, entries of unknown kind do
    /// nothing.
    pub async fn open_entry(&mut self, index: usize) {
        if !self.active {
            return;
        }
        let (name, kind) = match self.listing.get(index) {
            Some(entry) => (entry.name.clone(), entry.kind),
            None => {
                debug!(index, "click on stale listing index ignored");
                return;
            }
        };
        match kind {
            EntryKind::Directory => self.navigate_into(name).await,
            EntryKind::File => self.download(name).await,
            EntryKind::Unknown => {
                debug!(name = %name, "entry of unknown kind has no click behavior")
            }
        }
    }

    async fn navigate_into(&mut self, name: String) {
        if self.gate.is_busy() {
            debug!(name = %name, "navigation dropped, gate busy");
            return;
        }
        self.sink.lock_changed(true);
        let outcome = self
            .gate
            .run(async {
                self.service.change_directory(&name).await?;
                self.service.list().await
            })
            .await;
        self.sink.lock_changed(false);
        match outcome {
            Ok(entries) => self.listing.replace(entries),
            Err(GateError::Busy) => debug!("navigation not issued, gate busy"),
            Err(err) => {
                warn!(%err, name = %name, "failed to open directory");
                self.sink.notice(Notice::OperationFailed {
                    action: "open directory",
                    message: err.to_string(),
                });
            }
        }
    }

    async fn download(&mut self, name: String) {
        if self.gate.is_busy() {
            debug!(name = %name, "download dropped, gate busy");
            return;
        }
        self.sink.lock_changed(true);
        let outcome = self.gate.run(self.service.download(&name, true)).await;
        self.sink.lock_changed(false);
        match outcome {
            Ok(()) => debug!(name = %name, "download finished"),
            Err(GateError::Busy) => debug!("download not issued, gate busy"),
            Err(err) => {
                warn!(%err, name = %name, "download failed");
                self.sink.notice(Notice::OperationFailed {
                    action: "download",
                    message: err.to_string(),
                });
            }
        }
    }

    // --- Context menus ---

    /// Right-click on the entry at `index`. The event must not fall
    /// through to the background handler; the embedder stops propagation
    /// and suppresses the platform menu.
    pub fn entry_context_menu(&mut self, index: usize, position: MenuPosition) {
        if !self.active {
            return;
        }
        self.cancel_rename();
        let Some(entry) = self.listing.get(index) else {
            debug!(index, "right-click on stale listing index ignored");
            return;
        };
        self.menu.open_for_entry(entry, index, position);
    }

    /// Right-click on the listing background.
    pub fn background_context_menu(&mut self, position: MenuPosition) {
        if !self.active {
            return;
        }
        self.cancel_rename();
        self.menu.open_for_background(position);
    }

    /// Dispatch a menu item's action. The menu closes immediately; a
    /// stale action replayed after dismissal is ignored.
    pub async fn invoke_menu_action(&mut self, action: MenuAction) {
        if !self.active {
            return;
        }
        if !self.menu.is_open() {
            debug!("menu action after dismissal ignored");
            return;
        }
        self.menu.dismiss();
        match action {
            MenuAction::Delete { name } => self.delete_entry(name).await,
            MenuAction::Rename { name, index } => self.begin_rename(name, index),
            MenuAction::NewFile => self.dialog.open(CreateKind::File),
            MenuAction::NewDirectory => self.dialog.open(CreateKind::Directory),
        }
    }

    async fn delete_entry(&mut self, name: String) {
        if self.gate.is_busy() {
            debug!(name = %name, "delete dropped, gate busy");
            return;
        }
        self.sink.lock_changed(true);
        let outcome = self
            .gate
            .run(async {
                self.service.delete(&name).await?;
                self.service.list().await
            })
            .await;
        self.sink.lock_changed(false);
        match outcome {
            Ok(entries) => self.listing.replace(entries),
            Err(GateError::Busy) => debug!("delete not issued, gate busy"),
            Err(err) => {
                warn!(%err, name = %name, "delete failed");
                self.sink.notice(Notice::OperationFailed {
                    action: "delete",
                    message: err.to_string(),
                });
            }
        }
    }

    // --- Inline rename ---

    fn begin_rename(&mut self, name: String, index: usize) {
        let still_there = self
            .listing
            .get(index)
            .is_some_and(|entry| entry.name == name);
        if !still_there {
            debug!(index, name = %name, "rename target no longer at captured index");
            return;
        }
        self.listing.set_editing(index);
        self.rename.begin(index);
    }

    /// Enter pressed in the edit field: issue the rename and refresh
    /// whatever the outcome. The edit flags clear before the response is
    /// known.
    pub async fn commit_rename(&mut self, new_name: &str) {
        if !self.active {
            return;
        }
        let Some(index) = self.rename.take_commit() else {
            debug!("rename commit with no entry in editing mode");
            return;
        };
        self.listing.clear_editing();
        let Some(old) = self.listing.get(index).map(|entry| entry.name.clone()) else {
            debug!(index, "rename commit against stale listing index ignored");
            return;
        };
        if self.gate.is_busy() {
            debug!(old = %old, "rename dropped, gate busy");
            return;
        }
        self.sink.lock_changed(true);
        let outcome = self
            .gate
            .run(async {
                let renamed = self.service.rename(&old, new_name).await;
                let entries = self.service.list().await?;
                Ok((renamed, entries))
            })
            .await;
        self.sink.lock_changed(false);
        match outcome {
            Ok((renamed, entries)) => {
                // The listing refreshes even when the rename itself
                // failed; the failure is still reported.
                self.listing.replace(entries);
                if let Err(err) = renamed {
                    warn!(%err, old = %old, new = %new_name, "rename failed");
                    self.sink.notice(Notice::OperationFailed {
                        action: "rename",
                        message: err.to_string(),
                    });
                }
            }
            Err(GateError::Busy) => debug!("rename not issued, gate busy"),
            Err(err) => {
                warn!(%err, old = %old, "rename failed");
                self.sink.notice(Notice::OperationFailed {
                    action: "rename",
                    message: err.to_string(),
                });
            }
        }
    }

    /// Escape in the edit field: leave editing without a request.
    pub fn cancel_rename(&mut self) {
        if self.rename.is_editing() {
            debug!("inline rename cancelled");
        }
        self.rename.cancel();
        self.listing.clear_editing();
    }

    // --- Create dialog ---

    /// Dialog accepted with `text`. Empty input closes the dialog as a
    /// cancel; the gate is never touched for it.
    pub async fn accept_create(&mut self, text: &str) {
        if !self.active {
            return;
        }
        let Some((kind, name)) = self.dialog.accept(text) else {
            return;
        };
        let action = match kind {
            CreateKind::Directory => "create directory",
            CreateKind::File => "create file",
        };
        if self.gate.is_busy() {
            debug!(action, name = %name, "create dropped, gate busy");
            return;
        }
        self.sink.lock_changed(true);
        let outcome = self
            .gate
            .run(async {
                match kind {
                    CreateKind::Directory => self.service.create_directory(&name).await?,
                    CreateKind::File => self.service.create_file(&name).await?,
                }
                self.service.list().await
            })
            .await;
        self.sink.lock_changed(false);
        match outcome {
            Ok(entries) => self.listing.replace(entries),
            Err(GateError::Busy) => debug!(action, "create not issued, gate busy"),
            Err(err) => {
                warn!(%err, action, name = %name, "create failed");
                self.sink.notice(Notice::OperationFailed {
                    action,
                    message: err.to_string(),
                });
            }
        }
    }

    /// Dialog declined: close it, no request.
    pub fn decline_create(&mut self) {
        if !self.active {
            return;
        }
        self.dialog.decline();
    }

    // --- Dismissal ---

    /// Outside click or Escape: the menu closes and any inline rename
    /// cancels without a request.
    pub fn dismiss(&mut self) {
        if !self.active {
            return;
        }
        self.menu.dismiss();
        self.cancel_rename();
    }

    fn reset_transient_state(&mut self) {
        self.menu.dismiss();
        self.rename.cancel();
        self.listing.clear_editing();
        self.dialog.decline();
    }
}
