//! The navigator session core: the state machines and concurrency
//! discipline behind the remote file listing.
//!
//! [`session::NavigatorSession`] is the composition root. It owns one
//! [`listing::ListingStore`], one [`gate::OperationGate`] serializing all
//! mutating remote requests, and the three gesture-driven controllers
//! (context menu, inline rename, create dialog). The remote backend and
//! the outward event surface are injected through the
//! [`RemoteFileService`](crate::files::RemoteFileService) and
//! [`events::SessionSink`] traits; generics over both monomorphize at
//! compile time.

pub mod dialog;
pub mod events;
pub mod gate;
pub mod listing;
pub mod menu;
pub mod rename;
pub mod session;

pub use dialog::{CreateDialogController, CreateKind};
pub use events::{Notice, SessionSink};
pub use gate::OperationGate;
pub use listing::ListingStore;
pub use menu::{ContextMenuController, MenuAction, MenuIcon, MenuItem, MenuPosition};
pub use rename::{RenameController, RenameState};
pub use session::NavigatorSession;
