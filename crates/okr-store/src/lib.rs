//! # okr-store
//!
//! The shared session state and the store that owns it.
//!
//! [`SessionState`] is the single shared document: all objectives plus
//! session metadata. [`SessionStore`] is the single point of truth — both
//! the manual CRUD path and the agent mutation bridge go through
//! [`SessionStore::replace`], never keep separate copies. State is held
//! in memory only; each snapshot is replaced wholesale so readers always
//! observe one fully-formed state, never a partial update.
//!
//! Observers registered via [`SessionStore::subscribe`] receive every new
//! snapshot; the change notifier (okr-notify) hooks in here.

pub mod error;
pub mod session;
pub mod store;

pub use error::StoreError;
pub use session::SessionState;
pub use store::{SessionStore, StateObserver};
