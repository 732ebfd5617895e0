#![forbid(unsafe_code)]

//! Live one-directional property bindings between plain data objects.
//!
//! # Role
//! When a target object's property changes, every source object linked to
//! it observes the same value on its next read — no propagation code, no
//! polling. Bindings are one-directional, scalar-only (strings and
//! numbers), and entirely in-process.
//!
//! # Primary responsibilities
//! - **SyncContext**: the application-root entry point owning the identity
//!   registry.
//! - **LinkDescriptor**: the fluent `link(..)` / `link_all()` / `to(..)`
//!   chain minted per registration call.
//! - **Registry**: weak token-to-object map with monotonic token minting.
//!
//! # Example
//!
//! ```
//! use tether::{SyncContext, SyncObject, Value};
//!
//! let ctx = SyncContext::new();
//! let target: SyncObject = [("title", "ready")].into_iter().collect();
//! let source: SyncObject = [("title", "draft")].into_iter().collect();
//!
//! ctx.sync_object(&source).unwrap().link(["title"]).to(&target);
//!
//! // The source now reads through to the target.
//! assert_eq!(source.get("title"), Some(Value::from("ready")));
//!
//! // Writes on the target are visible on the very next read.
//! target.set("title", "done");
//! assert_eq!(source.get("title"), Some(Value::from("done")));
//! ```
//!
//! Linking by name works the same way: register the target under an
//! identity with [`SyncContext::sync_named`] and pass that name to
//! [`LinkDescriptor::to`] instead of an object reference.
//!
//! # Failure policy
//! Nothing in the linking pipeline panics or propagates an error to the
//! caller. Refused registrations return `None`; unsyncable properties are
//! skipped with a `tracing` warning while sibling bindings proceed.

pub mod context;
pub mod descriptor;
mod linker;
pub mod registry;

pub use context::SyncContext;
pub use descriptor::{LinkDescriptor, LinkTarget};
pub use linker::LinkFault;
pub use registry::{RegisterFault, Registry};
pub use tether_core::{SyncObject, Token, Value, ValueKind, WeakSyncObject};
