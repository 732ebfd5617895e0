#![forbid(unsafe_code)]

//! Core data model for tether: tagged values, identity tokens, and shared
//! property-map objects.
//!
//! # Role in tether
//! `tether-core` is the mechanism layer. It owns the value classification
//! rules, the identity token scheme, and the object representation with its
//! forwarding slots. It knows nothing about registration policy or the
//! fluent linking surface; those live in the `tether` crate.
//!
//! # Primary responsibilities
//! - **Value / ValueKind**: closed sum type for property values and the
//!   scalar-only synchronizability rule.
//! - **Token**: process-unique identity for registered objects.
//! - **SyncObject**: shared, insertion-ordered property map whose slots are
//!   either stored values or live forwarding accessors.
//!
//! # How it fits in the system
//! The `tether` crate registers `SyncObject`s in a weak identity registry
//! and installs forwarding slots through the accessors defined here. Reads
//! and writes on a linked property delegate to the target object with no
//! buffering in between.

pub mod identity;
pub mod object;
pub mod value;

pub use identity::Token;
pub use object::{SyncObject, WeakSyncObject};
pub use value::{Value, ValueKind};
