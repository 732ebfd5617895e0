#![forbid(unsafe_code)]

//! Application-root sync context: the registration entry points.
//!
//! # Design
//!
//! `SyncContext` owns the registry behind a `RefCell` and is constructed
//! once per application root, then passed by reference to whatever needs to
//! register or resolve objects. Tests instantiate an isolated context each;
//! there is no process-global state.
//!
//! Every fault is handled here by logging and returning an empty result —
//! registration never halts the host program.

use std::cell::RefCell;
use std::fmt;

use tether_core::identity::Token;
use tether_core::object::SyncObject;
use tether_core::value::Value;

use crate::descriptor::LinkDescriptor;
use crate::registry::{RegisterFault, Registry};

/// Owns the identity registry and mints link descriptors.
#[derive(Default)]
pub struct SyncContext {
    registry: RefCell<Registry>,
}

impl SyncContext {
    /// Create a context with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: RefCell::new(Registry::new()),
        }
    }

    /// Register a value and return a descriptor for linking it.
    ///
    /// Non-object values are refused with a logged warning and `None`.
    /// An already-registered object is a successful no-op that still yields
    /// a fresh descriptor bound to its existing identity.
    pub fn sync(&self, value: &Value) -> Option<LinkDescriptor<'_>> {
        match value {
            Value::Object(object) => self.sync_object(object),
            other => {
                let fault = RegisterFault::NotRegisterable(other.kind());
                tracing::warn!(%fault, "registration refused");
                None
            }
        }
    }

    /// Register a value under a caller-supplied identity.
    ///
    /// The name can later be passed to `LinkDescriptor::to` in place of an
    /// object reference. A name already bound to a different live object is
    /// refused with a logged warning and `None`.
    pub fn sync_named(&self, value: &Value, name: &str) -> Option<LinkDescriptor<'_>> {
        match value {
            Value::Object(object) => self.sync_object_named(object, name),
            other => {
                let fault = RegisterFault::NotRegisterable(other.kind());
                tracing::warn!(%fault, "registration refused");
                None
            }
        }
    }

    /// Statically-typed registration for a caller already holding an object.
    pub fn sync_object(&self, object: &SyncObject) -> Option<LinkDescriptor<'_>> {
        match self.registry.borrow_mut().register(object) {
            Ok(token) => Some(LinkDescriptor::new(self, token)),
            Err(fault) => {
                tracing::warn!(%fault, "registration refused");
                None
            }
        }
    }

    /// Statically-typed named registration.
    pub fn sync_object_named(&self, object: &SyncObject, name: &str) -> Option<LinkDescriptor<'_>> {
        match self.registry.borrow_mut().register_named(object, name) {
            Ok(token) => {
                if token.as_str() != name {
                    tracing::warn!(
                        identity = %token,
                        requested = name,
                        "object already registered; keeping its existing identity"
                    );
                }
                Some(LinkDescriptor::new(self, token))
            }
            Err(fault) => {
                tracing::warn!(%fault, "registration refused");
                None
            }
        }
    }

    /// The live object behind an identity, if the registry knows it.
    #[must_use]
    pub fn resolve(&self, identity: impl Into<Token>) -> Option<SyncObject> {
        self.registry.borrow().resolve(&identity.into())
    }

    /// True iff the object is registered in this context.
    #[must_use]
    pub fn is_registered(&self, object: &SyncObject) -> bool {
        self.registry.borrow().is_registered(object)
    }

    /// Number of registry entries, stale ones included.
    #[must_use]
    pub fn registered_len(&self) -> usize {
        self.registry.borrow().len()
    }
}

impl fmt::Debug for SyncContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncContext")
            .field("registry", &self.registry.borrow())
            .finish()
    }
}
