#![forbid(unsafe_code)]

//! Shared property-map objects with forwarding slots.
//!
//! # Design
//!
//! [`SyncObject`] wraps an insertion-ordered property map in shared,
//! reference-counted storage (`Rc<RefCell<..>>`). Cloning a handle shares
//! the same object. Each property occupies a slot: either a stored value or
//! a forwarding accessor that delegates reads and writes to the same-named
//! property on a target object.
//!
//! Rust has no transparent property interception, so linked objects are
//! accessed through the explicit [`get`](SyncObject::get) /
//! [`set`](SyncObject::set) accessors; field syntax does not exist for
//! dynamic properties in the first place.
//!
//! # Invariants
//!
//! 1. The identity stamp is written at most once per object lifetime.
//! 2. Property enumeration order is insertion order.
//! 3. A forwarding slot holds a strong handle: the binding keeps its target
//!    alive even when no registry does.
//! 4. Reads and writes through a forwarding slot are synchronous, with no
//!    buffering between source and target.
//!
//! # Failure Modes
//!
//! - **Forwarding cycle**: two distinct objects whose same-named properties
//!   forward to each other recurse unboundedly on first access. Installing
//!   a forward from an object onto itself is refused here; wider cycles are
//!   the caller's responsibility.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::identity::Token;
use crate::value::Value;

/// A property's storage state.
enum Slot {
    /// Plain stored value.
    Stored(Value),
    /// Forwarding accessor: reads and writes delegate to the same-named
    /// property on the target object.
    Linked(SyncObject),
}

struct ObjectInner {
    properties: IndexMap<String, Slot>,
    identity: Option<Token>,
}

/// A shared, insertion-ordered property map.
///
/// Cloning a `SyncObject` creates a new handle to the **same** object —
/// both handles see the same properties and the same identity.
pub struct SyncObject {
    inner: Rc<RefCell<ObjectInner>>,
}

// Manual Clone: shares the same Rc.
impl Clone for SyncObject {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl SyncObject {
    /// Create a new empty object with no identity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObjectInner {
                properties: IndexMap::new(),
                identity: None,
            })),
        }
    }

    /// Read a property.
    ///
    /// A stored slot clones its value out; a forwarding slot delegates to
    /// the target, so chains of bindings resolve transitively. `None` when
    /// the property is absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        let target = match self.inner.borrow().properties.get(name) {
            Some(Slot::Stored(value)) => return Some(value.clone()),
            Some(Slot::Linked(target)) => target.clone(),
            None => return None,
        };
        target.get(name)
    }

    /// Write a property.
    ///
    /// A forwarding slot delegates the write to the target; the write is
    /// visible to every object linked to that target on the next read.
    /// Stored and absent slots store the value locally.
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let target = {
            let mut inner = self.inner.borrow_mut();
            match inner.properties.get(name) {
                Some(Slot::Linked(target)) => target.clone(),
                _ => {
                    inner.properties.insert(name.to_string(), Slot::Stored(value));
                    return;
                }
            }
        };
        target.set(name, value);
    }

    /// Store a value directly into the slot, bypassing any forwarding.
    ///
    /// This is the construction-time population primitive: it replaces the
    /// whole slot, severing a forwarding accessor if one was installed.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.inner
            .borrow_mut()
            .properties
            .insert(name.into(), Slot::Stored(value.into()));
    }

    /// Replace `name`'s slot with a forwarding accessor onto `target`.
    ///
    /// Any stored value is discarded and cannot be restored; there is no
    /// unlink operation. Re-installing the same forward is harmless, and a
    /// later install overwrites an earlier one (last writer wins). Returns
    /// `false` without mutating when `target` is this same object, which
    /// would recurse on first access.
    pub fn install_forward(&self, name: &str, target: &SyncObject) -> bool {
        if self.ptr_eq(target) {
            return false;
        }
        self.inner
            .borrow_mut()
            .properties
            .insert(name.to_string(), Slot::Linked(target.clone()));
        true
    }

    /// True when the property currently exists, stored or linked.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.inner.borrow().properties.contains_key(name)
    }

    /// True when the property is currently a forwarding slot.
    #[must_use]
    pub fn is_linked(&self, name: &str) -> bool {
        matches!(
            self.inner.borrow().properties.get(name),
            Some(Slot::Linked(_))
        )
    }

    /// Enumerable own property names, in insertion order.
    #[must_use]
    pub fn property_names(&self) -> Vec<String> {
        self.inner.borrow().properties.keys().cloned().collect()
    }

    /// Number of own properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().properties.len()
    }

    /// True when the object has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().properties.is_empty()
    }

    /// The identity stamped by a registry, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Token> {
        self.inner.borrow().identity.clone()
    }

    /// Stamp the identity. The first write wins; a later call with a
    /// different token is ignored and reports `false`.
    pub fn set_identity(&self, token: Token) -> bool {
        let mut inner = self.inner.borrow_mut();
        match &inner.identity {
            Some(existing) => *existing == token,
            None => {
                inner.identity = Some(token);
                true
            }
        }
    }

    /// A non-owning handle to this object.
    #[must_use]
    pub fn downgrade(&self) -> WeakSyncObject {
        WeakSyncObject {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// True when both handles refer to the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &SyncObject) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for SyncObject {
    fn default() -> Self {
        Self::new()
    }
}

// Object equality is reference identity, as for any shared handle.
impl PartialEq for SyncObject {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for SyncObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SyncObject")
            .field("identity", &inner.identity)
            .field("properties", &inner.properties.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for SyncObject
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let object = SyncObject::new();
        for (name, value) in iter {
            object.insert(name, value);
        }
        object
    }
}

/// Non-owning handle to a [`SyncObject`].
///
/// Used by registries so that registration does not extend an object's
/// lifetime. `upgrade` fails once every strong handle is gone.
pub struct WeakSyncObject {
    inner: Weak<RefCell<ObjectInner>>,
}

impl WeakSyncObject {
    /// Recover a strong handle, if the object is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<SyncObject> {
        self.inner.upgrade().map(|inner| SyncObject { inner })
    }
}

impl Clone for WeakSyncObject {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl fmt::Debug for WeakSyncObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakSyncObject")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
