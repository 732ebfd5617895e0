#![forbid(unsafe_code)]

//! Weak identity registry mapping tokens to objects.
//!
//! # Design
//!
//! The registry owns the token-to-object map and mints fresh tokens from a
//! monotonic counter. Entries are weak: registration never extends an
//! object's lifetime, and a token whose object has been dropped resolves to
//! nothing. Entries themselves persist for the registry's lifetime; there
//! is no deregistration operation.
//!
//! # Invariants
//!
//! 1. A token maps to at most one object.
//! 2. A registered object resolves to exactly one token for its lifetime;
//!    re-registration returns the existing token.
//! 3. Auto-minted tokens never collide with caller-supplied names: the
//!    counter skips any rendered token already present in the map.

use std::fmt;

use indexmap::IndexMap;
use tether_core::identity::Token;
use tether_core::object::{SyncObject, WeakSyncObject};
use tether_core::value::ValueKind;

/// Why a registration was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterFault {
    /// The value's kind cannot carry an identity; only objects can.
    NotRegisterable(ValueKind),
    /// The requested identity already names a different live object.
    IdentityTaken(Token),
}

impl fmt::Display for RegisterFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterFault::NotRegisterable(kind) => {
                write!(f, "a {kind} value cannot be registered; only objects can")
            }
            RegisterFault::IdentityTaken(token) => {
                write!(f, "identity \"{token}\" already names another live object")
            }
        }
    }
}

impl std::error::Error for RegisterFault {}

/// Token-to-object map with monotonic token minting.
#[derive(Default)]
pub struct Registry {
    entries: IndexMap<Token, WeakSyncObject>,
    next_id: u64,
}

impl Registry {
    /// Create an empty registry. The first auto-minted token is `object-1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            next_id: 0,
        }
    }

    /// Register an object, minting a fresh token on first registration.
    ///
    /// Idempotent per object: an already-registered object keeps its token.
    /// An object stamped by another registry is adopted under its existing
    /// token when that token is free here; if the token names a different
    /// live object, the registration is refused.
    pub fn register(&mut self, object: &SyncObject) -> Result<Token, RegisterFault> {
        match object.identity() {
            Some(token) => self.adopt(object, token),
            None => {
                let token = self.mint();
                object.set_identity(token.clone());
                self.entries.insert(token.clone(), object.downgrade());
                Ok(token)
            }
        }
    }

    /// Register an object under a caller-supplied identity.
    ///
    /// The name is collision-checked: a name already mapping to a different
    /// live object is refused, while a dead entry under that name is
    /// reclaimed. An object that already carries an identity keeps it; the
    /// requested name is not applied (idempotency wins).
    pub fn register_named(
        &mut self,
        object: &SyncObject,
        name: &str,
    ) -> Result<Token, RegisterFault> {
        match object.identity() {
            Some(token) => self.adopt(object, token),
            None => {
                let token = Token::from(name);
                if self.live_entry(&token).is_some() {
                    return Err(RegisterFault::IdentityTaken(token));
                }
                object.set_identity(token.clone());
                self.entries.insert(token.clone(), object.downgrade());
                Ok(token)
            }
        }
    }

    /// The live object behind a token, or `None` for unknown tokens and for
    /// entries whose object has been dropped.
    #[must_use]
    pub fn resolve(&self, token: &Token) -> Option<SyncObject> {
        self.entries.get(token).and_then(WeakSyncObject::upgrade)
    }

    /// True iff the object carries an issued token that still maps back to
    /// this same object here.
    #[must_use]
    pub fn is_registered(&self, object: &SyncObject) -> bool {
        object
            .identity()
            .and_then(|token| self.resolve(&token))
            .is_some_and(|registered| registered.ptr_eq(object))
    }

    /// Number of entries, including stale ones whose object has died.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entry has ever been made.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-home an object that already carries a token.
    fn adopt(&mut self, object: &SyncObject, token: Token) -> Result<Token, RegisterFault> {
        match self.live_entry(&token) {
            Some(existing) if existing.ptr_eq(object) => Ok(token),
            Some(_) => Err(RegisterFault::IdentityTaken(token)),
            None => {
                self.entries.insert(token.clone(), object.downgrade());
                Ok(token)
            }
        }
    }

    fn live_entry(&self, token: &Token) -> Option<SyncObject> {
        self.entries.get(token).and_then(WeakSyncObject::upgrade)
    }

    /// Next unused auto token. Skips rendered names a caller has claimed.
    fn mint(&mut self) -> Token {
        loop {
            self.next_id += 1;
            let token = Token::numbered(self.next_id);
            if !self.entries.contains_key(&token) {
                return token;
            }
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
