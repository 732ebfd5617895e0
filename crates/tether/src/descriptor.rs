#![forbid(unsafe_code)]

//! Fluent link descriptor.
//!
//! # Design
//!
//! A [`LinkDescriptor`] is minted fresh by every `SyncContext::sync*` call
//! and carries the source object's identity plus the property selection.
//! The builder moves through the chain (`link` / `link_all` consume and
//! return it, `to` consumes it for good), so a descriptor cannot be reused
//! for a second linking pass and no mutable state is shared between calls.
//!
//! An empty selection — `link_all`, or `to` without a prior `link` — binds
//! every enumerable own property present on the source at `to` time.

use std::fmt;

use tether_core::identity::Token;
use tether_core::object::SyncObject;

use crate::context::SyncContext;
use crate::linker;

/// What `to` accepts: a direct object reference, or an identity previously
/// issued by (or supplied to) the registry.
pub enum LinkTarget {
    /// Link straight to this object.
    Object(SyncObject),
    /// Look the target up by identity at `to` time.
    Identity(Token),
}

impl From<&SyncObject> for LinkTarget {
    fn from(object: &SyncObject) -> Self {
        LinkTarget::Object(object.clone())
    }
}

impl From<SyncObject> for LinkTarget {
    fn from(object: SyncObject) -> Self {
        LinkTarget::Object(object)
    }
}

impl From<&str> for LinkTarget {
    fn from(name: &str) -> Self {
        LinkTarget::Identity(Token::from(name))
    }
}

impl From<String> for LinkTarget {
    fn from(name: String) -> Self {
        LinkTarget::Identity(Token::from(name))
    }
}

impl From<Token> for LinkTarget {
    fn from(token: Token) -> Self {
        LinkTarget::Identity(token)
    }
}

impl From<&Token> for LinkTarget {
    fn from(token: &Token) -> Self {
        LinkTarget::Identity(token.clone())
    }
}

/// Chainable link request bound to one registered source object.
///
/// Produced by `SyncContext::sync*`; never constructed directly.
pub struct LinkDescriptor<'ctx> {
    ctx: &'ctx SyncContext,
    source: Token,
    /// `None` until `link`/`link_all` is called. An empty selection means
    /// "every enumerable own property of the source at `to` time".
    selection: Option<Vec<String>>,
}

impl<'ctx> LinkDescriptor<'ctx> {
    pub(crate) fn new(ctx: &'ctx SyncContext, source: Token) -> Self {
        Self {
            ctx,
            source,
            selection: None,
        }
    }

    /// Select the properties to bind, in order. Duplicates are harmless;
    /// a later duplicate binding simply reapplies.
    #[must_use]
    pub fn link<I>(mut self, properties: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.selection = Some(properties.into_iter().map(Into::into).collect());
        self
    }

    /// Select everything: bind every enumerable own property present on the
    /// source when [`to`](Self::to) runs.
    #[must_use]
    pub fn link_all(mut self) -> Self {
        self.selection = Some(Vec::new());
        self
    }

    /// Log the descriptor's current state at debug level. Alters nothing.
    #[must_use]
    pub fn debug(self) -> Self {
        tracing::debug!(descriptor = ?self, "link descriptor state");
        self
    }

    /// Resolve the source and bind each selected property to `target`.
    ///
    /// The target is either a direct object reference or an identity to
    /// resolve through the registry. A source or named target that cannot
    /// be resolved logs a warning and binds nothing. A fault on one
    /// property logs a warning and skips it; sibling properties proceed.
    pub fn to(self, target: impl Into<LinkTarget>) {
        let Some(source) = self.ctx.resolve(&self.source) else {
            tracing::warn!(source = %self.source, "link source is not reachable; nothing linked");
            return;
        };
        let target = match target.into() {
            LinkTarget::Object(object) => object,
            LinkTarget::Identity(token) => match self.ctx.resolve(&token) {
                Some(object) => object,
                None => {
                    tracing::warn!(target = %token, "link target identity is not registered; nothing linked");
                    return;
                }
            },
        };
        let properties = match &self.selection {
            Some(names) if !names.is_empty() => names.clone(),
            _ => source.property_names(),
        };
        for name in &properties {
            if let Err(fault) = linker::link(&source, &target, name) {
                tracing::warn!(property = %name, %fault, "binding skipped");
            }
        }
    }
}

impl fmt::Debug for LinkDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkDescriptor")
            .field("source", &self.source)
            .field("selection", &self.selection)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::value::Value;

    #[test]
    fn to_without_link_binds_everything() {
        let ctx = SyncContext::new();
        let source: SyncObject = [("foo", "bar"), ("qux", "old")].into_iter().collect();
        let target: SyncObject = [("foo", "baz"), ("qux", "new")].into_iter().collect();
        ctx.sync_object(&source).unwrap().to(&target);
        assert_eq!(source.get("foo"), Some(Value::from("baz")));
        assert_eq!(source.get("qux"), Some(Value::from("new")));
    }

    #[test]
    fn duplicate_selection_entries_are_harmless() {
        let ctx = SyncContext::new();
        let source: SyncObject = [("foo", "bar")].into_iter().collect();
        let target: SyncObject = [("foo", "baz")].into_iter().collect();
        ctx.sync_object(&source)
            .unwrap()
            .link(["foo", "foo"])
            .to(&target);
        assert_eq!(source.get("foo"), Some(Value::from("baz")));
    }

    #[test]
    fn debug_is_chainable_and_neutral() {
        let ctx = SyncContext::new();
        let source: SyncObject = [("foo", "bar")].into_iter().collect();
        let target: SyncObject = [("foo", "baz")].into_iter().collect();
        ctx.sync_object(&source)
            .unwrap()
            .link(["foo"])
            .debug()
            .to(&target);
        assert_eq!(source.get("foo"), Some(Value::from("baz")));
    }

    #[test]
    fn unknown_target_identity_binds_nothing() {
        let ctx = SyncContext::new();
        let source: SyncObject = [("foo", "bar")].into_iter().collect();
        ctx.sync_object(&source).unwrap().link_all().to("no-such-name");
        assert_eq!(source.get("foo"), Some(Value::from("bar")));
        assert!(!source.is_linked("foo"));
    }

    #[test]
    fn dropped_source_binds_nothing() {
        let ctx = SyncContext::new();
        let target: SyncObject = [("foo", "baz")].into_iter().collect();
        let descriptor = {
            let source: SyncObject = [("foo", "bar")].into_iter().collect();
            ctx.sync_object(&source).unwrap()
        };
        // Source dropped between registration and `to`; warn-and-continue.
        descriptor.link_all().to(&target);
        assert_eq!(target.get("foo"), Some(Value::from("baz")));
    }
}
