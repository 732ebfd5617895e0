#![forbid(unsafe_code)]

//! Property linker: validates a binding and installs the forwarding slot.
//!
//! The target must hold the named property, and the property's current
//! value must be a scalar kind. Anything else is a classified fault with no
//! mutation — the caller logs it and moves on to sibling properties.

use std::fmt;

use tether_core::object::SyncObject;
use tether_core::value::ValueKind;

/// Why a single property binding was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkFault {
    /// The target object has no such property.
    MissingProperty,
    /// The target's value for the property is not a scalar kind.
    Unsynchronizable(ValueKind),
    /// Source and target are the same object; the forward would recurse.
    SelfLink,
}

impl fmt::Display for LinkFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkFault::MissingProperty => {
                f.write_str("property does not exist on the target object")
            }
            LinkFault::Unsynchronizable(kind) => write!(
                f,
                "target property holds a {kind} value; only string and number properties can be linked"
            ),
            LinkFault::SelfLink => f.write_str("an object cannot link a property to itself"),
        }
    }
}

impl std::error::Error for LinkFault {}

/// Bind `name` on `source` to the same-named property on `target`.
///
/// On success the source's slot becomes a forwarding accessor: reads return
/// the target's current value and writes assign through to the target,
/// synchronously. The source's prior stored value, if any, is replaced and
/// lost. Re-linking the same triple is idempotent.
pub(crate) fn link(source: &SyncObject, target: &SyncObject, name: &str) -> Result<(), LinkFault> {
    if source.ptr_eq(target) {
        return Err(LinkFault::SelfLink);
    }
    match target.get(name) {
        None => Err(LinkFault::MissingProperty),
        Some(value) if !value.is_synchronizable() => {
            Err(LinkFault::Unsynchronizable(value.kind()))
        }
        Some(_) => {
            source.install_forward(name, target);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::value::Value;

    #[test]
    fn linking_installs_a_forward() {
        let source: SyncObject = [("foo", "bar")].into_iter().collect();
        let target: SyncObject = [("foo", "baz")].into_iter().collect();
        assert_eq!(link(&source, &target, "foo"), Ok(()));
        assert!(source.is_linked("foo"));
        assert_eq!(source.get("foo"), Some(Value::from("baz")));
    }

    #[test]
    fn missing_target_property_is_a_fault() {
        let source: SyncObject = [("foo", "bar")].into_iter().collect();
        let target = SyncObject::new();
        assert_eq!(link(&source, &target, "foo"), Err(LinkFault::MissingProperty));
        // Source untouched.
        assert_eq!(source.get("foo"), Some(Value::from("bar")));
        assert!(!source.is_linked("foo"));
    }

    #[test]
    fn composite_target_value_is_a_fault() {
        let source: SyncObject = [("items", "original")].into_iter().collect();
        let target: SyncObject = [("items", Value::List(vec![Value::from(1i64)]))]
            .into_iter()
            .collect();
        assert_eq!(
            link(&source, &target, "items"),
            Err(LinkFault::Unsynchronizable(ValueKind::List))
        );
        assert_eq!(source.get("items"), Some(Value::from("original")));
    }

    #[test]
    fn boolean_target_value_is_a_fault() {
        let source = SyncObject::new();
        let target: SyncObject = [("flag", true)].into_iter().collect();
        assert_eq!(
            link(&source, &target, "flag"),
            Err(LinkFault::Unsynchronizable(ValueKind::Bool))
        );
        assert!(!source.has("flag"));
    }

    #[test]
    fn self_link_is_a_fault() {
        let object: SyncObject = [("foo", "bar")].into_iter().collect();
        assert_eq!(link(&object, &object, "foo"), Err(LinkFault::SelfLink));
        assert!(!object.is_linked("foo"));
    }

    #[test]
    fn relinking_is_idempotent() {
        let source: SyncObject = [("foo", "bar")].into_iter().collect();
        let target: SyncObject = [("foo", "baz")].into_iter().collect();
        assert_eq!(link(&source, &target, "foo"), Ok(()));
        assert_eq!(link(&source, &target, "foo"), Ok(()));
        target.set("foo", "after");
        assert_eq!(source.get("foo"), Some(Value::from("after")));
    }

    #[test]
    fn fault_messages_name_the_kind() {
        let fault = LinkFault::Unsynchronizable(ValueKind::List);
        assert!(fault.to_string().contains("list"));
    }
}
