#![forbid(unsafe_code)]

//! Identity tokens for registered objects.
//!
//! A [`Token`] names an object within one process. Auto-minted tokens render
//! as `object-N` from a monotonic counter; caller-supplied names wrap the
//! caller's string verbatim. Tokens are never serialized or compared across
//! processes, so no randomness or collision resistance is involved.

use std::fmt;
use std::rc::Rc;

/// Process-unique, opaque identity of a registered object.
///
/// Cloning a token is cheap (shared string storage). Two tokens are equal
/// iff their rendered text is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(Rc<str>);

impl Token {
    /// Render the `n`-th auto-minted token.
    #[must_use]
    pub fn numbered(n: u64) -> Self {
        Token(format!("object-{n}").into())
    }

    /// The token's text form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(name: &str) -> Self {
        Token(name.into())
    }
}

impl From<String> for Token {
    fn from(name: String) -> Self {
        Token(name.into())
    }
}

impl From<&Token> for Token {
    fn from(token: &Token) -> Self {
        token.clone()
    }
}
