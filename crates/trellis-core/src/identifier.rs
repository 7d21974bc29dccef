//! Interned names for elements, graph nodes and plugs.
//!
//! Names are compared far more often than they are printed, so [`Id`] stores
//! a symbol from a process-wide string interner and resolves it back to text
//! only for display.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Runs `f` with exclusive access to the global interner.
fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// A cheap, copyable name.
///
/// # Examples
///
/// ```
/// use trellis_core::identifier::Id;
///
/// let node = Id::new("blur");
/// let plug = node.create_nested(Id::new("radius"));
/// assert_eq!(plug, "blur::radius");
///
/// let unnamed = Id::from_anonymous(3);
/// assert_eq!(unnamed.to_string(), "__3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates a generated identifier for something the caller did not name.
    pub fn from_anonymous(idx: usize) -> Self {
        Self::new(&format!("__{idx}"))
    }

    /// Joins this identifier and `child_id` with a `::` separator.
    ///
    /// Plugs are named this way after the node owning them.
    pub fn create_nested(&self, child_id: Id) -> Self {
        let nested = format!("{self}::{child_id}");
        Self::new(&nested)
    }

    /// Resolves the identifier back into an owned string.
    pub fn as_string(&self) -> String {
        with_interner(|interner| interner.resolve(self.0).map(str::to_owned))
            .unwrap_or_default()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
