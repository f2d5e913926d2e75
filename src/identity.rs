//! Type names and identities.
//!
//! A [`TypeIdentity`] binds a registration to exactly one concrete type: its
//! simple (unqualified) name plus the ordered list of abstract types it
//! implements. The simple name doubles as the wire tag. Abstract types are
//! identified by bare [`TypeName`]s; they carry no chain of their own.

use std::fmt;

/// The simple, unqualified name of a type.
///
/// Names are static string slices: identities are declared literally at
/// initialization time and live for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(&'static str);

impl TypeName {
    /// Wraps a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The underlying string.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The identity of a concrete type: its simple name and supertype chain.
///
/// Built fluently:
///
/// ```rust
/// use tagcode::{TypeIdentity, TypeName};
///
/// let identity = TypeIdentity::new(TypeName::new("Circle"))
///     .implements(TypeName::new("Shape"))
///     .implements(TypeName::new("Drawable"));
/// assert_eq!(identity.simple_name().as_str(), "Circle");
/// assert_eq!(identity.supertypes().len(), 2);
/// ```
///
/// Two identities are equal when both the name and the full chain (in order)
/// match; the set-once discipline of a registration compares them this way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeIdentity {
    name: TypeName,
    supertypes: Vec<TypeName>,
}

impl TypeIdentity {
    /// Creates an identity with an empty supertype chain.
    pub fn new(name: TypeName) -> Self {
        Self {
            name,
            supertypes: Vec::new(),
        }
    }

    /// Appends one abstract type to the supertype chain.
    pub fn implements(mut self, supertype: TypeName) -> Self {
        self.supertypes.push(supertype);
        self
    }

    /// The simple name; also the wire tag of the type.
    pub fn simple_name(&self) -> TypeName {
        self.name
    }

    /// The declared supertypes, in declaration order.
    pub fn supertypes(&self) -> &[TypeName] {
        &self.supertypes
    }

    /// Every name this type is registered under: itself first, then its
    /// supertypes in declaration order.
    pub fn chain(&self) -> impl Iterator<Item = TypeName> + '_ {
        std::iter::once(self.name).chain(self.supertypes.iter().copied())
    }
}
