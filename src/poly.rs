//! Polymorphic encode/decode over registered subtype families.
//!
//! A [`PolyCodec`] serializes values of an abstract type by consulting the
//! registry. Reading peeks the leading type tag, resolves it under the
//! abstract type's name and delegates the whole read — tag included — to the
//! resolved registration. Writing resolves the value's own concrete tag, so
//! the produced text always begins with the concrete type's simple name no
//! matter which abstract type the value is viewed as.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::codec::Codec;
use crate::error::Result;
use crate::identity::TypeName;
use crate::io::{TextInput, TextOutput};
use crate::registry::Registry;

/// Capabilities an abstract family type supplies for polymorphic dispatch.
///
/// Implemented by the type that represents "any member of the family" —
/// typically an enum with one variant per concrete subtype, or a boxed trait
/// object. The implementation is the explicit, statically-known counterpart
/// of the subtype relationship: it names the abstract identity, wraps decoded
/// concrete values and exposes the concrete view of a value being written.
pub trait Polymorphic: Sized + 'static {
    /// The abstract name subtypes register under.
    fn abstract_name() -> TypeName;

    /// Wraps a freshly decoded concrete value.
    ///
    /// Fails (conventionally with [`TagcodeError::Internal`]) if the value's
    /// type is not a member of this family; that means the registry and this
    /// implementation disagree about the family's membership.
    ///
    /// [`TagcodeError::Internal`]: crate::TagcodeError::Internal
    fn from_concrete(value: Box<dyn Any>) -> Result<Self>;

    /// The concrete type tag of this value.
    fn concrete_tag(&self) -> TypeName;

    /// Borrows the concrete value for writing.
    fn concrete_value(&self) -> &dyn Any;
}

/// A codec for an abstract type `P`, dispatching through a registry.
pub struct PolyCodec<P> {
    registry: Arc<Registry>,
    _family: PhantomData<fn() -> P>,
}

impl<P> fmt::Debug for PolyCodec<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolyCodec").finish_non_exhaustive()
    }
}

impl<P: Polymorphic> PolyCodec<P> {
    /// A codec dispatching through the global registry.
    pub fn new() -> Self {
        Self::with_registry(Registry::global())
    }

    /// A codec dispatching through an explicit registry.
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            _family: PhantomData,
        }
    }
}

impl<P: Polymorphic> Default for PolyCodec<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Polymorphic> Codec<P> for PolyCodec<P> {
    fn read(&self, input: &mut TextInput<'_>) -> Result<P> {
        let tag = input.peek_identifier()?;
        let registration = self.registry.resolve(P::abstract_name(), tag)?;
        let value = registration.read_value(input)?;
        P::from_concrete(value)
    }

    fn write(&self, output: &mut TextOutput, value: &P) -> Result<()> {
        let tag = value.concrete_tag();
        let registration = self.registry.resolve(P::abstract_name(), tag.as_str())?;
        registration.write_value(output, value.concrete_value())
    }
}
