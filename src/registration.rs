//! The registration base shared by all arity builders.
//!
//! A registration composes two write-once slots — the type's identity and its
//! component codecs — plus the handle of the registry it publishes itself to.
//! Setting the identity is the single mechanism that makes polymorphic
//! dispatch possible: on the first (and only effective) set, the registration
//! inserts itself into the registry under every name in the identity's chain.
//!
//! The registry stores registrations type-erased, as [`DynRegistration`]
//! trait objects, so that one table can hold product types of any value type.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::codec::SharedCodec;
use crate::error::{Result, TagcodeError};
use crate::identity::{TypeIdentity, TypeName};
use crate::io::{TextInput, TextOutput};
use crate::registry::Registry;
use crate::slot::OnceSlot;

/// Component shape of a nullary product. There is nothing to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoComponents;

/// Component shape of a single-field product: one child codec.
///
/// Codecs are opaque capabilities, so equality is instance identity of the
/// shared handle. Re-setting components with the same handle is idempotent;
/// any other handle conflicts.
pub struct Component<A: 'static> {
    field: SharedCodec<A>,
}

impl<A: 'static> Clone for Component<A> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
        }
    }
}

impl<A: 'static> Component<A> {
    /// Wraps the child codec.
    pub fn new(field: SharedCodec<A>) -> Self {
        Self { field }
    }

    /// The child codec.
    pub fn field(&self) -> &SharedCodec<A> {
        &self.field
    }
}

impl<A: 'static> PartialEq for Component<A> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.field, &other.field)
    }
}

impl<A: 'static> fmt::Debug for Component<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Component(..)")
    }
}

/// Component shape of a two-field product: an ordered pair of child codecs.
pub struct ComponentPair<A: 'static, B: 'static> {
    first: SharedCodec<A>,
    second: SharedCodec<B>,
}

impl<A: 'static, B: 'static> Clone for ComponentPair<A, B> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

impl<A: 'static, B: 'static> ComponentPair<A, B> {
    /// Wraps both child codecs, in constructor-argument order.
    pub fn new(first: SharedCodec<A>, second: SharedCodec<B>) -> Self {
        Self { first, second }
    }

    /// Codec of the first constructor argument.
    pub fn first(&self) -> &SharedCodec<A> {
        &self.first
    }

    /// Codec of the second constructor argument.
    pub fn second(&self) -> &SharedCodec<B> {
        &self.second
    }
}

impl<A: 'static, B: 'static> PartialEq for ComponentPair<A, B> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.first, &other.first) && Arc::ptr_eq(&self.second, &other.second)
    }
}

impl<A: 'static, B: 'static> fmt::Debug for ComponentPair<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ComponentPair(..)")
    }
}

/// The shared core of every arity builder: the two write-once slots and the
/// registry handle. `C` is the arity-dependent component shape.
#[derive(Debug)]
pub struct RegistrationCore<C> {
    identity: OnceSlot<TypeIdentity>,
    components: OnceSlot<C>,
    registry: Arc<Registry>,
}

impl<C: Clone + PartialEq> RegistrationCore<C> {
    /// A core with both slots unset.
    pub(crate) fn new(registry: Arc<Registry>) -> Self {
        Self {
            identity: OnceSlot::new("type identity"),
            components: OnceSlot::new("component codecs"),
            registry,
        }
    }

    /// A core whose component slot is already filled. Used by nullary
    /// builders, whose unit-shaped components exist from construction.
    pub(crate) fn with_preset_components(registry: Arc<Registry>, components: C) -> Self {
        Self {
            identity: OnceSlot::new("type identity"),
            components: OnceSlot::preset("component codecs", components),
            registry,
        }
    }

    /// The configured identity, or a configuration error while unset.
    pub fn identity(&self) -> Result<TypeIdentity> {
        self.identity.get()
    }

    /// The configured components, or a configuration error while unset.
    pub fn components(&self) -> Result<C> {
        self.components.get()
    }

    /// The wire tag, derived from the identity's simple name.
    pub fn tag_name(&self) -> Result<TypeName> {
        Ok(self.identity.get()?.simple_name())
    }

    /// True once both slots hold values.
    pub fn is_configured(&self) -> bool {
        self.identity.is_set() && self.components.is_set()
    }

    /// Sets the component codecs (set-once-or-equal).
    pub fn set_components(&self, components: C) -> Result<()> {
        self.components.set(components).map(|_| ())
    }

    /// Sets the identity (set-once-or-equal) and, on the first effective set,
    /// publishes `erased` to the registry under every name in the chain.
    ///
    /// An idempotent equal re-set performs no registry insertion, so redundant
    /// initialization never produces duplicate entries.
    pub(crate) fn set_identity(
        &self,
        identity: TypeIdentity,
        erased: Arc<dyn DynRegistration>,
    ) -> Result<()> {
        let newly_set = self.identity.set(identity.clone())?;
        if newly_set {
            let tag = identity.simple_name();
            for abstract_name in identity.chain() {
                self.registry.register(abstract_name, tag, erased.clone())?;
            }
        }
        Ok(())
    }

    /// The registry this core publishes to.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

/// A type-erased registration, as stored in the registry.
///
/// Polymorphic decoding resolves a tag to one of these and hands it the
/// cursor; the registration reads its full wire form (tag included) and
/// returns the value behind `Any`. Writing goes the other way: the caller
/// passes the concrete value behind an `Any` reference and the registration
/// downcasts it before delegating to its codec.
pub trait DynRegistration: Send + Sync + fmt::Debug {
    /// The wire tag; fails while the identity is unset.
    fn tag_name(&self) -> Result<TypeName>;

    /// The configured identity; fails while unset.
    fn identity(&self) -> Result<TypeIdentity>;

    /// Number of fields in the product this registration describes.
    fn arity(&self) -> usize;

    /// True once identity and components are both configured.
    fn is_configured(&self) -> bool;

    /// Reads one full value (tag included) and returns it type-erased.
    fn read_value(&self, input: &mut TextInput<'_>) -> Result<Box<dyn Any>>;

    /// Writes a type-erased value.
    ///
    /// Fails with an internal error if `value` is not of this registration's
    /// concrete type; that indicates a registry/caller mismatch, not bad data.
    fn write_value(&self, output: &mut TextOutput, value: &dyn Any) -> Result<()>;
}

/// Shared helper for [`DynRegistration::write_value`] impls.
pub(crate) fn downcast_for_write<'v, T: 'static>(
    tag: TypeName,
    value: &'v dyn Any,
) -> Result<&'v T> {
    value.downcast_ref::<T>().ok_or_else(|| {
        TagcodeError::Internal(format!(
            "value passed to registration {:?} has a different concrete type",
            tag.as_str()
        ))
    })
}
