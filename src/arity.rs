//! The arity-specific product builders.
//!
//! Each builder owns the wire grammar for one field count and assembles the
//! type's codec from its tag name plus the child codecs held in its component
//! slot:
//!
//! ```text
//! nullary   Tag()
//! unary     Tag(field1)
//! binary    Tag(field1,field2)
//! ```
//!
//! Builders are created unconfigured and completed through the write-once
//! protocol: [`set_identity`](Arity1::set_identity) publishes the type to the
//! registry, [`set_components`](Arity1::set_components) supplies the child
//! codecs. Both calls tolerate idempotent repetition with equal values.
//!
//! Construction and field extraction are explicit capabilities supplied as
//! plain function pointers. Extractors must return the constructor arguments
//! exactly as originally passed, in declaration order; returning borrows of
//! the stored fields gives that for free.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::codec::{Codec, SharedCodec};
use crate::constants::{CLOSE_DELIMITER, EMPTY_BODY, FIELD_SEPARATOR, OPEN_DELIMITER};
use crate::error::{Result, TagcodeError};
use crate::identity::{TypeIdentity, TypeName};
use crate::io::{TextInput, TextOutput};
use crate::registration::{
    downcast_for_write, Component, ComponentPair, DynRegistration, NoComponents, RegistrationCore,
};
use crate::registry::Registry;

fn dropped_registration() -> TagcodeError {
    TagcodeError::Internal("registration dropped while still in use".to_string())
}

// --- Arity 0 ---

/// Builder for a product type with no fields. Wire form: `Tag()`.
///
/// Nullary products have a unit-shaped component slot that is preset at
/// construction; only the identity remains to be configured.
pub struct Arity0<T> {
    core: RegistrationCore<NoComponents>,
    ctor: fn() -> T,
    weak: Weak<Arity0<T>>,
}

impl<T> fmt::Debug for Arity0<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arity0").finish_non_exhaustive()
    }
}

impl<T: 'static> Arity0<T> {
    /// Creates an unconfigured builder against the global registry.
    pub fn new(ctor: fn() -> T) -> Arc<Self> {
        Self::with_registry(Registry::global(), ctor)
    }

    /// Creates an unconfigured builder against an explicit registry.
    pub fn with_registry(registry: Arc<Registry>, ctor: fn() -> T) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            core: RegistrationCore::with_preset_components(registry, NoComponents),
            ctor,
            weak: weak.clone(),
        })
    }

    /// Declares the type's identity, publishing it to the registry.
    pub fn set_identity(&self, identity: TypeIdentity) -> Result<()> {
        self.core.set_identity(identity, self.erased()?)
    }

    /// The configured identity.
    pub fn identity(&self) -> Result<TypeIdentity> {
        self.core.identity()
    }

    /// The wire tag, derived from the identity's simple name.
    pub fn tag_name(&self) -> Result<TypeName> {
        self.core.tag_name()
    }

    /// The assembled codec for the whole type. Requires the identity to be set.
    pub fn codec(&self) -> Result<SharedCodec<T>> {
        self.core.identity()?;
        let strong = self.weak.upgrade().ok_or_else(dropped_registration)?;
        Ok(strong)
    }

    fn erased(&self) -> Result<Arc<dyn DynRegistration>> {
        let strong = self.weak.upgrade().ok_or_else(dropped_registration)?;
        Ok(strong)
    }
}

impl<T: 'static> Codec<T> for Arity0<T> {
    fn read(&self, input: &mut TextInput<'_>) -> Result<T> {
        let tag = self.core.tag_name()?;
        input.expect(tag.as_str())?;
        input.expect(EMPTY_BODY)?;
        Ok((self.ctor)())
    }

    fn write(&self, output: &mut TextOutput, _value: &T) -> Result<()> {
        let tag = self.core.tag_name()?;
        output.append(tag.as_str());
        output.append(EMPTY_BODY);
        Ok(())
    }
}

impl<T: 'static> DynRegistration for Arity0<T> {
    fn tag_name(&self) -> Result<TypeName> {
        self.core.tag_name()
    }

    fn identity(&self) -> Result<TypeIdentity> {
        self.core.identity()
    }

    fn arity(&self) -> usize {
        0
    }

    fn is_configured(&self) -> bool {
        self.core.is_configured()
    }

    fn read_value(&self, input: &mut TextInput<'_>) -> Result<Box<dyn Any>> {
        Ok(Box::new(Codec::read(self, input)?))
    }

    fn write_value(&self, output: &mut TextOutput, value: &dyn Any) -> Result<()> {
        let concrete = downcast_for_write::<T>(self.core.tag_name()?, value)?;
        Codec::write(self, output, concrete)
    }
}

// --- Arity 1 ---

/// Builder for a product type with one field. Wire form: `Tag(field1)`.
pub struct Arity1<T, A: 'static> {
    core: RegistrationCore<Component<A>>,
    ctor: fn(A) -> T,
    extract: fn(&T) -> &A,
    weak: Weak<Arity1<T, A>>,
}

impl<T, A> fmt::Debug for Arity1<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arity1").finish_non_exhaustive()
    }
}

impl<T: 'static, A: 'static> Arity1<T, A> {
    /// Creates an unconfigured builder against the global registry.
    ///
    /// `ctor` builds a value from its single constructor argument; `extract`
    /// returns that argument back out of a constructed value.
    pub fn new(ctor: fn(A) -> T, extract: fn(&T) -> &A) -> Arc<Self> {
        Self::with_registry(Registry::global(), ctor, extract)
    }

    /// Creates an unconfigured builder against an explicit registry.
    pub fn with_registry(
        registry: Arc<Registry>,
        ctor: fn(A) -> T,
        extract: fn(&T) -> &A,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            core: RegistrationCore::new(registry),
            ctor,
            extract,
            weak: weak.clone(),
        })
    }

    /// Declares the type's identity, publishing it to the registry.
    pub fn set_identity(&self, identity: TypeIdentity) -> Result<()> {
        self.core.set_identity(identity, self.erased()?)
    }

    /// Supplies the child codec for the field (set-once-or-equal).
    pub fn set_components(&self, field: SharedCodec<A>) -> Result<()> {
        self.core.set_components(Component::new(field))
    }

    /// The configured identity.
    pub fn identity(&self) -> Result<TypeIdentity> {
        self.core.identity()
    }

    /// The wire tag, derived from the identity's simple name.
    pub fn tag_name(&self) -> Result<TypeName> {
        self.core.tag_name()
    }

    /// The configured child codec.
    pub fn component(&self) -> Result<SharedCodec<A>> {
        Ok(self.core.components()?.field().clone())
    }

    /// The assembled codec for the whole type. Requires identity and
    /// components to both be set.
    pub fn codec(&self) -> Result<SharedCodec<T>> {
        self.core.identity()?;
        self.core.components()?;
        let strong = self.weak.upgrade().ok_or_else(dropped_registration)?;
        Ok(strong)
    }

    fn erased(&self) -> Result<Arc<dyn DynRegistration>> {
        let strong = self.weak.upgrade().ok_or_else(dropped_registration)?;
        Ok(strong)
    }
}

impl<T: 'static, A: 'static> Codec<T> for Arity1<T, A> {
    fn read(&self, input: &mut TextInput<'_>) -> Result<T> {
        let tag = self.core.tag_name()?;
        let components = self.core.components()?;
        input.expect(tag.as_str())?;
        input.expect(OPEN_DELIMITER)?;
        let field = components.field().read(input)?;
        input.expect(CLOSE_DELIMITER)?;
        Ok((self.ctor)(field))
    }

    fn write(&self, output: &mut TextOutput, value: &T) -> Result<()> {
        let tag = self.core.tag_name()?;
        let components = self.core.components()?;
        output.append(tag.as_str());
        output.append(OPEN_DELIMITER);
        components.field().write(output, (self.extract)(value))?;
        output.append(CLOSE_DELIMITER);
        Ok(())
    }
}

impl<T: 'static, A: 'static> DynRegistration for Arity1<T, A> {
    fn tag_name(&self) -> Result<TypeName> {
        self.core.tag_name()
    }

    fn identity(&self) -> Result<TypeIdentity> {
        self.core.identity()
    }

    fn arity(&self) -> usize {
        1
    }

    fn is_configured(&self) -> bool {
        self.core.is_configured()
    }

    fn read_value(&self, input: &mut TextInput<'_>) -> Result<Box<dyn Any>> {
        Ok(Box::new(Codec::read(self, input)?))
    }

    fn write_value(&self, output: &mut TextOutput, value: &dyn Any) -> Result<()> {
        let concrete = downcast_for_write::<T>(self.core.tag_name()?, value)?;
        Codec::write(self, output, concrete)
    }
}

// --- Arity 2 ---

/// Builder for a product type with two fields. Wire form: `Tag(field1,field2)`.
///
/// Field order on the wire is declaration order: the first constructor
/// argument is written first and read first. The extractor must return the
/// pair in that same order.
pub struct Arity2<T, A: 'static, B: 'static> {
    core: RegistrationCore<ComponentPair<A, B>>,
    ctor: fn(A, B) -> T,
    extract: fn(&T) -> (&A, &B),
    weak: Weak<Arity2<T, A, B>>,
}

impl<T, A, B> fmt::Debug for Arity2<T, A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arity2").finish_non_exhaustive()
    }
}

impl<T: 'static, A: 'static, B: 'static> Arity2<T, A, B> {
    /// Creates an unconfigured builder against the global registry.
    pub fn new(ctor: fn(A, B) -> T, extract: fn(&T) -> (&A, &B)) -> Arc<Self> {
        Self::with_registry(Registry::global(), ctor, extract)
    }

    /// Creates an unconfigured builder against an explicit registry.
    pub fn with_registry(
        registry: Arc<Registry>,
        ctor: fn(A, B) -> T,
        extract: fn(&T) -> (&A, &B),
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            core: RegistrationCore::new(registry),
            ctor,
            extract,
            weak: weak.clone(),
        })
    }

    /// Declares the type's identity, publishing it to the registry.
    pub fn set_identity(&self, identity: TypeIdentity) -> Result<()> {
        self.core.set_identity(identity, self.erased()?)
    }

    /// Supplies both child codecs, in constructor-argument order
    /// (set-once-or-equal).
    pub fn set_components(&self, first: SharedCodec<A>, second: SharedCodec<B>) -> Result<()> {
        self.core.set_components(ComponentPair::new(first, second))
    }

    /// The configured identity.
    pub fn identity(&self) -> Result<TypeIdentity> {
        self.core.identity()
    }

    /// The wire tag, derived from the identity's simple name.
    pub fn tag_name(&self) -> Result<TypeName> {
        self.core.tag_name()
    }

    /// The configured child codecs, in constructor-argument order.
    pub fn components(&self) -> Result<(SharedCodec<A>, SharedCodec<B>)> {
        let pair = self.core.components()?;
        Ok((pair.first().clone(), pair.second().clone()))
    }

    /// The assembled codec for the whole type. Requires identity and
    /// components to both be set.
    pub fn codec(&self) -> Result<SharedCodec<T>> {
        self.core.identity()?;
        self.core.components()?;
        let strong = self.weak.upgrade().ok_or_else(dropped_registration)?;
        Ok(strong)
    }

    fn erased(&self) -> Result<Arc<dyn DynRegistration>> {
        let strong = self.weak.upgrade().ok_or_else(dropped_registration)?;
        Ok(strong)
    }
}

impl<T: 'static, A: 'static, B: 'static> Codec<T> for Arity2<T, A, B> {
    fn read(&self, input: &mut TextInput<'_>) -> Result<T> {
        let tag = self.core.tag_name()?;
        let components = self.core.components()?;
        input.expect(tag.as_str())?;
        input.expect(OPEN_DELIMITER)?;
        let first = components.first().read(input)?;
        input.expect(FIELD_SEPARATOR)?;
        let second = components.second().read(input)?;
        input.expect(CLOSE_DELIMITER)?;
        Ok((self.ctor)(first, second))
    }

    fn write(&self, output: &mut TextOutput, value: &T) -> Result<()> {
        let tag = self.core.tag_name()?;
        let components = self.core.components()?;
        let (first, second) = (self.extract)(value);
        output.append(tag.as_str());
        output.append(OPEN_DELIMITER);
        components.first().write(output, first)?;
        output.append(FIELD_SEPARATOR);
        components.second().write(output, second)?;
        output.append(CLOSE_DELIMITER);
        Ok(())
    }
}

impl<T: 'static, A: 'static, B: 'static> DynRegistration for Arity2<T, A, B> {
    fn tag_name(&self) -> Result<TypeName> {
        self.core.tag_name()
    }

    fn identity(&self) -> Result<TypeIdentity> {
        self.core.identity()
    }

    fn arity(&self) -> usize {
        2
    }

    fn is_configured(&self) -> bool {
        self.core.is_configured()
    }

    fn read_value(&self, input: &mut TextInput<'_>) -> Result<Box<dyn Any>> {
        Ok(Box::new(Codec::read(self, input)?))
    }

    fn write_value(&self, output: &mut TextOutput, value: &dyn Any) -> Result<()> {
        let concrete = downcast_for_write::<T>(self.core.tag_name()?, value)?;
        Codec::write(self, output, concrete)
    }
}
