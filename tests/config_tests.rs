#![allow(missing_docs)]

use std::sync::Arc;

use tagcode::{
    Arity1, FieldType, IntCodec, Registry, SharedCodec, TagcodeError, TypeIdentity, TypeName,
};

#[derive(Debug, Clone, PartialEq)]
struct Counter {
    value: i64,
}

fn builder(registry: &Arc<Registry>) -> Arc<Arity1<Counter, i64>> {
    Arity1::with_registry(
        registry.clone(),
        |value| Counter { value },
        |counter: &Counter| &counter.value,
    )
}

// --- TESTS ---

/// Re-declaring an equal identity is a silent no-op, and does not produce
/// duplicate registry entries.
#[test]
fn test_identity_set_twice_equal_is_noop() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = builder(&registry);

    let identity = TypeIdentity::new(TypeName::new("Counter")).implements(TypeName::new("Metric"));
    registration.set_identity(identity.clone())?;
    registration.set_identity(identity)?;

    assert_eq!(registry.tags(TypeName::new("Metric"))?.len(), 1);
    assert_eq!(registry.tags(TypeName::new("Counter"))?.len(), 1);
    Ok(())
}

/// Declaring a different identity is a configuration error.
#[test]
fn test_identity_conflict_rejected() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = builder(&registry);

    registration.set_identity(TypeIdentity::new(TypeName::new("Counter")))?;
    let err = registration
        .set_identity(TypeIdentity::new(TypeName::new("Recounter")))
        .unwrap_err();
    assert!(matches!(err, TagcodeError::Configuration(_)));
    Ok(())
}

/// The supertype chain is part of the identity: same name, different chain
/// still conflicts.
#[test]
fn test_identity_chain_is_part_of_equality() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = builder(&registry);

    registration.set_identity(TypeIdentity::new(TypeName::new("Counter")))?;
    let err = registration
        .set_identity(TypeIdentity::new(TypeName::new("Counter")).implements(TypeName::new("Metric")))
        .unwrap_err();
    assert!(matches!(err, TagcodeError::Configuration(_)));
    Ok(())
}

/// Components re-set with the same shared handle are accepted.
#[test]
fn test_components_same_handle_idempotent() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = builder(&registry);

    let codec: SharedCodec<i64> = Arc::new(IntCodec);
    registration.set_components(codec.clone())?;
    registration.set_components(codec)?;
    Ok(())
}

/// A different handle conflicts, even for a behaviorally identical codec:
/// codecs are opaque, so equality is instance identity.
#[test]
fn test_components_different_handle_conflicts() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = builder(&registry);

    registration.set_components(Arc::new(IntCodec))?;
    let err = registration.set_components(Arc::new(IntCodec)).unwrap_err();
    assert!(matches!(err, TagcodeError::Configuration(_)));
    Ok(())
}

/// The default field codecs are cached, so redundant registration through
/// `FieldType` stays idempotent.
#[test]
fn test_field_type_codecs_are_cached() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = builder(&registry);

    registration.set_components(i64::codec())?;
    registration.set_components(i64::codec())?;
    Ok(())
}

/// Every accessor fails with a configuration error until its setter has run.
#[test]
fn test_access_before_configuration_fails() {
    let registry = Arc::new(Registry::new());
    let registration = builder(&registry);

    assert!(matches!(
        registration.identity().unwrap_err(),
        TagcodeError::Configuration(_)
    ));
    assert!(matches!(
        registration.tag_name().unwrap_err(),
        TagcodeError::Configuration(_)
    ));
    assert!(matches!(
        registration.component().unwrap_err(),
        TagcodeError::Configuration(_)
    ));
    assert!(matches!(
        registration.codec().unwrap_err(),
        TagcodeError::Configuration(_)
    ));
}

/// The assembled codec requires both identity and components.
#[test]
fn test_codec_requires_both_slots() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = builder(&registry);

    registration.set_identity(TypeIdentity::new(TypeName::new("Counter")))?;
    assert!(matches!(
        registration.codec().unwrap_err(),
        TagcodeError::Configuration(_)
    ));

    registration.set_components(i64::codec())?;
    assert!(registration.codec().is_ok());
    Ok(())
}
