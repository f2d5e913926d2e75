#![allow(missing_docs)]

use std::sync::Arc;

use tagcode::{
    Arity0, Arity1, Arity2, FieldType, FloatCodec, IntCodec, Registry, StringCodec, Tagcode,
    TagcodeError, TypeIdentity, TypeName,
};

// --- FIXTURE TYPES ---

#[derive(Debug, Clone, PartialEq)]
struct Empty;

#[derive(Debug, Clone, PartialEq)]
struct Package {
    weight: i64,
}

#[derive(Debug, Clone, PartialEq)]
struct Pair {
    first: String,
    second: i64,
}

#[derive(Debug, Clone, PartialEq)]
struct Wrapper {
    inner: Package,
}

fn empty_registration(registry: &Arc<Registry>) -> tagcode::Result<Arc<Arity0<Empty>>> {
    let registration = Arity0::with_registry(registry.clone(), || Empty);
    registration.set_identity(TypeIdentity::new(TypeName::new("Empty")))?;
    Ok(registration)
}

fn package_registration(registry: &Arc<Registry>) -> tagcode::Result<Arc<Arity1<Package, i64>>> {
    let registration = Arity1::with_registry(
        registry.clone(),
        |weight| Package { weight },
        |package: &Package| &package.weight,
    );
    registration.set_components(i64::codec())?;
    registration.set_identity(TypeIdentity::new(TypeName::new("Package")))?;
    Ok(registration)
}

fn pair_registration(registry: &Arc<Registry>) -> tagcode::Result<Arc<Arity2<Pair, String, i64>>> {
    let registration = Arity2::with_registry(
        registry.clone(),
        |first, second| Pair { first, second },
        |pair: &Pair| (&pair.first, &pair.second),
    );
    registration.set_components(String::codec(), i64::codec())?;
    registration.set_identity(TypeIdentity::new(TypeName::new("Pair")))?;
    Ok(registration)
}

// --- TESTS ---

/// A nullary product serializes to exactly `Tag()` and nothing else.
#[test]
fn test_empty_exact_literal() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = empty_registration(&registry)?;

    let text = Tagcode::encode(registration.as_ref(), &Empty)?;
    assert_eq!(text, "Empty()");

    let back: Empty = Tagcode::decode(registration.as_ref(), "Empty()")?;
    assert_eq!(back, Empty);
    Ok(())
}

/// Anything other than the exact literal is a parse error.
#[test]
fn test_empty_rejects_other_text() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = empty_registration(&registry)?;

    for bad in ["Empty", "Empty(", "Empty{}", "empty()", "Emptyy()", ""] {
        let err = Tagcode::decode(registration.as_ref(), bad).unwrap_err();
        assert!(
            matches!(err, TagcodeError::Parse(_)),
            "expected parse error for {bad:?}, got {err}"
        );
    }
    Ok(())
}

#[test]
fn test_single_field_roundtrip() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = package_registration(&registry)?;

    let value = Package { weight: 5 };
    let text = Tagcode::encode(registration.as_ref(), &value)?;
    assert_eq!(text, "Package(5)");

    let back: Package = Tagcode::decode(registration.as_ref(), &text)?;
    assert_eq!(back, value);
    Ok(())
}

#[test]
fn test_negative_field_roundtrip() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = package_registration(&registry)?;

    let value = Package { weight: -314 };
    let text = Tagcode::encode(registration.as_ref(), &value)?;
    assert_eq!(text, "Package(-314)");
    assert_eq!(Tagcode::decode::<Package, _>(registration.as_ref(), &text)?, value);
    Ok(())
}

/// Field order on the wire is declaration order, pinned with two
/// differently-typed fields so a swap cannot cancel out.
#[test]
fn test_pair_field_order_preserved() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = pair_registration(&registry)?;

    let value = Pair {
        first: "a".to_string(),
        second: 1,
    };
    let text = Tagcode::encode(registration.as_ref(), &value)?;
    assert_eq!(text, "Pair(a,1)");

    let back: Pair = Tagcode::decode(registration.as_ref(), &text)?;
    assert_eq!(back, value);

    // The swapped text must not parse: the integer slot sees "a".
    let err = Tagcode::decode::<Pair, _>(registration.as_ref(), "Pair(1,a)").unwrap_err();
    assert!(matches!(err, TagcodeError::Parse(_)));
    Ok(())
}

#[test]
fn test_write_is_deterministic() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = pair_registration(&registry)?;

    let value = Pair {
        first: "payload".to_string(),
        second: 42,
    };
    let first = Tagcode::encode(registration.as_ref(), &value)?;
    let second = Tagcode::encode(registration.as_ref(), &value)?;
    assert_eq!(first, second);
    Ok(())
}

/// Product codecs compose: a product can be the field of another product.
#[test]
fn test_nested_products() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let package = package_registration(&registry)?;

    let wrapper = Arity1::with_registry(
        registry.clone(),
        |inner| Wrapper { inner },
        |wrapper: &Wrapper| &wrapper.inner,
    );
    wrapper.set_components(package.codec()?)?;
    wrapper.set_identity(TypeIdentity::new(TypeName::new("Wrapper")))?;

    let value = Wrapper {
        inner: Package { weight: 7 },
    };
    let text = Tagcode::encode(wrapper.as_ref(), &value)?;
    assert_eq!(text, "Wrapper(Package(7))");

    let back: Wrapper = Tagcode::decode(wrapper.as_ref(), &text)?;
    assert_eq!(back, value);
    Ok(())
}

/// Missing delimiters fail with a parse error, never a partial value.
#[test]
fn test_malformed_inputs_rejected() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let package = package_registration(&registry)?;
    let pair = pair_registration(&registry)?;

    for bad in ["Package 5)", "Package(5", "Package()", "Package[5]"] {
        let err = Tagcode::decode::<Package, _>(package.as_ref(), bad).unwrap_err();
        assert!(
            matches!(err, TagcodeError::Parse(_)),
            "expected parse error for {bad:?}, got {err}"
        );
    }
    for bad in ["Pair(a 1)", "Pair(a,1", "Pair(a,x)"] {
        let err = Tagcode::decode::<Pair, _>(pair.as_ref(), bad).unwrap_err();
        assert!(matches!(err, TagcodeError::Parse(_)));
    }
    Ok(())
}

#[test]
fn test_trailing_input_rejected() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = empty_registration(&registry)?;

    let err = Tagcode::decode::<Empty, _>(registration.as_ref(), "Empty()x").unwrap_err();
    match err {
        TagcodeError::Parse(msg) => assert!(msg.contains("trailing"), "unexpected message: {msg}"),
        other => return Err(other),
    }
    Ok(())
}

/// Parse errors report the offset of the character that failed to match.
#[test]
fn test_parse_error_reports_offset() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    let registration = package_registration(&registry)?;

    let err = Tagcode::decode::<Package, _>(registration.as_ref(), "Package 5)").unwrap_err();
    match err {
        TagcodeError::Parse(msg) => {
            assert!(msg.contains("offset 7"), "unexpected message: {msg}");
        }
        other => return Err(other),
    }
    Ok(())
}

/// A codec used before its registration is configured fails with a
/// configuration error, not a panic or garbage output.
#[test]
fn test_unconfigured_codec_fails() {
    let registry = Arc::new(Registry::new());
    let registration = Arity1::with_registry(
        registry,
        |weight| Package { weight },
        |package: &Package| &package.weight,
    );

    let err = Tagcode::encode(registration.as_ref(), &Package { weight: 1 }).unwrap_err();
    assert!(matches!(err, TagcodeError::Configuration(_)));

    let err = Tagcode::decode::<Package, _>(registration.as_ref(), "Package(1)").unwrap_err();
    assert!(matches!(err, TagcodeError::Configuration(_)));
}

// --- PRIMITIVE CODECS ---

#[test]
fn test_primitive_int_codec() -> tagcode::Result<()> {
    assert_eq!(Tagcode::encode(&IntCodec, &-42)?, "-42");
    assert_eq!(Tagcode::decode::<i64, _>(&IntCodec, "-42")?, -42);

    let err = Tagcode::decode::<i64, _>(&IntCodec, "4x2").unwrap_err();
    assert!(matches!(err, TagcodeError::Parse(_)));
    Ok(())
}

#[test]
fn test_primitive_float_codec() -> tagcode::Result<()> {
    assert_eq!(Tagcode::encode(&FloatCodec, &2.5)?, "2.5");
    assert_eq!(Tagcode::decode::<f64, _>(&FloatCodec, "2.5")?, 2.5);
    assert_eq!(Tagcode::decode::<f64, _>(&FloatCodec, "1e3")?, 1000.0);

    let err = Tagcode::decode::<f64, _>(&FloatCodec, "..").unwrap_err();
    assert!(matches!(err, TagcodeError::Parse(_)));
    Ok(())
}

#[test]
fn test_primitive_string_codec_stops_at_delimiters() -> tagcode::Result<()> {
    let mut input = tagcode::TextInput::new("hello,world)");
    let codec = StringCodec;
    let first = tagcode::Codec::read(&codec, &mut input)?;
    assert_eq!(first, "hello");
    assert_eq!(input.remaining(), ",world)");
    Ok(())
}
