#![allow(missing_docs)]

use std::any::Any;
use std::sync::Arc;

use tagcode::{
    Arity0, Arity1, DynRegistration, FieldType, PolyCodec, Polymorphic, Registry,
    RegistryInspector, Tagcode, TagcodeError, TypeIdentity, TypeName,
};

// --- FIXTURE TYPES ---

#[derive(Debug, Clone, PartialEq)]
struct Circle {
    radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Square {
    side: i64,
}

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Circle(Circle),
    Square(Square),
}

impl Polymorphic for Shape {
    fn abstract_name() -> TypeName {
        TypeName::new("Shape")
    }

    fn from_concrete(value: Box<dyn Any>) -> tagcode::Result<Self> {
        let value = match value.downcast::<Circle>() {
            Ok(circle) => return Ok(Shape::Circle(*circle)),
            Err(value) => value,
        };
        match value.downcast::<Square>() {
            Ok(square) => Ok(Shape::Square(*square)),
            Err(_) => Err(TagcodeError::Internal(
                "decoded subtype is not a Shape".to_string(),
            )),
        }
    }

    fn concrete_tag(&self) -> TypeName {
        match self {
            Shape::Circle(_) => TypeName::new("Circle"),
            Shape::Square(_) => TypeName::new("Square"),
        }
    }

    fn concrete_value(&self) -> &dyn Any {
        match self {
            Shape::Circle(circle) => circle,
            Shape::Square(square) => square,
        }
    }
}

type ShapeRegistrations = (Arc<Arity1<Circle, f64>>, Arc<Arity1<Square, i64>>);

fn register_shapes(registry: &Arc<Registry>) -> tagcode::Result<ShapeRegistrations> {
    let circle = Arity1::with_registry(
        registry.clone(),
        |radius| Circle { radius },
        |circle: &Circle| &circle.radius,
    );
    circle.set_components(f64::codec())?;
    circle.set_identity(TypeIdentity::new(TypeName::new("Circle")).implements(TypeName::new("Shape")))?;

    let square = Arity1::with_registry(
        registry.clone(),
        |side| Square { side },
        |square: &Square| &square.side,
    );
    square.set_components(i64::codec())?;
    square.set_identity(TypeIdentity::new(TypeName::new("Square")).implements(TypeName::new("Shape")))?;

    Ok((circle, square))
}

// --- TESTS ---

#[test]
fn test_resolve_registered_subtype() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    register_shapes(&registry)?;

    let resolved = registry.resolve(TypeName::new("Shape"), "Circle")?;
    assert_eq!(resolved.tag_name()?.as_str(), "Circle");
    assert_eq!(resolved.arity(), 1);
    Ok(())
}

#[test]
fn test_resolve_unknown_tag_fails() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    register_shapes(&registry)?;

    let err = registry
        .resolve(TypeName::new("Shape"), "Triangle")
        .unwrap_err();
    match err {
        TagcodeError::Lookup(msg) => {
            assert!(msg.contains("Triangle"), "unexpected message: {msg}");
            assert!(msg.contains("Shape"), "unexpected message: {msg}");
        }
        other => return Err(other),
    }
    Ok(())
}

/// A type is registered under its own name too, not only its supertypes.
#[test]
fn test_registered_under_own_name() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    register_shapes(&registry)?;

    let resolved = registry.resolve(TypeName::new("Circle"), "Circle")?;
    assert_eq!(resolved.tag_name()?.as_str(), "Circle");
    Ok(())
}

#[test]
fn test_polymorphic_roundtrip() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    register_shapes(&registry)?;
    let codec = PolyCodec::<Shape>::with_registry(registry);

    let circle = Shape::Circle(Circle { radius: 2.5 });
    let text = Tagcode::encode(&codec, &circle)?;
    assert_eq!(text, "Circle(2.5)");
    assert_eq!(Tagcode::decode::<Shape, _>(&codec, &text)?, circle);

    let square: Shape = Tagcode::decode(&codec, "Square(4)")?;
    assert_eq!(square, Shape::Square(Square { side: 4 }));
    Ok(())
}

/// The emitted text always begins with the concrete type's tag, regardless
/// of the abstract viewpoint.
#[test]
fn test_tag_fidelity() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    register_shapes(&registry)?;
    let codec = PolyCodec::<Shape>::with_registry(registry);

    let text = Tagcode::encode(&codec, &Shape::Square(Square { side: 9 }))?;
    assert!(text.starts_with("Square"), "unexpected text: {text}");
    Ok(())
}

#[test]
fn test_decoding_unknown_tag_fails() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    register_shapes(&registry)?;
    let codec = PolyCodec::<Shape>::with_registry(registry);

    let err = Tagcode::decode::<Shape, _>(&codec, "Triangle(1)").unwrap_err();
    assert!(matches!(err, TagcodeError::Lookup(_)));
    Ok(())
}

/// Duplicate tags append; resolution keeps returning the first registration.
#[test]
fn test_first_match_wins_on_duplicates() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    register_shapes(&registry)?;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeCircle;

    let fake = Arity0::with_registry(registry.clone(), || FakeCircle);
    fake.set_identity(TypeIdentity::new(TypeName::new("Circle")).implements(TypeName::new("Shape")))?;

    assert_eq!(registry.tags(TypeName::new("Shape"))?.len(), 3);
    let resolved = registry.resolve(TypeName::new("Shape"), "Circle")?;
    assert_eq!(resolved.arity(), 1, "the original registration must win");
    Ok(())
}

/// Registrations against an isolated registry are invisible to the global one.
#[test]
fn test_isolated_registry_does_not_leak_into_global() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    register_shapes(&registry)?;

    let err = Registry::global()
        .resolve(TypeName::new("Shape"), "Circle")
        .unwrap_err();
    assert!(matches!(err, TagcodeError::Lookup(_)));
    Ok(())
}

/// The inspector reports every (abstract, tag) pair as inserted, sorted by
/// abstract name for determinism.
#[test]
fn test_inspector_report() -> tagcode::Result<()> {
    let registry = Arc::new(Registry::new());
    register_shapes(&registry)?;

    let report = RegistryInspector::inspect(&registry)?;
    let names: Vec<&str> = report
        .abstract_types
        .iter()
        .map(|section| section.name.as_str())
        .collect();
    assert_eq!(names, ["Circle", "Shape", "Square"]);

    let shape = &report.abstract_types[1];
    let tags: Vec<&str> = shape.subtypes.iter().map(|s| s.tag.as_str()).collect();
    assert_eq!(tags, ["Circle", "Square"]);
    assert!(shape.subtypes.iter().all(|s| s.configured));

    let json = serde_json::to_string(&report).expect("report serializes");
    assert!(json.contains("\"Shape\""));
    Ok(())
}
