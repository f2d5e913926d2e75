//! Polymorphic round-trip over a small shape family.
//!
//! Run with: `cargo run --example shapes`

use std::any::Any;
use std::error::Error;

use tagcode::{PolyCodec, Polymorphic, Tagcode, TagcodeError, TagcodeProduct, TypeName};

#[derive(Debug, Clone, PartialEq, TagcodeProduct)]
#[tagcode(implements(Shape))]
struct Circle {
    radius: f64,
}

#[derive(Debug, Clone, PartialEq, TagcodeProduct)]
#[tagcode(implements(Shape))]
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

fn main() -> Result<(), Box<dyn Error>> {
    // Touch the registrations so the subtypes are known to the registry.
    let _ = Circle::registration();
    let _ = Square::registration();

    let codec = PolyCodec::<Shape>::new();
    for text in ["Circle(2.5)", "Square(4)"] {
        let shape: Shape = Tagcode::decode(&codec, text)?;
        let back = Tagcode::encode(&codec, &shape)?;
        println!("{text} -> {shape:?} -> {back}");
    }
    Ok(())
}
