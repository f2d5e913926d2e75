//! # Tagcode
//!
//! A type-driven, bidirectional, text-based serialization framework. For a
//! family of product-like value types — nullary, one-field and two-field
//! constructors — Tagcode assembles a printer/parser pair automatically from
//! the per-field codecs, and registers each concrete type under every
//! abstract type it implements, so a value of the abstract type can be
//! serialized and, crucially, deserialized back to the correct concrete
//! subtype by reading a type tag from the text.
//!
//! ## Overview
//!
//! Three mechanisms carry the framework:
//!
//! *   **A compositional grammar.** Every product type serializes as its tag
//!     followed by a parenthesized field list: `Empty()`, `Label(hi)`,
//!     `Pair(a,1)`. Fields are written by child codecs, which may themselves
//!     be product codecs — the grammar nests to arbitrary depth and
//!     round-trips exactly.
//! *   **A write-once configuration protocol.** A type declares its identity
//!     and its component codecs once, typically during static initialization.
//!     Re-declaring with equal values is a tolerated no-op (redundant
//!     initialization order is harmless); re-declaring with different values
//!     is a configuration error, surfaced immediately.
//! *   **A process-wide registry.** Declaring an identity publishes the
//!     registration under every abstract type in its supertype chain. A
//!     [`PolyCodec`] later reads a leading tag from the input, resolves it
//!     against the registry and delegates the rest of the parse to the
//!     matching registration.
//!
//! ## Architecture
//!
//! ### Builders
//!
//! [`Arity0`], [`Arity1`] and [`Arity2`] each define the wire grammar for one
//! field count. A builder is constructed with its type's constructor function
//! and (for arities above zero) a field extractor returning the constructor
//! arguments back out of a value, in declaration order. The builder itself
//! implements [`Codec`] for the whole type.
//!
//! ### Registry
//!
//! The [`Registry`] maps an abstract type's name to the insertion-ordered
//! list of `(tag, registration)` pairs that satisfy it. It is append-only
//! and never pruned; after initialization quiesces, lookups are read-only
//! and safely concurrent. Use [`Registry::global`] for the process-wide
//! instance or [`Registry::new`] for an isolated one (tests).
//!
//! ### Errors
//!
//! All failures flow through [`TagcodeError`]: configuration protocol
//! violations, grammar mismatches (with offset and offending snippet) and
//! failed tag lookups (naming the tag and the abstract type). Every error is
//! terminal for the operation that raised it; see the [`error`] module.
//!
//! ## Usage Patterns
//!
//! ### Deriving a product type
//!
//! ```rust,ignore
//! use tagcode::{PolyCodec, Tagcode, TagcodeProduct};
//!
//! #[derive(Debug, Clone, PartialEq, TagcodeProduct)]
//! #[tagcode(implements(Shape))]
//! struct Circle {
//!     radius: f64,
//! }
//!
//! let text = Tagcode::encode(Circle::registration().as_ref(), &Circle { radius: 2.5 })?;
//! assert_eq!(text, "Circle(2.5)");
//! ```
//!
//! ### Building a registration by hand
//!
//! ```rust
//! use std::sync::Arc;
//! use tagcode::{Arity1, FieldType, Registry, Tagcode, TypeIdentity, TypeName};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Label {
//!     text: String,
//! }
//!
//! # fn main() -> tagcode::Result<()> {
//! let registry = Arc::new(Registry::new());
//! let registration = Arity1::with_registry(
//!     registry,
//!     |text| Label { text },
//!     |label: &Label| &label.text,
//! );
//! registration.set_components(String::codec())?;
//! registration.set_identity(TypeIdentity::new(TypeName::new("Label")))?;
//!
//! let codec = registration.codec()?;
//! let text = Tagcode::encode(codec.as_ref(), &Label { text: "hi".into() })?;
//! assert_eq!(text, "Label(hi)");
//!
//! let back: Label = Tagcode::decode(codec.as_ref(), &text)?;
//! assert_eq!(back, Label { text: "hi".into() });
//! # Ok(())
//! # }
//! ```
//!
//! ### Polymorphic decoding
//!
//! ```rust,ignore
//! // With Circle and Square registered under Shape:
//! let codec = PolyCodec::<Shape>::new();
//! let shape: Shape = Tagcode::decode(&codec, "Circle(2.5)")?;
//! ```
//!
//! ## Safety and Error Handling
//!
//! *   **No Unsafe:** The crate contains no `unsafe` code.
//! *   **No Panics:** No `unwrap()` or `panic!()` calls in the library
//!     (enforced by clippy lints).
//! *   **Comprehensive Errors:** All failures correspond to a
//!     [`TagcodeError`] value; parsing never yields partial or garbage
//!     values.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// --- PUBLIC API MODULES ---
pub mod api;
pub mod arity;
pub mod codec;
pub mod codec_impls;
pub mod error;
pub mod identity;
pub mod inspector;
pub mod io;
pub mod poly;
pub mod registration;
pub mod registry;

// Private modules
mod slot;

// --- MACRO SUPPORT MODULES ---

/// Runtime utilities used by the derived code.
#[doc(hidden)]
pub mod rt;

/// Internal re-exports for macros to ensure dependencies are available.
#[doc(hidden)]
pub mod internal {
    #[cfg(feature = "auto_register")]
    pub use inventory;
}

// --- RE-EXPORTS ---

pub use api::Tagcode;
pub use arity::{Arity0, Arity1, Arity2};
pub use codec::{Codec, SharedCodec};
pub use codec_impls::{BoolCodec, FieldType, FloatCodec, IntCodec, StringCodec};
pub use error::{Result, TagcodeError};
pub use identity::{TypeIdentity, TypeName};
pub use inspector::{RegistryInspector, RegistryReport};
pub use io::{TextInput, TextOutput};
pub use poly::{PolyCodec, Polymorphic};
pub use registration::DynRegistration;
pub use registry::Registry;

// Re-export the derive macro so it is accessible as `tagcode::TagcodeProduct`
pub use tagcode_derive::TagcodeProduct;

/// Constants used throughout the library.
pub mod constants {
    /// Opening delimiter of a product's field list.
    pub const OPEN_DELIMITER: &str = "(";
    /// Closing delimiter of a product's field list.
    pub const CLOSE_DELIMITER: &str = ")";
    /// Separator between the two fields of a binary product.
    pub const FIELD_SEPARATOR: &str = ",";
    /// Complete body of a nullary product.
    pub const EMPTY_BODY: &str = "()";
}
