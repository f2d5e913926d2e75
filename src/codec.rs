//! Defines the `Codec` trait: the bidirectional read/write contract.
//!
//! A codec is a pure capability pair for a single type: parse a value from a
//! [`TextInput`] cursor, or append the value's text form to a [`TextOutput`]
//! sink. Codecs hold no mutable state of their own, so a single instance can
//! be shared freely and invoked concurrently.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Result;
use crate::io::{TextInput, TextOutput};

/// A bidirectional text codec for values of type `T`.
///
/// `read` and `write` must round-trip: for any value a codec can write, reading
/// the produced text yields an equal value, and writing is deterministic.
///
/// `write` returns a `Result` even though appending text itself cannot fail:
/// composite codecs surface configuration and lookup failures through it.
pub trait Codec<T>: Send + Sync + Debug {
    /// Parses one value from the cursor, advancing it past the consumed text.
    ///
    /// On failure the cursor is left at the offset that failed to match and
    /// no value is produced.
    fn read(&self, input: &mut TextInput<'_>) -> Result<T>;

    /// Appends the text representation of `value` to the sink.
    fn write(&self, output: &mut TextOutput, value: &T) -> Result<()>;
}

/// A shared, reference-counted codec handle.
///
/// Child codecs are stored and passed around in this form so that one codec
/// instance can serve as a component of many product types.
pub type SharedCodec<T> = Arc<dyn Codec<T>>;
