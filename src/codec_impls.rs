//! Field codecs for primitive leaf types.
//!
//! Product grammars bottom out in these codecs. Each is a stateless unit
//! struct; [`FieldType`] maps a Rust type to a cached shared instance so that
//! redundant registration with the default codec stays idempotent (component
//! equality is handle identity).
//!
//! # Escaping
//!
//! None. The grammar defines no escaping rules, so a string field containing
//! `,` or `)` cannot be represented — the written text would not parse back.
//! Escaping is a field codec's concern; a quoting codec can be substituted
//! per registration without touching the product builders.

use std::sync::{Arc, OnceLock};

use crate::codec::{Codec, SharedCodec};
use crate::error::{Result, TagcodeError};
use crate::io::{TextInput, TextOutput};

/// Maps a type to the codec used by default when it appears as a field.
///
/// Implemented here for the primitive leaf types, and by the derive macro for
/// every product type, so products compose as fields of other products.
pub trait FieldType: Sized + 'static {
    /// The default shared codec for this type.
    ///
    /// Implementations return the same handle on every call.
    fn codec() -> SharedCodec<Self>;
}

/// Signed 64-bit integer fields, decimal notation.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCodec;

impl Codec<i64> for IntCodec {
    fn read(&self, input: &mut TextInput<'_>) -> Result<i64> {
        let start = input.offset();
        let text = input.take_while(|c| c.is_ascii_digit() || c == '-' || c == '+');
        text.parse::<i64>().map_err(|e| {
            TagcodeError::Parse(format!(
                "invalid integer {:?} at offset {}: {}",
                text, start, e
            ))
        })
    }

    fn write(&self, output: &mut TextOutput, value: &i64) -> Result<()> {
        output.append(&value.to_string());
        Ok(())
    }
}

/// 64-bit float fields.
///
/// Writes the shortest decimal form that parses back to the same bits.
/// Accepts exponent notation and the `inf`/`NaN` spellings `f64` itself
/// produces.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatCodec;

impl Codec<f64> for FloatCodec {
    fn read(&self, input: &mut TextInput<'_>) -> Result<f64> {
        let start = input.offset();
        let text = input.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+'));
        text.parse::<f64>().map_err(|e| {
            TagcodeError::Parse(format!("invalid float {:?} at offset {}: {}", text, start, e))
        })
    }

    fn write(&self, output: &mut TextOutput, value: &f64) -> Result<()> {
        output.append(&value.to_string());
        Ok(())
    }
}

/// Boolean fields, written as `true` / `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl Codec<bool> for BoolCodec {
    fn read(&self, input: &mut TextInput<'_>) -> Result<bool> {
        let start = input.offset();
        let text = input.take_while(|c| c.is_ascii_alphabetic());
        match text {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(TagcodeError::Parse(format!(
                "invalid boolean {:?} at offset {}",
                other, start
            ))),
        }
    }

    fn write(&self, output: &mut TextOutput, value: &bool) -> Result<()> {
        output.append(if *value { "true" } else { "false" });
        Ok(())
    }
}

/// String fields, written verbatim.
///
/// Reads every character up to the next `,` or `)` delimiter (which is left
/// for the enclosing product to consume). The empty string is a valid field.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec<String> for StringCodec {
    fn read(&self, input: &mut TextInput<'_>) -> Result<String> {
        let text = input.take_while(|c| c != ',' && c != ')');
        Ok(text.to_string())
    }

    fn write(&self, output: &mut TextOutput, value: &String) -> Result<()> {
        output.append(value);
        Ok(())
    }
}

impl FieldType for i64 {
    fn codec() -> SharedCodec<Self> {
        static CODEC: OnceLock<SharedCodec<i64>> = OnceLock::new();
        CODEC.get_or_init(|| Arc::new(IntCodec)).clone()
    }
}

impl FieldType for f64 {
    fn codec() -> SharedCodec<Self> {
        static CODEC: OnceLock<SharedCodec<f64>> = OnceLock::new();
        CODEC.get_or_init(|| Arc::new(FloatCodec)).clone()
    }
}

impl FieldType for bool {
    fn codec() -> SharedCodec<Self> {
        static CODEC: OnceLock<SharedCodec<bool>> = OnceLock::new();
        CODEC.get_or_init(|| Arc::new(BoolCodec)).clone()
    }
}

impl FieldType for String {
    fn codec() -> SharedCodec<Self> {
        static CODEC: OnceLock<SharedCodec<String>> = OnceLock::new();
        CODEC.get_or_init(|| Arc::new(StringCodec)).clone()
    }
}
