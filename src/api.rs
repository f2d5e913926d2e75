use crate::codec::Codec;
use crate::error::Result;
use crate::io::{TextInput, TextOutput};

/// The main entry point for encoding and decoding values.
#[derive(Debug)]
pub struct Tagcode;

impl Tagcode {
    /// Writes `value` through `codec` and returns the produced text.
    ///
    /// # Arguments
    /// * `codec`: The codec for `T` — a builder, a primitive codec or a
    ///   [`PolyCodec`](crate::PolyCodec).
    /// * `value`: The value to serialize.
    pub fn encode<T, C>(codec: &C, value: &T) -> Result<String>
    where
        C: Codec<T> + ?Sized,
    {
        let mut output = TextOutput::new();
        codec.write(&mut output, value)?;
        Ok(output.into_string())
    }

    /// Parses exactly one value from `text`.
    ///
    /// The codec must consume the entire input; trailing text fails with a
    /// parse error carrying the offset where the value ended.
    pub fn decode<T, C>(codec: &C, text: &str) -> Result<T>
    where
        C: Codec<T> + ?Sized,
    {
        let mut input = TextInput::new(text);
        let value = codec.read(&mut input)?;
        input.expect_end()?;
        Ok(value)
    }
}
