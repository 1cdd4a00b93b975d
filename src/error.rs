use thiserror::Error;

/// Failures of the raw byte cursor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("read of {wanted} byte(s) at offset {offset} runs past the end of a {len} byte buffer")]
    OutOfBounds {
        offset: usize,
        wanted: usize,
        len: usize,
    },

    #[error("{counter} counter overflowed at offset {offset}")]
    CounterOverflow {
        counter: &'static str,
        offset: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The first short was non-zero, so the file predates the versioned format.
    #[error("legacy NBS file (song length marker {0}) is too old to load, re-save it with a newer Note Block Studio")]
    UnsupportedFormat(u16),

    #[error("corrupt NBS file: {0}")]
    CorruptFile(#[from] ReadError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("note at tick {tick} references layer {layer} but the song only has {len} layer(s)")]
    LayerOutOfRange { tick: u32, layer: u32, len: usize },

    #[error("instrument {instrument} maps to custom instrument {index} but the song only has {len}")]
    CustomInstrumentOutOfRange {
        instrument: u8,
        index: usize,
        len: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("relative key {key} at tick {tick} is outside of 0..=24")]
    KeyOutOfRange { tick: u32, key: i32 },
}
