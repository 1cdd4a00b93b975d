use crate::error::EncodeError;
use crate::model::mapper::{GroupedNote, KEYS_PER_GROUP};

pub mod book;
pub mod note_grid;

/// Ticks covered by one page of a note grid or book.
pub const TICKS_PER_PAGE: u32 = 64;
/// Pages held by one note grid or book.
pub const PAGES_PER_CONTAINER: u32 = 64;

/// A fixed-capacity output format, built by folding an ordered note sequence
/// through a state machine.
pub trait Encoder: Default {
    type Output;

    /// Feed the next note. Notes must arrive in non-decreasing tick order.
    fn push(&mut self, note: &GroupedNote) -> Result<(), EncodeError>;

    /// Flush whatever container is still open.
    fn finish(self) -> Vec<Self::Output>;

    fn encode(notes: &[GroupedNote]) -> Result<Vec<Self::Output>, EncodeError> {
        let mut encoder = Self::default();
        for note in notes.iter() {
            encoder.push(note)?;
        }
        Ok(encoder.finish())
    }
}

/// The note's key as an index into a 25-slot octave group.
pub fn key_index(note: &GroupedNote) -> Result<usize, EncodeError> {
    if (0..KEYS_PER_GROUP).contains(&note.key) {
        Ok(note.key as usize)
    } else {
        Err(EncodeError::KeyOutOfRange {
            tick: note.tick,
            key: note.key,
        })
    }
}
