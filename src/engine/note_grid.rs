use crate::engine::{Encoder, PAGES_PER_CONTAINER, TICKS_PER_PAGE, key_index};
use crate::error::EncodeError;
use crate::model::mapper::GroupedNote;
use serde::Serialize;
use std::fmt;

/// Token closing a page, and the whole code after the last note.
const PAGE_END: i32 = 0;

/// One note grid worth of tokens.
///
/// Negative tokens move forward by that many ticks, positive tokens play
/// `token - 1` as a relative key and `0` ends the current page.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NoteGridCode(pub Vec<i32>);

impl fmt::Display for NoteGridCode {
    /// Renders as a byte array tag: `[B;-1B,6B,0B]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens = self
            .0
            .iter()
            .map(|token| format!("{}B", token))
            .collect::<Vec<_>>();
        write!(f, "[B;{}]", tokens.join(","))
    }
}

#[derive(Debug)]
pub struct NoteGridEncoder {
    codes: Vec<NoteGridCode>,
    tokens: Vec<i32>,
    last_tick: i64,
    end_of_page: i64,
    page: u32,
    end_page_of_grid: u32,
}

impl Default for NoteGridEncoder {
    fn default() -> Self {
        Self {
            codes: Vec::new(),
            tokens: Vec::new(),
            last_tick: -1,
            end_of_page: TICKS_PER_PAGE as i64 - 1,
            page: 0,
            end_page_of_grid: PAGES_PER_CONTAINER - 1,
        }
    }
}

impl NoteGridEncoder {
    fn jump_to(&mut self, tick: i64) {
        if tick > self.end_of_page {
            let per_page = TICKS_PER_PAGE as i64;
            let pages = (tick - self.end_of_page + per_page - 1) / per_page;
            for _ in 0..pages {
                self.next_page();
            }
        }

        self.tokens.push((self.last_tick - tick) as i32);
        self.last_tick = tick;
    }

    fn next_page(&mut self) {
        self.tokens.push(PAGE_END);
        self.last_tick = self.end_of_page;
        self.end_of_page += TICKS_PER_PAGE as i64;

        self.page += 1;
        if self.page > self.end_page_of_grid {
            self.end_page_of_grid += PAGES_PER_CONTAINER;
            self.codes
                .push(NoteGridCode(std::mem::take(&mut self.tokens)));
        }
    }
}

impl Encoder for NoteGridEncoder {
    type Output = NoteGridCode;

    fn push(&mut self, note: &GroupedNote) -> Result<(), EncodeError> {
        let key = key_index(note)? as i32;

        let tick = note.tick as i64;
        if tick != self.last_tick {
            self.jump_to(tick);
        }
        self.tokens.push(key + 1);

        Ok(())
    }

    fn finish(mut self) -> Vec<NoteGridCode> {
        self.tokens.push(PAGE_END);
        self.codes.push(NoteGridCode(self.tokens));
        self.codes
    }
}

/// Encode an ordered note sequence into as many note grid codes as it needs.
pub fn encode_grid_codes(notes: &[GroupedNote]) -> Result<Vec<NoteGridCode>, EncodeError> {
    NoteGridEncoder::encode(notes)
}
