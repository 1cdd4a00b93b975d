use crate::engine::{Encoder, PAGES_PER_CONTAINER, TICKS_PER_PAGE, key_index};
use crate::error::EncodeError;
use crate::model::mapper::GroupedNote;
use serde::Serialize;

/// Characters typed for relative keys 0 through 24.
pub const KEY_CHARS: [char; 25] = [
    '1', 'q', '2', 'w', '3', 'e', 'r', '5', 't', '6', 'y', 'u', '8', 'i', '9', 'o', '0', 'p',
    'z', 's', 'x', 'd', 'c', 'v', 'g',
];

/// Separates consecutive ticks on a page.
pub const TICK_FILLER: char = '.';

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Zero-based position in its book.
    pub index: u32,
    pub text: String,
    #[serde(skip)]
    blank: bool,
}

impl Page {
    fn new(index: u32) -> Self {
        Self {
            index,
            text: String::new(),
            blank: true,
        }
    }

    /// One-based page number as shown by the book and quill.
    pub fn number(&self) -> u32 {
        self.index + 1
    }

    pub fn is_blank(&self) -> bool {
        self.blank
    }
}

pub type Book = Vec<Page>;

#[derive(Debug)]
pub struct BookEncoder {
    books: Vec<Book>,
    pages: Book,
    page: Page,
    current_tick: u32,
}

impl Default for BookEncoder {
    fn default() -> Self {
        Self {
            books: Vec::new(),
            pages: Vec::new(),
            page: Page::new(0),
            current_tick: 0,
        }
    }
}

impl BookEncoder {
    /// Close the current page, keeping it only if a key was written to it.
    fn next_page(&mut self) {
        let mut next = self.page.index + 1;
        let page = std::mem::replace(&mut self.page, Page::new(0));
        if !page.blank {
            self.pages.push(page);
        }

        if next >= PAGES_PER_CONTAINER {
            self.books.push(std::mem::take(&mut self.pages));
            next = 0;
        }
        self.page = Page::new(next);
    }
}

impl Encoder for BookEncoder {
    type Output = Book;

    fn push(&mut self, note: &GroupedNote) -> Result<(), EncodeError> {
        let key = KEY_CHARS[key_index(note)?];

        while self.current_tick < note.tick {
            self.current_tick += 1;
            if self.current_tick % TICKS_PER_PAGE == 0 {
                self.next_page();
            } else {
                self.page.text.push(TICK_FILLER);
            }
        }

        self.page.text.push(key);
        self.page.blank = false;

        Ok(())
    }

    /// The open page is kept even when blank.
    fn finish(mut self) -> Vec<Book> {
        self.pages.push(self.page);
        self.books.push(self.pages);
        self.books
    }
}

/// Encode an ordered note sequence into books of page texts.
pub fn encode_paged_books(notes: &[GroupedNote]) -> Result<Vec<Book>, EncodeError> {
    BookEncoder::encode(notes)
}
