//! Writes NBS containers for tests.

#[derive(Debug, Clone, Copy)]
pub struct TestNote {
    pub tick: u32,
    pub layer: u32,
    pub instrument: u8,
    pub key: u8,
    pub velocity: u8,
    pub panning: u8,
    pub pitch: u16,
}

impl TestNote {
    pub fn new(tick: u32, layer: u32, key: u8) -> Self {
        Self {
            tick,
            layer,
            instrument: 0,
            key,
            velocity: 100,
            panning: 100,
            pitch: 0,
        }
    }

    pub fn instrument(mut self, instrument: u8) -> Self {
        self.instrument = instrument;
        self
    }
}

#[derive(Debug, Default)]
pub struct NbsBuilder {
    title: String,
    author: String,
    original_author: String,
    layers: Vec<(String, bool, u8)>,
    notes: Vec<TestNote>,
    custom_instruments: Vec<(String, String, u8)>,
}

impl NbsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }

    pub fn original_author(mut self, original_author: &str) -> Self {
        self.original_author = original_author.to_string();
        self
    }

    pub fn layer(mut self, name: &str, volume: u8) -> Self {
        self.layers.push((name.to_string(), false, volume));
        self
    }

    pub fn locked_layer(mut self, name: &str, volume: u8) -> Self {
        self.layers.push((name.to_string(), true, volume));
        self
    }

    /// Notes may be added in any order but each (tick, layer) slot only once.
    pub fn note(mut self, note: TestNote) -> Self {
        self.notes.push(note);
        self
    }

    pub fn custom_instrument(mut self, name: &str, file: &str, key: u8) -> Self {
        self.custom_instruments
            .push((name.to_string(), file.to_string(), key));
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        let mut out = Vec::new();
        self.notes.sort_by_key(|n| (n.tick, n.layer));
        let length = self.notes.last().map(|n| n.tick as u16 + 1).unwrap_or(0);

        put_short(&mut out, 0);
        out.push(5);
        out.push(16);
        put_short(&mut out, length);
        put_short(&mut out, self.layers.len() as u16);
        put_string(&mut out, &self.title);
        put_string(&mut out, &self.author);
        put_string(&mut out, &self.original_author);
        put_string(&mut out, "generated for tests");
        put_short(&mut out, 1000);
        out.push(1);
        out.push(10);
        out.push(4);
        put_int(&mut out, 42);
        put_int(&mut out, 1_000);
        put_int(&mut out, 200);
        put_int(&mut out, 1_234_567);
        put_int(&mut out, 89);
        put_string(&mut out, "still_alive.mid");
        out.push(1);
        out.push(3);
        put_short(&mut out, 16);

        let mut tick: i64 = -1;
        let mut layer: i64 = -1;
        for (i, note) in self.notes.iter().enumerate() {
            let new_tick = i == 0 || self.notes[i - 1].tick != note.tick;
            if new_tick {
                if i > 0 {
                    put_short(&mut out, 0);
                }
                put_short(&mut out, (note.tick as i64 - tick) as u16);
                tick = note.tick as i64;
                layer = -1;
            }
            put_short(&mut out, (note.layer as i64 - layer) as u16);
            layer = note.layer as i64;

            out.push(note.instrument);
            out.push(note.key);
            out.push(note.velocity);
            out.push(note.panning);
            put_short(&mut out, note.pitch);
        }
        if !self.notes.is_empty() {
            put_short(&mut out, 0);
        }
        put_short(&mut out, 0);

        for (name, lock, volume) in self.layers.iter() {
            put_string(&mut out, name);
            out.push(*lock as u8);
            out.push(*volume);
            out.push(100);
        }

        out.push(self.custom_instruments.len() as u8);
        for (name, file, key) in self.custom_instruments.iter() {
            put_string(&mut out, name);
            put_string(&mut out, file);
            out.push(*key);
            out.push(0);
        }

        out
    }
}

fn put_short(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_int(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_string(out: &mut Vec<u8>, text: &str) {
    put_int(out, text.len() as u32);
    out.extend_from_slice(text.as_bytes());
}
