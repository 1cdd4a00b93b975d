use crate::error::ResolveError;
use serde::{Deserialize, Serialize};

/// A custom instrument whose key equals this plays its samples unshifted.
pub const DEFAULT_CUSTOM_KEY: i32 = 45;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub tick: u32,
    pub layer: u32,
    pub instrument: u8,
    /// Raw key, 0 being the lowest pitch Note Block Studio offers.
    pub key: u8,
    pub velocity: u8,
    pub panning: i8,
    pub pitch: u16,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub name: String,
    pub lock: bool,
    pub volume: u8,
    pub stereo: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CustomInstrument {
    pub name: String,
    pub sound_file: String,
    pub key: u8,
    pub press_key: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub vanilla_instrument_count: u8,
    pub length: u16,
    pub layer_count: u16,
    pub title: String,
    pub author: String,
    pub original_author: String,
    pub description: String,
    /// Ticks per second multiplied by 100.
    pub tempo: u16,
    pub auto_save: u8,
    pub auto_save_duration: u8,
    pub time_signature: u8,
    pub minutes_spent: u32,
    pub left_clicks: u32,
    pub right_clicks: u32,
    pub blocks_added: u32,
    pub blocks_removed: u32,
    pub midi_or_schematic_name: String,
    pub looping: bool,
    pub max_loop_count: u8,
    pub loop_start_tick: u16,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Song {
    pub header: Header,
    /// Name of the file the song was imported from, without its extension.
    pub file_name: Option<String>,
    pub note_events: Vec<NoteEvent>,
    pub layers: Vec<Layer>,
    pub custom_instruments: Vec<CustomInstrument>,
}

impl Song {
    /// The layer a note plays on.
    pub fn layer_of(&self, note: &NoteEvent) -> Result<&Layer, ResolveError> {
        self.layers
            .get(note.layer as usize)
            .ok_or(ResolveError::LayerOutOfRange {
                tick: note.tick,
                layer: note.layer,
                len: self.layers.len(),
            })
    }

    /// `Ok(None)` for vanilla instruments, the custom definition otherwise.
    pub fn custom_instrument(
        &self,
        instrument: u8,
    ) -> Result<Option<&CustomInstrument>, ResolveError> {
        let Some(index) = instrument.checked_sub(self.header.vanilla_instrument_count) else {
            return Ok(None);
        };
        let index = index as usize;

        self.custom_instruments
            .get(index)
            .map(Some)
            .ok_or(ResolveError::CustomInstrumentOutOfRange {
                instrument,
                index,
                len: self.custom_instruments.len(),
            })
    }

    /// Title to show for the song, falling back to the source file name.
    pub fn display_title(&self) -> &str {
        if !self.header.title.is_empty() {
            return &self.header.title;
        }
        self.file_name.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn song_with(vanilla: u8, custom: usize) -> Song {
        Song {
            header: Header {
                vanilla_instrument_count: vanilla,
                ..Default::default()
            },
            custom_instruments: (0..custom)
                .map(|i| CustomInstrument {
                    name: format!("custom {}", i),
                    sound_file: format!("custom_{}.ogg", i),
                    key: 45,
                    press_key: 0,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn vanilla_instrument_has_no_custom_definition() {
        let song = song_with(16, 0);
        assert_eq!(song.custom_instrument(15), Ok(None));
    }

    #[test]
    fn custom_instrument_offset_by_vanilla_count() {
        let song = song_with(16, 2);
        let inst = song.custom_instrument(17).unwrap().unwrap();
        assert_eq!(inst.name, "custom 1");
    }

    #[test]
    fn custom_instrument_out_of_range() {
        let song = song_with(16, 1);
        assert_eq!(
            song.custom_instrument(18),
            Err(ResolveError::CustomInstrumentOutOfRange {
                instrument: 18,
                index: 2,
                len: 1
            })
        );
    }

    #[test]
    fn layer_out_of_range() {
        let song = song_with(16, 0);
        let note = NoteEvent {
            tick: 3,
            layer: 0,
            instrument: 0,
            key: 33,
            velocity: 100,
            panning: 100,
            pitch: 0,
        };
        assert_eq!(
            song.layer_of(&note),
            Err(ResolveError::LayerOutOfRange {
                tick: 3,
                layer: 0,
                len: 0
            })
        );
    }

    #[test]
    fn title_falls_back_to_file_name() {
        let mut song = song_with(16, 0);
        assert_eq!(song.display_title(), "");

        song.file_name = Some("Megalovania".into());
        assert_eq!(song.display_title(), "Megalovania");

        song.header.title = "MEGALOVANIA".into();
        assert_eq!(song.display_title(), "MEGALOVANIA");
    }
}
