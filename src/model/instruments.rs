use crate::error::ResolveError;
use crate::model::song::Song;

/// Built-in instruments, indexed by instrument id.
pub const VANILLA_INSTRUMENT_NAMES: [&str; 16] = [
    "Harp",
    "Bass",
    "Bass Drum",
    "Snare",
    "Hat",
    "Guitar",
    "Flute",
    "Bell",
    "Chime",
    "Xylophone",
    "Iron Xylophone",
    "Cow Bell",
    "Didgeridoo",
    "Bit",
    "Banjo",
    "Pling",
];

impl Song {
    /// Resolve an instrument id to a name, looking in the song's custom
    /// instruments for ids past the vanilla range.
    pub fn instrument_name(&self, instrument: u8) -> Result<String, ResolveError> {
        if let Some(custom) = self.custom_instrument(instrument)? {
            return Ok(custom.name.clone());
        }

        Ok(VANILLA_INSTRUMENT_NAMES
            .get(instrument as usize)
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("Instrument {}", instrument)))
    }
}
