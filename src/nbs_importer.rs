use crate::error::{DecodeError, ReadError};
use crate::model::song::*;
use crate::reader::ByteReader;
use anyhow::{Result, anyhow};
use log::debug;
use std::fs;
use std::path::Path;

pub fn import_nbs_file<P: AsRef<Path>>(path: P) -> Result<Song> {
    let bytes = fs::read(path.as_ref()).map_err(|e| {
        anyhow!(
            "Failed to read NBS file {}: {}",
            path.as_ref().display(),
            e
        )
    })?;

    let mut song = decode(&bytes)
        .map_err(|e| anyhow!("Failed to load {}: {}", path.as_ref().display(), e))?;

    song.file_name = path
        .as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string());

    Ok(song)
}

/// Decode a versioned Note Block Studio container.
///
/// Files written before the format carried a version marker start with a
/// non-zero song length and are rejected with [`DecodeError::UnsupportedFormat`].
/// Any truncated read surfaces as [`DecodeError::CorruptFile`].
pub fn decode(bytes: &[u8]) -> Result<Song, DecodeError> {
    let mut reader = ByteReader::new(bytes);

    let marker = reader.read_short()?;
    if marker != 0 {
        return Err(DecodeError::UnsupportedFormat(marker));
    }

    let header = read_header(&mut reader)?;
    debug!(
        "NBS v{} '{}': {} ticks, {} layer(s), {} vanilla instrument(s)",
        header.version,
        header.title,
        header.length,
        header.layer_count,
        header.vanilla_instrument_count
    );

    let note_events = read_note_events(&mut reader)?;
    let layers = (0..header.layer_count)
        .map(|_| read_layer(&mut reader))
        .collect::<Result<Vec<_>, _>>()?;

    let custom_count = reader.read_byte()?;
    let custom_instruments = (0..custom_count)
        .map(|_| read_custom_instrument(&mut reader))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Decoded {} note(s), {} layer(s), {} custom instrument(s), {} trailing byte(s)",
        note_events.len(),
        layers.len(),
        custom_instruments.len(),
        reader.remaining()
    );

    Ok(Song {
        header,
        file_name: None,
        note_events,
        layers,
        custom_instruments,
    })
}

fn read_header(reader: &mut ByteReader) -> Result<Header, ReadError> {
    Ok(Header {
        version: reader.read_byte()?,
        vanilla_instrument_count: reader.read_byte()?,
        length: reader.read_short()?,
        layer_count: reader.read_short()?,
        title: reader.read_string()?,
        author: reader.read_string()?,
        original_author: reader.read_string()?,
        description: reader.read_string()?,
        tempo: reader.read_short()?,
        auto_save: reader.read_byte()?,
        auto_save_duration: reader.read_byte()?,
        time_signature: reader.read_byte()?,
        minutes_spent: reader.read_int()?,
        left_clicks: reader.read_int()?,
        right_clicks: reader.read_int()?,
        blocks_added: reader.read_int()?,
        blocks_removed: reader.read_int()?,
        midi_or_schematic_name: reader.read_string()?,
        looping: reader.read_byte()? == 1,
        max_loop_count: reader.read_byte()?,
        loop_start_tick: reader.read_short()?,
    })
}

/// Advance a counter that sits one before zero until its first jump.
fn jump(
    counter: Option<u32>,
    by: u16,
    name: &'static str,
    offset: usize,
) -> Result<u32, ReadError> {
    let next = match counter {
        Some(current) => current.checked_add(by as u32),
        None => Some(by as u32 - 1),
    };
    next.ok_or(ReadError::CounterOverflow {
        counter: name,
        offset,
    })
}

fn read_note_events(reader: &mut ByteReader) -> Result<Vec<NoteEvent>, ReadError> {
    let mut events = Vec::new();
    let mut tick: Option<u32> = None;

    loop {
        let tick_jump = reader.read_short()?;
        if tick_jump == 0 {
            break;
        }
        let current_tick = jump(tick, tick_jump, "tick", reader.position())?;
        tick = Some(current_tick);

        let mut layer: Option<u32> = None;
        loop {
            let layer_jump = reader.read_short()?;
            if layer_jump == 0 {
                break;
            }
            let current_layer = jump(layer, layer_jump, "layer", reader.position())?;
            layer = Some(current_layer);

            events.push(NoteEvent {
                tick: current_tick,
                layer: current_layer,
                instrument: reader.read_byte()?,
                key: reader.read_byte()?,
                velocity: reader.read_byte()?,
                panning: reader.read_byte()? as i8,
                pitch: reader.read_short()?,
            });
        }
    }

    Ok(events)
}

fn read_layer(reader: &mut ByteReader) -> Result<Layer, ReadError> {
    Ok(Layer {
        name: reader.read_string()?,
        lock: reader.read_byte()? == 1,
        volume: reader.read_byte()?,
        stereo: reader.read_byte()?,
    })
}

fn read_custom_instrument(reader: &mut ByteReader) -> Result<CustomInstrument, ReadError> {
    Ok(CustomInstrument {
        name: reader.read_string()?,
        sound_file: reader.read_string()?,
        key: reader.read_byte()?,
        press_key: reader.read_byte()?,
    })
}
