use crate::error::ResolveError;
use crate::model::song::{DEFAULT_CUSTOM_KEY, Song};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of keys a Music Box octave group can play.
pub const KEYS_PER_GROUP: i32 = 25;

/// The three pitch bands a note grid or book can cover.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OctaveGroup {
    Low,
    Middle,
    High,
}

impl OctaveGroup {
    /// Groups in classification order, lowest first.
    pub const ALL: [OctaveGroup; 3] = [OctaveGroup::Low, OctaveGroup::Middle, OctaveGroup::High];

    /// Octave shift shown to the player: -2, 0 or 2.
    pub fn octave(self) -> i8 {
        match self {
            OctaveGroup::Low => -2,
            OctaveGroup::Middle => 0,
            OctaveGroup::High => 2,
        }
    }

    /// Note Block Studio key that plays as relative key 0 in this group.
    pub fn base_key(self) -> i32 {
        match self {
            OctaveGroup::Low => 9,
            OctaveGroup::Middle => 33,
            OctaveGroup::High => 57,
        }
    }

    /// Buckets an already transposed key. Keys below the low band or above
    /// the high band are clamped into the outermost group.
    pub fn classify(effective_key: i32) -> OctaveGroup {
        let index = (effective_key - 8).div_euclid(KEYS_PER_GROUP).clamp(0, 2);
        Self::ALL[index as usize]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupedNote {
    pub tick: u32,
    /// Position inside the octave group. Keys below the group's base key keep
    /// the sign of a truncating remainder and come out negative.
    pub key: i32,
}

/// instrument id -> octave group -> notes in timeline order.
pub type GroupedNotes = BTreeMap<u8, BTreeMap<OctaveGroup, Vec<GroupedNote>>>;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Also drop notes whose own velocity is zero.
    pub skip_silent_notes: bool,
}

/// Places a transposed key into its octave group.
pub fn group_key(effective_key: i32) -> (OctaveGroup, i32) {
    let group = OctaveGroup::classify(effective_key);
    (group, (effective_key - group.base_key()) % KEYS_PER_GROUP)
}

/// Key of a note once its custom instrument's pitch has been applied.
pub fn effective_key(song: &Song, instrument: u8, key: u8) -> Result<i32, ResolveError> {
    let mut effective = key as i32;
    if let Some(custom) = song.custom_instrument(instrument)? {
        effective += custom.key as i32 - DEFAULT_CUSTOM_KEY;
    }
    Ok(effective)
}

pub fn resolve_grouped_notes(
    song: &Song,
    options: ResolveOptions,
) -> Result<GroupedNotes, ResolveError> {
    let mut grouped = GroupedNotes::new();
    let mut muted = 0usize;
    let mut silent = 0usize;
    let mut out_of_range = 0usize;

    for note in song.note_events.iter() {
        if song.layer_of(note)?.volume == 0 {
            muted += 1;
            continue;
        }

        if options.skip_silent_notes && note.velocity == 0 {
            silent += 1;
            continue;
        }

        let (group, key) = group_key(effective_key(song, note.instrument, note.key)?);
        if !(0..KEYS_PER_GROUP).contains(&key) {
            out_of_range += 1;
            debug!(
                "Note at tick {} (instrument {}, key {}) lands on relative key {} in octave {}..!",
                note.tick,
                note.instrument,
                note.key,
                key,
                group.octave()
            );
        }

        grouped
            .entry(note.instrument)
            .or_default()
            .entry(group)
            .or_default()
            .push(GroupedNote {
                tick: note.tick,
                key,
            });
    }

    if muted > 0 {
        debug!("Skipped {} note(s) on muted layers..!", muted);
    }
    if silent > 0 {
        debug!("Skipped {} note(s) with zero velocity..!", silent);
    }
    if out_of_range > 0 {
        warn!(
            "{} note(s) fall below their octave group and cannot be placed on a Music Box..!",
            out_of_range
        );
    }

    Ok(grouped)
}
