use MUSIC_BOX_TOOL::{
    Args, Exporter, GroupedNotes, OutputMode, ResolveOptions, Song, import_nbs_file,
    parse_output_mode,
};
use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use serde::Serialize;

#[derive(Serialize)]
struct SongDump<'a> {
    song: &'a Song,
    notes: &'a GroupedNotes,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mode = parse_output_mode(&args.export);
    let options = ResolveOptions {
        skip_silent_notes: args.skip_silent,
    };

    info!("Importing NBS file: '{}'...", args.nbs.display());
    let song = import_nbs_file(&args.nbs)?;

    debug!(
        "Imported song '{}' with {} note(s)..!",
        song.display_title(),
        song.note_events.len()
    );

    if args.dry_run {
        info!("Previewing at most {} notes..!", args.dry_run_max);
        for (i, note) in song.note_events.iter().take(args.dry_run_max).enumerate() {
            let instrument = song
                .instrument_name(note.instrument)
                .unwrap_or_else(|e| format!("<{}>", e));

            info!(
                "Note {}: tick={} layer={} instrument={} key={} velocity={}",
                i, note.tick, note.layer, instrument, note.key, note.velocity
            );
        }
        return Ok(());
    }

    let exporter = Exporter::new(&song, options)?;

    if args.verbose {
        for (&instrument, groups) in exporter.notes().iter() {
            for (group, notes) in groups.iter() {
                info!(
                    "Instrument {} octave {}: {} note(s)..!",
                    instrument,
                    group.octave(),
                    notes.len()
                );
            }
        }
    }

    match mode {
        OutputMode::Info => {
            let header = &song.header;
            println!("Song Name: {}", song.display_title());
            println!("Original Author: {}", header.original_author);
            println!("Author: {}", header.author);
            println!("Length: {} ticks at {:.2} t/s", header.length, header.tempo as f64 / 100.0);
            println!("Layers: {}", song.layers.len());
            for (&instrument, groups) in exporter.notes().iter() {
                let octaves = groups
                    .keys()
                    .map(|group| group.octave().to_string())
                    .collect::<Vec<_>>();
                println!(
                    "Instrument: {} | Octaves: {}",
                    song.instrument_name(instrument)?,
                    octaves.join(", ")
                );
            }
        }
        OutputMode::Json => {
            let dump = SongDump {
                song: &song,
                notes: exporter.notes(),
            };
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
        OutputMode::Export(kind) => {
            let entries = exporter.export(kind)?;
            let mut instrument = None;
            for entry in entries.iter() {
                if instrument.as_ref() != Some(&entry.instrument) {
                    println!("== {} ==", entry.instrument);
                    instrument = Some(entry.instrument.clone());
                }
                println!("{}", entry.title);
                println!("{}", entry.text);
            }
            info!("Exported {} entries..!", entries.len());
        }
    }

    Ok(())
}
