use crate::engine::book::encode_paged_books;
use crate::engine::note_grid::encode_grid_codes;
use crate::model::mapper::{
    GroupedNote, GroupedNotes, OctaveGroup, ResolveOptions, resolve_grouped_notes,
};
use crate::model::song::Song;
use crate::util::escape_command_text;
use anyhow::{Result, anyhow};
use log::{debug, info};
use serde::Serialize;

const UNKNOWN_AUTHOR: &str = "? ? ?";

/// What the grouped notes are turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportKind {
    /// `/give` commands using 1.21 item components.
    #[default]
    Command,

    /// `/give` commands using pre-1.20.5 NBT.
    LegacyCommand,

    /// Page texts to type into a book and quill.
    Pages,
}

/// One copyable result.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub instrument: String,
    pub octave: i8,
    pub title: String,
    pub text: String,
}

#[derive(Debug)]
pub struct Exporter<'a> {
    song: &'a Song,
    notes: GroupedNotes,
}

impl<'a> Exporter<'a> {
    pub fn new(song: &'a Song, options: ResolveOptions) -> Result<Self> {
        let notes = resolve_grouped_notes(song, options)?;
        debug!(
            "Resolved {} instrument(s) into {} octave group(s)..!",
            notes.len(),
            notes.values().map(|groups| groups.len()).sum::<usize>()
        );

        Ok(Self { song, notes })
    }

    pub fn notes(&self) -> &GroupedNotes {
        &self.notes
    }

    pub fn export(&self, kind: ExportKind) -> Result<Vec<ExportEntry>> {
        let mut entries = Vec::new();

        for (&instrument, groups) in self.notes.iter() {
            let name = escape_command_text(&self.song.instrument_name(instrument)?);

            for (&group, notes) in groups.iter() {
                let before = entries.len();
                match kind {
                    ExportKind::Command | ExportKind::LegacyCommand => {
                        self.export_commands(kind, &name, group, notes, &mut entries)?
                    }
                    ExportKind::Pages => self.export_pages(&name, group, notes, &mut entries)?,
                }

                info!(
                    "{} (octave {}): {} note(s) -> {} entr{}..!",
                    name,
                    group.octave(),
                    notes.len(),
                    entries.len() - before,
                    if entries.len() - before == 1 { "y" } else { "ies" }
                );
            }
        }

        Ok(entries)
    }

    fn lore(&self, kind: ExportKind) -> String {
        let or_unknown = |text: &str| {
            if text.is_empty() {
                UNKNOWN_AUTHOR.to_string()
            } else {
                escape_command_text(text)
            }
        };

        let title = escape_command_text(self.song.display_title());
        let original_author = or_unknown(&self.song.header.original_author);
        let author = or_unknown(&self.song.header.author);
        let lines = format!("['\"{}\"','\"{}\"','\"{}\"']", title, original_author, author);

        match kind {
            ExportKind::LegacyCommand => format!("Lore:{}", lines),
            _ => format!("minecraft:lore={}", lines),
        }
    }

    fn export_commands(
        &self,
        kind: ExportKind,
        name: &str,
        group: OctaveGroup,
        notes: &[GroupedNote],
        entries: &mut Vec<ExportEntry>,
    ) -> Result<()> {
        let lore = self.lore(kind);
        let octave = group.octave();
        let codes = encode_grid_codes(notes)
            .map_err(|e| anyhow!("Failed to encode {} (octave {}): {}", name, octave, e))?;

        for (index, code) in codes.iter().enumerate() {
            let label = format!("{}({})-{}", name, octave, index);
            let text = match kind {
                ExportKind::LegacyCommand => format!(
                    "/give @p cc_mb:note_grid{{display:{{Name:'\"{}\"',{}}},notes:{}}}",
                    label, lore, code
                ),
                _ => format!(
                    "/give @p cc_mb:note_grid[minecraft:item_name='\"{}\"',{},cc_mb:notes={}]",
                    label, lore, code
                ),
            };

            entries.push(ExportEntry {
                instrument: name.to_string(),
                octave,
                title: format!("Octave: {} | Note Grid index: {}", octave, index + 1),
                text,
            });
        }

        Ok(())
    }

    fn export_pages(
        &self,
        name: &str,
        group: OctaveGroup,
        notes: &[GroupedNote],
        entries: &mut Vec<ExportEntry>,
    ) -> Result<()> {
        let octave = group.octave();
        let books = encode_paged_books(notes)
            .map_err(|e| anyhow!("Failed to encode {} (octave {}): {}", name, octave, e))?;

        for (index, book) in books.iter().enumerate() {
            for page in book.iter() {
                entries.push(ExportEntry {
                    instrument: name.to_string(),
                    octave,
                    title: format!(
                        "Octave: {} | Book index: {} | Page: {}",
                        octave,
                        index + 1,
                        page.number()
                    ),
                    text: page.text.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nbs_importer::decode;
    use crate::test_support::{NbsBuilder, TestNote};

    fn song() -> Song {
        let bytes = NbsBuilder::new()
            .title("Song \"A\"")
            .author("tas")
            .layer("Lead", 100)
            .layer("Muted", 0)
            .note(TestNote::new(0, 0, 38))
            .note(TestNote::new(0, 1, 40))
            .note(TestNote::new(65, 0, 39).instrument(16))
            .custom_instrument("Kalimba", "kalimba.ogg", 45)
            .build();
        decode(&bytes).unwrap()
    }

    #[test]
    fn command_export() {
        env_logger::try_init().unwrap_or(());

        let song = song();
        let exporter = Exporter::new(&song, ResolveOptions::default()).unwrap();
        let entries = exporter.export(ExportKind::Command).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].instrument, "Harp");
        assert_eq!(entries[0].octave, 0);
        assert_eq!(entries[0].title, "Octave: 0 | Note Grid index: 1");
        assert_eq!(
            entries[0].text,
            "/give @p cc_mb:note_grid[minecraft:item_name='\"Harp(0)-0\"',\
             minecraft:lore=['\"Song \\\"A\\\"\"','\"? ? ?\"','\"tas\"'],\
             cc_mb:notes=[B;-1B,6B,0B]]"
        );

        assert_eq!(entries[1].instrument, "Kalimba");
        assert!(entries[1].text.ends_with("cc_mb:notes=[B;0B,-2B,7B,0B]]"));
    }

    #[test]
    fn legacy_command_export() {
        let song = song();
        let exporter = Exporter::new(&song, ResolveOptions::default()).unwrap();
        let entries = exporter.export(ExportKind::LegacyCommand).unwrap();

        assert_eq!(
            entries[0].text,
            "/give @p cc_mb:note_grid{display:{Name:'\"Harp(0)-0\"',\
             Lore:['\"Song \\\"A\\\"\"','\"? ? ?\"','\"tas\"']},\
             notes:[B;-1B,6B,0B]}"
        );
    }

    #[test]
    fn page_export() {
        let song = song();
        let exporter = Exporter::new(&song, ResolveOptions::default()).unwrap();
        let entries = exporter.export(ExportKind::Pages).unwrap();

        let pages: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.title.as_str(), e.text.as_str()))
            .collect();
        assert_eq!(
            pages,
            vec![
                ("Octave: 0 | Book index: 1 | Page: 1", "e"),
                ("Octave: 0 | Book index: 1 | Page: 2", ".r"),
            ]
        );
        assert_eq!(entries[1].instrument, "Kalimba");
    }

    #[test]
    fn muted_layer_notes_never_exported() {
        let song = song();
        let exporter = Exporter::new(&song, ResolveOptions::default()).unwrap();
        let harp = &exporter.notes()[&0][&OctaveGroup::Middle];
        assert_eq!(harp.len(), 1);
    }

    #[test]
    fn unplaceable_key_fails_export() {
        let bytes = NbsBuilder::new()
            .layer("Lead", 100)
            .note(TestNote::new(0, 0, 3))
            .build();
        let song = decode(&bytes).unwrap();

        let exporter = Exporter::new(&song, ResolveOptions::default()).unwrap();
        assert!(exporter.export(ExportKind::Pages).is_err());
        assert!(exporter.export(ExportKind::Command).is_err());
    }
}
