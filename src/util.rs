use crate::{ExportKind, OutputMode};
use log::info;

pub fn parse_output_mode(input: &str) -> OutputMode {
    match input.to_lowercase().as_str() {
        "c" | "cmd" | "command" | "command-1.21" => OutputMode::Export(ExportKind::Command),
        "l" | "legacy" | "command-1.20" => OutputMode::Export(ExportKind::LegacyCommand),
        "p" | "page" | "pages" | "book" => OutputMode::Export(ExportKind::Pages),
        "i" | "info" => OutputMode::Info,
        "j" | "json" => OutputMode::Json,
        other => {
            info!("Unknown export '{}', defaulting to `command`..!", other);
            OutputMode::Export(ExportKind::Command)
        }
    }
}

/// Escape text so it can sit inside a quoted string of a `/give` command.
pub fn escape_command_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '"' | '\'' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
