//! Table rendering for command output.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use embla_ingest::{Condition, RecordingFiles};
use embla_model::{DATETIME_FORMAT, RecordingInfo, TypedValue};

/// Subject, device and session fields, one per row.
pub fn recording_table(info: &RecordingInfo) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Field"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);

    let subject = &info.subject;
    table.add_row(vec![Cell::new("Subject"), Cell::new("ID"), Cell::new(&subject.id)]);
    let birth = subject
        .birth
        .map(|birth| birth.format(DATETIME_FORMAT).to_string());
    table.add_row(vec![
        Cell::new("Subject"),
        Cell::new("Date of birth"),
        optional_cell(birth),
    ]);
    for (field, value) in [
        ("Gender", &subject.gender),
        ("Height", &subject.height),
        ("Weight", &subject.weight),
        ("Notes", &subject.notes),
    ] {
        table.add_row(vec![
            Cell::new("Subject"),
            Cell::new(field),
            optional_cell(value.as_ref().and_then(TypedValue::canonical_text)),
        ]);
    }

    let device = &info.device;
    for (field, value) in [
        ("Type ID", &device.type_id),
        ("ID", &device.id),
        ("Name", &device.name),
    ] {
        table.add_row(vec![
            Cell::new("Device"),
            Cell::new(field),
            optional_cell(value.canonical_text()),
        ]);
    }
    table.add_row(vec![
        Cell::new("Device"),
        Cell::new("Manufacturer"),
        Cell::new(&device.manufacturer),
    ]);

    let session = &info.session;
    table.add_row(vec![
        Cell::new("Session"),
        Cell::new("Start"),
        Cell::new(session.start.format(DATETIME_FORMAT)),
    ]);
    table.add_row(vec![
        Cell::new("Session"),
        Cell::new("Stop"),
        Cell::new(session.stop.format(DATETIME_FORMAT)),
    ]);
    table.add_row(vec![
        Cell::new("Session"),
        Cell::new("Duration (s)"),
        Cell::new(format!("{:.3}", session.duration_seconds())),
    ]);
    table
}

/// Discovered files with their role.
pub fn files_table(files: &RecordingFiles) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Role"), header_cell("File")]);
    apply_table_style(&mut table);
    for (role, paths) in [
        ("metadata", &files.metadata),
        ("event store", &files.event_stores),
        ("channel", &files.channels),
    ] {
        for path in paths {
            table.add_row(vec![Cell::new(role), Cell::new(file_name(path))]);
        }
    }
    table
}

pub fn conditions_table(conditions: &[Condition]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Condition")]);
    apply_table_style(&mut table);
    for (index, condition) in conditions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(condition).fg(Color::Yellow),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell(value: Option<String>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => Cell::new("-").add_attribute(Attribute::Dim),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn files_table_lists_every_role() {
        let files = RecordingFiles {
            dir: PathBuf::from("/data/night1"),
            metadata: vec![PathBuf::from("/data/night1/Recording.esrc")],
            event_stores: vec![PathBuf::from("/data/night1/Events.esedb")],
            channels: vec![
                PathBuf::from("/data/night1/C3.ebm"),
                PathBuf::from("/data/night1/C4.ebm"),
            ],
        };
        let rendered = files_table(&files).to_string();
        assert!(rendered.contains("Recording.esrc"));
        assert!(rendered.contains("event store"));
        assert!(rendered.contains("C4.ebm"));
        assert!(!rendered.contains("/data/night1"));
    }

    #[test]
    fn conditions_are_numbered() {
        let conditions = vec![Condition::NameUnresolved {
            group_type_index: 3,
            aux_data_id: 8,
        }];
        let rendered = conditions_table(&conditions).to_string();
        assert!(rendered.contains("can't get event name for index 8"));
    }
}
