use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::fs;

use crate::catalog::Catalog;
use crate::config::PickerConfig;
use crate::error::Result;
use crate::picker::Picker;
use crate::sources::{CollectionSource, SearchIndex};
use crate::theme::Theme;
use crate::ui;

/// Build a fully loaded picker synchronously, answering any search it needs
/// straight from the catalog.
pub fn load_picker(catalog: &Catalog, config: PickerConfig) -> Result<Picker> {
    let entity = config.entity;
    let mut picker = Picker::new(config);
    picker.set_index(entity, catalog.load(entity)?);
    if let Some((query, _cancel)) = picker.refresh_search() {
        let items = catalog.query(entity, &query)?;
        picker.apply_search_results(&query, items);
    }
    Ok(picker)
}

pub fn render_to_string(picker: &Picker, width: u16, height: u16) -> Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;
    let theme = Theme::default();

    terminal.draw(|frame| {
        ui::draw(frame, picker, &theme);
    })?;

    let buffer = terminal.backend().buffer().clone();
    Ok(buffer_to_string(&buffer))
}

pub fn generate_screenshot(
    catalog: &Catalog,
    config: PickerConfig,
    output_path: Option<&str>,
    width: u16,
    height: u16,
) -> Result<()> {
    let picker = load_picker(catalog, config)?;
    let screenshot = render_to_string(&picker, width, height)?;

    match output_path {
        Some(path) => {
            fs::write(path, screenshot)?;
            println!("Screenshot saved to: {}", path);
        }
        None => {
            print!("{}", screenshot);
        }
    }

    Ok(())
}

/// One text line per buffer row, with trailing blanks dropped so snapshots
/// do not depend on terminal width padding.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area().width).max(1);
    buffer
        .content()
        .chunks(width)
        .map(|row| {
            let line: String = row
                .iter()
                .map(|cell| match cell.symbol() {
                    "" => " ",
                    symbol => symbol,
                })
                .collect();
            format!("{}\n", line.trim_end())
        })
        .collect()
}
