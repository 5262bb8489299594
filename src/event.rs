use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::async_task::Task;
use crate::error::Result;
use crate::main_lib::dispatch_search;
use crate::model::PickerValue;
use crate::picker::Picker;
use crate::selection::Activation;

/// What the host loop should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    Redraw,
    /// The user picked a value; report it exactly once.
    Selected(PickerValue),
    Quit,
}

pub fn handle_event(
    event: Event,
    picker: &mut Picker,
    task_sender: &mpsc::Sender<Task>,
) -> Result<EventOutcome> {
    let outcome = match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            if picker.navigation().is_searching() {
                handle_search_key(key, picker)
            } else {
                handle_browse_key(key, picker)
            }
        }
        Event::Resize(_, _) => EventOutcome::Redraw,
        _ => EventOutcome::Ignored,
    };

    if outcome == EventOutcome::Quit {
        picker.should_quit = true;
    } else {
        // Any transition may call for a different search
        dispatch_search(picker, task_sender);
    }
    Ok(outcome)
}

fn redraw_if(changed: bool) -> EventOutcome {
    if changed {
        EventOutcome::Redraw
    } else {
        EventOutcome::Ignored
    }
}

fn activate(picker: &mut Picker) -> EventOutcome {
    match picker.activate_selected() {
        Some(Activation::Select(value)) => EventOutcome::Selected(value),
        Some(Activation::Navigate(_)) => EventOutcome::Redraw,
        None => EventOutcome::Ignored,
    }
}

fn handle_search_key(key: KeyEvent, picker: &mut Picker) -> EventOutcome {
    match key.code {
        KeyCode::Esc => redraw_if(picker.close_search()),
        KeyCode::Enter => {
            // A changed draft is committed first; an unchanged one activates the row
            if picker.search_draft().trim() != picker.navigation().search_string() {
                redraw_if(picker.submit_search())
            } else {
                activate(picker)
            }
        }
        KeyCode::Up => redraw_if(picker.cursor_up()),
        KeyCode::Down => redraw_if(picker.cursor_down()),
        KeyCode::Backspace => {
            picker.pop_search_char();
            EventOutcome::Redraw
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => EventOutcome::Quit,
        KeyCode::Char(c) => {
            picker.push_search_char(c);
            EventOutcome::Redraw
        }
        _ => EventOutcome::Ignored,
    }
}

fn handle_browse_key(key: KeyEvent, picker: &mut Picker) -> EventOutcome {
    let keys = picker.config().keybindings.clone();
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => EventOutcome::Quit,
        KeyCode::Esc => EventOutcome::Quit,
        KeyCode::Char(c) if c == keys.quit => EventOutcome::Quit,
        KeyCode::Char(c) if c == keys.search => redraw_if(picker.open_search()),
        KeyCode::Char(c) if c == keys.open => redraw_if(picker.open_selected()),
        KeyCode::Char(c) if c == keys.parent => redraw_if(picker.go_up()),
        KeyCode::Up => redraw_if(picker.cursor_up()),
        KeyCode::Down => redraw_if(picker.cursor_down()),
        KeyCode::Right => redraw_if(picker.open_selected()),
        KeyCode::Left | KeyCode::Backspace => redraw_if(picker.go_up()),
        KeyCode::Enter => activate(picker),
        _ => EventOutcome::Ignored,
    }
}
