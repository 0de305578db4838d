use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::dialog::DialogEvent;

/// Translate a terminal event into a dialog event.
///
/// Only initial key presses are mapped; repeats, releases, mouse and resize
/// events yield `None` (a resize is picked up by the next redraw anyway).
pub fn map_event(event: &Event) -> Option<DialogEvent> {
    match event {
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

pub fn map_key(key: &KeyEvent) -> Option<DialogEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(DialogEvent::Cancel),
            KeyCode::Char('u') => Some(DialogEvent::ClearField),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => Some(DialogEvent::FocusNext),
        KeyCode::BackTab => Some(DialogEvent::FocusPrev),
        KeyCode::Up => Some(DialogEvent::SelectPrev),
        KeyCode::Down => Some(DialogEvent::SelectNext),
        KeyCode::Enter => Some(DialogEvent::Confirm),
        KeyCode::Esc => Some(DialogEvent::Cancel),
        KeyCode::Backspace => Some(DialogEvent::Backspace),
        KeyCode::Char(c) => Some(DialogEvent::Char(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent, MouseEventKind};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn maps_navigation_and_editing_keys() {
        assert_eq!(
            map_key(&press(KeyCode::Tab, KeyModifiers::NONE)),
            Some(DialogEvent::FocusNext)
        );
        assert_eq!(
            map_key(&press(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(DialogEvent::FocusPrev)
        );
        assert_eq!(
            map_key(&press(KeyCode::Char('7'), KeyModifiers::NONE)),
            Some(DialogEvent::Char('7'))
        );
        assert_eq!(
            map_key(&press(KeyCode::Char('C'), KeyModifiers::SHIFT)),
            Some(DialogEvent::Char('C'))
        );
        assert_eq!(
            map_key(&press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(DialogEvent::Confirm)
        );
    }

    #[test]
    fn ctrl_c_and_esc_cancel() {
        assert_eq!(
            map_key(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(DialogEvent::Cancel)
        );
        assert_eq!(
            map_key(&press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(DialogEvent::Cancel)
        );
    }

    #[test]
    fn ignores_releases_and_mouse() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(&release), None);

        let mouse = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(&mouse), None);
    }
}
