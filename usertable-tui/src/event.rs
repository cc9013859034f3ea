//! Terminal input, reduced to what the table and search box react to.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use usertable_lib::Modifiers;

/// Keys the front end reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Escape,
    Up,
    Down,
    PageUp,
    PageDown,
}

/// A translated input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key { key: Key, modifiers: Modifiers },
    /// Left button pressed.
    Press { x: u16, y: u16, modifiers: Modifiers },
    /// Pointer moved with the left button held.
    Drag { x: u16, y: u16 },
    /// Left button released.
    Release { x: u16, y: u16 },
    /// Pointer moved with no button held.
    Move { x: u16, y: u16 },
    /// Wheel scrolled; positive is down.
    Scroll { delta: i16 },
    Resize { width: u16, height: u16 },
}

/// Convert crossterm modifiers as reported.
pub fn modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        meta: mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    }
}

/// Modifiers of a mouse press.
///
/// Terminals rarely report the cmd key, so Alt stands in for it here and
/// only here: an Alt-click counts as meta.
pub fn press_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut pressed = modifiers(mods);
    pressed.meta |= pressed.alt;
    pressed
}

fn key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => return None,
    };
    Some(key)
}

/// Translate a crossterm event. Events nothing reacts to map to `None`.
pub fn translate(event: CrosstermEvent) -> Option<Input> {
    match event {
        CrosstermEvent::Key(k) if k.kind != KeyEventKind::Release => Some(Input::Key {
            key: key(k.code)?,
            modifiers: modifiers(k.modifiers),
        }),
        CrosstermEvent::Mouse(m) => {
            let (x, y) = (m.column, m.row);
            match m.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Input::Press {
                    x,
                    y,
                    modifiers: press_modifiers(m.modifiers),
                }),
                MouseEventKind::Drag(MouseButton::Left) => Some(Input::Drag { x, y }),
                MouseEventKind::Up(MouseButton::Left) => Some(Input::Release { x, y }),
                MouseEventKind::Moved => Some(Input::Move { x, y }),
                MouseEventKind::ScrollDown => Some(Input::Scroll { delta: 1 }),
                MouseEventKind::ScrollUp => Some(Input::Scroll { delta: -1 }),
                _ => None,
            }
        }
        CrosstermEvent::Resize(width, height) => Some(Input::Resize { width, height }),
        _ => None,
    }
}
