//! Input sink collaborator: click and key-chord injection.

use enigo::{Button, Coordinate, Direction, Enigo, Keyboard, Mouse};

use autopermit_core::{Chord, ChordKey, Error, Point, Result};

/// Accepts click points and key chords and executes them. Fire-and-forget:
/// failures are logged by the caller, never fatal.
pub trait InputSink {
    /// Click the left mouse button at an absolute screen point.
    fn click(&mut self, point: Point) -> Result<()>;

    /// Press a key chord: modifiers in order, released in reverse.
    fn send_chord(&mut self, chord: &Chord) -> Result<()>;
}

/// OS-backed input sink using enigo.
pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    /// Create an input sink over the platform input backend.
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&enigo::Settings::default())
            .map_err(|e| Error::DispatchFailed(e.to_string()))?;
        Ok(Self { enigo })
    }
}

fn to_enigo_key(key: ChordKey) -> enigo::Key {
    match key {
        ChordKey::Char(c) => enigo::Key::Unicode(c),
        ChordKey::Ctrl => enigo::Key::Control,
        ChordKey::Alt => enigo::Key::Alt,
        ChordKey::Shift => enigo::Key::Shift,
        ChordKey::Enter => enigo::Key::Return,
        ChordKey::Escape => enigo::Key::Escape,
        ChordKey::Tab => enigo::Key::Tab,
        ChordKey::Space => enigo::Key::Space,
    }
}

impl InputSink for EnigoSink {
    fn click(&mut self, point: Point) -> Result<()> {
        self.enigo
            .move_mouse(point.x, point.y, Coordinate::Abs)
            .map_err(|e| Error::DispatchFailed(e.to_string()))?;
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| Error::DispatchFailed(e.to_string()))?;
        Ok(())
    }

    fn send_chord(&mut self, chord: &Chord) -> Result<()> {
        for key in chord.keys() {
            self.enigo
                .key(to_enigo_key(*key), Direction::Press)
                .map_err(|e| Error::DispatchFailed(e.to_string()))?;
        }
        for key in chord.keys().iter().rev() {
            self.enigo
                .key(to_enigo_key(*key), Direction::Release)
                .map_err(|e| Error::DispatchFailed(e.to_string()))?;
        }
        Ok(())
    }
}
