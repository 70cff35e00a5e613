use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use log::warn;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::Duration;

/// how many keys the COSMAC keypad has
pub const NUM_KEYS: usize = 16;

/// what the input source reports each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(u8),
    KeyUp(u8),
    Quit,
}

/// map of the left-hand side of a qwerty keyboard onto the 4x4 keypad
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); NUM_KEYS] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// reads keypresses
pub trait Input {
    /// drain everything that happened since the last poll. called once per
    /// frame by the driver, which forwards key events to the interpreter
    fn poll(&mut self) -> Result<Vec<InputEvent>, io::Error>;
}

/// a key is held this many polls past its last press. terminals only ever
/// report presses, so release has to be synthesized
const KEY_HOLD_FRAMES: u8 = 6;

/// terminal implementation of Input, via crossterm events
pub struct CrosstermInput {
    keymap: HashMap<char, u8>,
    held: [u8; NUM_KEYS],
}

impl CrosstermInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(CrosstermInput {
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            held: [0; NUM_KEYS],
        })
    }
}

impl Drop for CrosstermInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for CrosstermInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>, io::Error> {
        let mut events = Vec::new();
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Esc => events.push(InputEvent::Quit),
                    KeyCode::Char('c') if evt.modifiers.contains(KeyModifiers::CONTROL) => {
                        events.push(InputEvent::Quit)
                    }
                    KeyCode::Char(key) => match self.keymap.get(&key) {
                        Some(&code) => {
                            if self.held[code as usize] == 0 {
                                events.push(InputEvent::KeyDown(code));
                            }
                            self.held[code as usize] = KEY_HOLD_FRAMES;
                        }
                        None => {
                            warn!("can't map {:?} to a COSMAC key", key);
                        }
                    },
                    _ => {}
                },
                _ => {}
            }
        }
        // age out held keys and emit the synthetic releases
        for (code, frames) in self.held.iter_mut().enumerate() {
            if *frames > 0 {
                *frames -= 1;
                if *frames == 0 {
                    events.push(InputEvent::KeyUp(code as u8));
                }
            }
        }
        Ok(events)
    }
}

/// dummy Input implementation for testing: one scripted batch per poll
pub struct DummyInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl DummyInput {
    pub fn new(frames: &[&[InputEvent]]) -> Self {
        DummyInput {
            frames: frames.iter().map(|f| f.to_vec()).collect(),
        }
    }
}

impl Input for DummyInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>, io::Error> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}
