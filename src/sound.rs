use beep::beep;
use std::error::Error;

/// what the interpreter plays while the sound timer is live
pub const TONE_HZ: u16 = 440;

/// single-tone buzzer. both calls are idempotent: play while playing keeps
/// the tone going, stop while silent is a no-op
pub trait Sound {
    fn play(&mut self, frequency: u16) -> Result<(), Box<dyn Error>>;
    fn stop(&mut self) -> Result<(), Box<dyn Error>>;
}

pub struct SimpleBeep {
    playing: Option<u16>,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { playing: None }
    }
}

impl Sound for SimpleBeep {
    fn play(&mut self, frequency: u16) -> Result<(), Box<dyn Error>> {
        if self.playing != Some(frequency) {
            beep(frequency)?;
            self.playing = Some(frequency);
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        if self.playing.is_some() {
            beep(0)?;
            self.playing = None;
        }
        Ok(())
    }
}

impl Drop for SimpleBeep {
    // leaving a tone running after the process dies is unforgivable
    fn drop(&mut self) {
        let _ = beep(0);
    }
}

pub struct Mute {}
impl Mute {
    pub fn new() -> Self {
        Mute {}
    }
}
impl Sound for Mute {
    fn play(&mut self, _frequency: u16) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}
