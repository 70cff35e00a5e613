use std::io;
use std::io::Read;

use crate::error::Error;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// how much RAM we have
pub const RAM_SIZE: usize = 4096;

/// where programs are loaded
pub const PROGRAM_ADDR: u16 = 0x200;

/// everything from the program address to the top of RAM is loadable
pub const MAX_PROGRAM_BYTES: usize = RAM_SIZE - PROGRAM_ADDR as usize;

/// bytes per font glyph; glyph d lives at [5d, 5d+5)
pub const GLYPH_BYTES: u16 = 5;

/// The CHIP-8 memory space:
///   0x0000-0x01ff  reserved (font glyphs live at the bottom)
///   0x0200-0x0fff  program
///
/// Every access is bounds-checked against the 4K space; an access that
/// would leave it is an `AddressOutOfRange` error, not a panic. Programs
/// get to crash the session, not the emulator.
pub struct Chip8Memory {
    bytes: Box<[u8]>,
}

impl Chip8Memory {
    /// initialise 4K of RAM with the font baked in
    pub fn new() -> Self {
        let mut m = Chip8Memory {
            bytes: Box::new([0u8; RAM_SIZE]),
        };
        m.reset();
        m
    }

    /// zero the whole space and re-bake the font
    pub fn reset(&mut self) {
        self.bytes.fill(0);
        self.bytes[..CHIP8_FONT.len()].copy_from_slice(&CHIP8_FONT);
    }

    /// load a CHIP-8 program at 0x200, zeroing the rest of program space
    /// first so nothing survives from a previous load
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize, Error> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        if buf.len() > MAX_PROGRAM_BYTES {
            return Err(Error::ProgramTooLarge(buf.len()));
        }
        let start = PROGRAM_ADDR as usize;
        self.bytes[start..].fill(0);
        self.bytes[start..start + buf.len()].copy_from_slice(&buf);
        Ok(buf.len())
    }

    /// get a two-byte big-endian word (instruction fetch)
    pub fn read_word(&self, addr: u16) -> Result<u16, Error> {
        let word = self.read_slice(addr, 2)?;
        Ok((u16::from(word[0]) << 8) | u16::from(word[1]))
    }

    /// get a r/o slice of the underlying memory
    pub fn read_slice(&self, addr: u16, len: usize) -> Result<&[u8], Error> {
        let start = addr as usize;
        self.bytes
            .get(start..start.saturating_add(len))
            .ok_or(Error::AddressOutOfRange(addr))
    }

    /// write a chunk of bytes into RAM
    pub fn write_slice(&mut self, addr: u16, data: &[u8]) -> Result<(), Error> {
        let start = addr as usize;
        self.bytes
            .get_mut(start..start.saturating_add(data.len()))
            .ok_or(Error::AddressOutOfRange(addr))?
            .copy_from_slice(data);
        Ok(())
    }
}

const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_space_zeroed() {
        let m = Chip8Memory::new();
        // NB. memory is zeroed from 0x200 because before that we bake in
        //     the font
        assert_eq!(m.bytes[0x200..], [0; MAX_PROGRAM_BYTES]);
    }

    #[test]
    fn test_glyph_layout() {
        let m = Chip8Memory::new();
        // glyph d occupies [5d, 5d+5)
        assert_eq!(
            m.read_slice(0, 5).unwrap(),
            &[0xF0, 0x90, 0x90, 0x90, 0xF0]
        );
        assert_eq!(
            m.read_slice(0xF * GLYPH_BYTES, 5).unwrap(),
            &[0xF0, 0x80, 0xF0, 0x80, 0x80]
        );
    }

    #[test]
    fn test_write_slice_ok() {
        let mut dst = Chip8Memory::new();
        dst.write_slice(0x208, &[0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(
            dst.bytes[0x200..0x210],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn test_read_word_big_endian() {
        let mut m = Chip8Memory::new();
        m.write_slice(0x200, &[0x04, 0x05]).unwrap();
        assert_eq!(m.read_word(0x200).unwrap(), 0x0405);
    }

    #[test]
    fn test_read_past_end_errors() {
        let m = Chip8Memory::new();
        assert!(matches!(
            m.read_slice(0xfff, 2),
            Err(Error::AddressOutOfRange(0xfff))
        ));
    }

    #[test]
    fn test_write_past_end_errors() {
        let mut m = Chip8Memory::new();
        assert!(matches!(
            m.write_slice(0xffe, &[0; 3]),
            Err(Error::AddressOutOfRange(0xffe))
        ));
    }

    #[test]
    fn test_program_load_ok() {
        let mut dst = Chip8Memory::new();
        let mut prog: &[u8] = &[0x00, 0xe0]; // clear screen
        assert_eq!(dst.load_program(&mut prog).unwrap(), 2);
        assert_eq!(dst.read_slice(0x200, 2).unwrap(), &[0x00, 0xe0]);
    }

    #[test]
    fn test_program_load_at_limit() {
        let mut dst = Chip8Memory::new();
        let prog = vec![0xaa; MAX_PROGRAM_BYTES];
        assert_eq!(
            dst.load_program(&mut prog.as_slice()).unwrap(),
            MAX_PROGRAM_BYTES
        );
        assert_eq!(dst.bytes[RAM_SIZE - 1], 0xaa);
    }

    #[test]
    fn test_program_load_too_large() {
        let mut dst = Chip8Memory::new();
        let prog = vec![0xaa; MAX_PROGRAM_BYTES + 1];
        assert!(matches!(
            dst.load_program(&mut prog.as_slice()),
            Err(Error::ProgramTooLarge(3585))
        ));
    }

    #[test]
    fn test_reload_zeroes_leftovers() {
        let mut m = Chip8Memory::new();
        let mut long: &[u8] = &[0x11; 8];
        m.load_program(&mut long).unwrap();
        let mut short: &[u8] = &[0x22; 2];
        m.load_program(&mut short).unwrap();
        assert_eq!(m.read_slice(0x200, 4).unwrap(), &[0x22, 0x22, 0, 0]);
    }
}
