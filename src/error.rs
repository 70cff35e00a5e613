use std::io;
use thiserror::Error;

/// Everything that can kill an emulation session. None of these are
/// recoverable by the interpreter itself; the driver decides whether to
/// reload or bail out.
#[derive(Debug, Error)]
pub enum Error {
    #[error("program of {0} bytes exceeds the 3584 byte program area")]
    ProgramTooLarge(usize),

    #[error("call stack overflow")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,

    #[error("invalid opcode {0:#06x}")]
    InvalidOpcode(u16),

    #[error("address {0:#05x} is outside addressable memory")]
    AddressOutOfRange(u16),

    #[error("audio device: {0}")]
    Audio(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_opcode_names_the_word() {
        let e = Error::InvalidOpcode(0x5001);
        assert_eq!(e.to_string(), "invalid opcode 0x5001");
    }

    #[test]
    fn test_program_too_large_names_the_limit() {
        let e = Error::ProgramTooLarge(3585);
        assert!(e.to_string().contains("3584"));
    }
}
