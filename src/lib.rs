///
/// ## Design
///
/// * one `step_frame` per 60Hz tick: a bounded batch of instructions, one
///   timer decay, then sound and display side effects
/// * abstract display/input/sound behind traits so alternatives can plug
///   in; starting with TUI in-console, beep(1) and crossterm key events
/// * decode is a separate step producing a tagged instruction variant, so
///   opcode patterns are testable without machine state
/// * the interpreter owns all machine state exclusively; the driver feeds
///   key events in through `key_down`/`key_up` before each frame, which is
///   also what resolves an Fx0A key-wait
/// * every error (bad opcode, stack misuse, access outside the 4K space,
///   oversized program) is fatal to the session and surfaces to the driver;
///   no retries, no logging from the core
///
/// Model
///
/// main (driver)
///  |-- display, input, sound, config
///  |-- interpreter(display, sound)
///  |    |-- memory (font + program)
///  |    `-- machine state (V0-VF, I, PC, stack, timers, keys, mode)
///  `-- frame loop
///       |-- events = input.poll()
///       |-- interpreter.key_down/key_up per event
///       |-- interpreter.step_frame(instructions_per_frame)
///       `-- sleep the rest of the tick
pub mod display;
pub mod error;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod sound;
