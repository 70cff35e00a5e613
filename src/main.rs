use std::error::Error;
use std::fs::File;
use std::process;

use log::{error, info, LevelFilter};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use spin_sleep::LoopHelper;

use vip8::display::{MonoTermDisplay, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8::input::{CrosstermInput, Input, InputEvent};
use vip8::interpreter::Chip8Interpreter;
use vip8::sound::SimpleBeep;

const USAGE: &str = "usage: vip8 <rom> [--ips N] [--fps N] [--scale N]";

/// driver knobs, all plain values; nothing here is global
struct Config {
    rom: String,
    instructions_per_frame: u32,
    frame_rate: f64,
    scale: u16,
}

impl Config {
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Config, String> {
        let mut rom = None;
        let mut instructions_per_frame: u32 = 10;
        let mut frame_rate: f64 = 60.0;
        let mut scale: u16 = 1;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--ips" => instructions_per_frame = flag_value(&mut args, "--ips")?,
                "--fps" => frame_rate = flag_value(&mut args, "--fps")?,
                "--scale" => scale = flag_value(&mut args, "--scale")?,
                _ if rom.is_none() => rom = Some(arg),
                _ => return Err(format!("unexpected argument: {}\n{}", arg, USAGE)),
            }
        }
        Ok(Config {
            rom: rom.ok_or_else(|| USAGE.to_string())?,
            instructions_per_frame,
            frame_rate,
            scale,
        })
    }
}

fn flag_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, String> {
    args.next()
        .ok_or_else(|| format!("{} needs a value\n{}", flag, USAGE))?
        .parse()
        .map_err(|_| format!("{} needs a number\n{}", flag, USAGE))
}

/// the terminal UI owns stdout, so logs go to a file instead
fn init_logging() -> Result<(), Box<dyn Error>> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {l} {t} - {m}{n}")))
        .build("vip8.log")?;
    let config = log4rs::config::Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::from_args(std::env::args().skip(1))?;
    init_logging()?;

    let mut display = MonoTermDisplay::new(DISPLAY_WIDTH, DISPLAY_HEIGHT, config.scale)?;
    let mut sound = SimpleBeep::new();
    let mut input = CrosstermInput::new()?;
    let mut interpreter = Chip8Interpreter::new(&mut display, &mut sound);

    let mut rom = File::open(&config.rom)?;
    let loaded = interpreter.load_program(&mut rom)?;
    info!(
        "running {} ({} bytes) at {} instructions/frame, {} fps",
        config.rom, loaded, config.instructions_per_frame, config.frame_rate
    );

    let mut loop_helper = LoopHelper::builder().build_with_target_rate(config.frame_rate);
    'frames: loop {
        loop_helper.loop_start();
        for event in input.poll()? {
            match event {
                InputEvent::KeyDown(code) => interpreter.key_down(code),
                InputEvent::KeyUp(code) => interpreter.key_up(code),
                InputEvent::Quit => break 'frames,
            }
        }
        interpreter.step_frame(config.instructions_per_frame)?;
        loop_helper.loop_sleep();
    }
    info!("quit requested");
    Ok(())
}

fn main() {
    let result = run();

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }

    if let Err(e) = result {
        error!("fatal: {}", e);
        eprintln!("fatal: {}", e);
        process::exit(1);
    }
}
