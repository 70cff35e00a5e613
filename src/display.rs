use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// native display resolution
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Display is used by the interpreter to draw things on the screen. It
/// abstracts the implementation details, so a variety of kinds of screen
/// would work. Pixel state lives on this side of the seam: the interpreter
/// only ever XORs single sprite bits in and learns whether one collided.
pub trait Display {
    /// blank every pixel
    fn clear(&mut self);

    /// XOR one pixel; returns true if it went lit -> unlit (a collision).
    /// Coordinates past the edge are this display's problem, not the
    /// interpreter's; this crate's displays wrap them.
    fn set_pixel(&mut self, x: usize, y: usize) -> bool;

    /// flush the frame to the output device
    fn present(&mut self) -> Result<(), io::Error>;
}

/// One bit per pixel, XOR compositing, coordinates wrapped modulo the
/// resolution on both axes (so sprites drawn half off-screen reappear on
/// the opposite edge).
pub struct FrameBuffer {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize) -> bool {
        let idx = (y % self.height) * self.width + (x % self.width);
        let was_lit = self.bits[idx];
        self.bits[idx] = !was_lit;
        was_lit
    }

    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        self.bits[(y % self.height) * self.width + (x % self.width)]
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.width - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.height - 1) as f64, 0.0]
    }

    /// lit pixels as canvas coords; the canvas y axis points up, so rows
    /// are negated
    fn lit_points(&self) -> impl std::iter::Iterator<Item = (f64, f64)> + '_ {
        let w = self.width;
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &lit)| lit)
            .map(move |(idx, _)| ((idx % w) as f64, -1.0 * ((idx / w) as f64)))
    }
}

/// monochrome display in a terminal, rendered using TUI over crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    buffer: FrameBuffer,
    scale: u16,
}

impl MonoTermDisplay {
    pub fn new(width: usize, height: usize, scale: u16) -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(MonoTermDisplay {
            terminal,
            buffer: FrameBuffer::new(width, height),
            scale: scale.max(1),
        })
    }
}

impl Display for MonoTermDisplay {
    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn set_pixel(&mut self, x: usize, y: usize) -> bool {
        self.buffer.set_pixel(x, y)
    }

    fn present(&mut self) -> Result<(), io::Error> {
        let coords: Vec<(f64, f64)> = self.buffer.lit_points().collect();
        let x_bounds = self.buffer.x_bounds();
        let y_bounds = self.buffer.y_bounds();
        // the canvas interpolates its bounds onto the widget area, so a
        // larger Rect with the same bounds scales each pixel up
        let size = Rect::new(
            0,
            0,
            2 + self.buffer.width() as u16 * self.scale,
            2 + self.buffer.height() as u16 * self.scale,
        );

        self.terminal.draw(|f| {
            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(x_bounds)
                .y_bounds(y_bounds)
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &coords,
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

/// headless display for testing; composites like the real thing but never
/// touches a terminal
pub struct DummyDisplay {
    buffer: FrameBuffer,
}

impl DummyDisplay {
    pub fn new() -> DummyDisplay {
        DummyDisplay {
            buffer: FrameBuffer::new(DISPLAY_WIDTH, DISPLAY_HEIGHT),
        }
    }

    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        self.buffer.is_lit(x, y)
    }

    pub fn lit_count(&self) -> usize {
        self.buffer.bits.iter().filter(|&&b| b).count()
    }
}

impl Display for DummyDisplay {
    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn set_pixel(&mut self, x: usize, y: usize) -> bool {
        self.buffer.set_pixel(x, y)
    }

    fn present(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // FrameBuffer tests
    #[test]
    fn test_set_pixel_lights_and_reports_no_collision() {
        let mut fb = FrameBuffer::new(64, 32);
        assert!(!fb.set_pixel(3, 4));
        assert!(fb.is_lit(3, 4));
    }

    #[test]
    fn test_set_pixel_twice_erases_and_collides() {
        let mut fb = FrameBuffer::new(64, 32);
        fb.set_pixel(3, 4);
        assert!(fb.set_pixel(3, 4));
        assert!(!fb.is_lit(3, 4));
    }

    #[test]
    fn test_set_pixel_wraps_both_axes() {
        let mut fb = FrameBuffer::new(64, 32);
        fb.set_pixel(64 + 3, 32 + 1);
        assert!(fb.is_lit(3, 1));
    }

    #[test]
    fn test_clear_blanks_everything() {
        let mut fb = FrameBuffer::new(64, 32);
        fb.set_pixel(0, 0);
        fb.set_pixel(63, 31);
        fb.clear();
        assert!(!fb.is_lit(0, 0));
        assert!(!fb.is_lit(63, 31));
    }

    #[test]
    fn test_x_bounds() {
        let fb = FrameBuffer::new(64, 32);
        assert_eq!(fb.x_bounds(), [0.0, 63.0]);
    }

    #[test]
    fn test_y_bounds() {
        let fb = FrameBuffer::new(64, 32);
        assert_eq!(fb.y_bounds(), [-31.0, 0.0]);
    }

    #[test]
    fn test_lit_points_negate_rows() {
        let mut fb = FrameBuffer::new(64, 32);
        fb.set_pixel(5, 2);
        let pts: Vec<_> = fb.lit_points().collect();
        assert_eq!(pts, vec![(5.0, -2.0)]);
    }

    // DummyDisplay tests
    #[test]
    fn test_dummy_display_composites() {
        let mut d = DummyDisplay::new();
        assert!(!d.set_pixel(1, 1));
        assert!(d.set_pixel(1, 1));
        assert_eq!(d.lit_count(), 0);
    }
}
