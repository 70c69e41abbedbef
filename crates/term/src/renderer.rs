//! Flushes framebuffers to the real terminal, sending only changed runs.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};
use tracing::{debug, warn};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
    enhanced_keys: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            prev: None,
            buf: Vec::with_capacity(32 * 1024),
            enhanced_keys: false,
        }
    }

    /// Raw mode plus alternate screen
    ///
    /// Asks the terminal for key release events when it supports them; check
    /// [`Self::has_release_events`] afterwards.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;

        self.enhanced_keys = match terminal::supports_keyboard_enhancement() {
            Ok(supported) => supported,
            Err(err) => {
                warn!(error = %err, "could not query keyboard enhancement support");
                false
            }
        };
        if self.enhanced_keys {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        debug!(release_events = self.enhanced_keys, "terminal entered");
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.enhanced_keys {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn has_release_events(&self) -> bool {
        self.enhanced_keys
    }

    /// Next draw repaints everything (e.g. after a resize)
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Draw `fb`, then swap it with the previous frame
    ///
    /// Callers keep passing the same buffer; after the call it holds the
    /// frame before last and must be fully redrawn.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.prev.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            Some(mut prev) => {
                encode_full_into(fb, &mut self.buf)?;
                prev.resize(fb.width(), fb.height());
                prev
            }
            None => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.prev = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a complete repaint of `fb` into `out`
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut style = None;
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            print_glyph(out, fb.get(x, y).unwrap_or_default(), &mut style)?;
        }
        if y + 1 < fb.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the runs that differ between `prev` and `next`
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            print_glyph(out, next.get(x + dx, y).unwrap_or_default(), &mut style)?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn print_glyph(out: &mut Vec<u8>, glyph: Glyph, current: &mut Option<Style>) -> Result<()> {
    if *current != Some(glyph.style) {
        apply_style_into(out, glyph.style)?;
        *current = Some(glyph.style);
    }
    out.queue(Print(glyph.ch))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(Rgb { r, g, b }: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// `(x, y, len)` for every horizontal run of changed glyphs
///
/// Mismatched sizes mark every row dirty.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let (w, h) = (next.width(), next.height());
    if prev.width() != w || prev.height() != h {
        return (0..h).map(|y| (0, y, w)).collect();
    }

    let mut runs = Vec::new();
    for y in 0..h {
        let differs = |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        while x < w {
            if !differs(x) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && differs(x) {
                x += 1;
            }
            runs.push((start, y, x - start));
        }
    }
    runs
}
