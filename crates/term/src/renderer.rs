//! TerminalRenderer: writes pre-encoded frame scripts to a terminal.
//!
//! Delta plans are encoded to bytes once, up front, so the playback loop
//! only ever copies ready-made buffers to the output.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
    QueueableCommand,
};

use crate::core::{DeltaOp, DeltaPlan};

/// Raw bytes for one frame, ready to be written as-is.
pub type FrameScript = Vec<u8>;

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    /// Hide the cursor and start from a blank, homed screen.
    pub fn enter(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::Clear(ClearType::All))?;
        self.buf.queue(cursor::MoveTo(0, 0))?;
        self.flush_buf()
    }

    /// Write one encoded frame and flush it.
    pub fn draw(&mut self, script: &[u8]) -> Result<()> {
        self.out.write_all(script)?;
        self.out.flush()?;
        Ok(())
    }

    /// Leave the terminal usable: blank, homed, cursor visible, then the
    /// farewell line.
    pub fn restore(&mut self, fps: u32) -> Result<()> {
        self.buf.clear();
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::Clear(ClearType::All))?;
        self.buf.queue(cursor::MoveTo(0, 0))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(Print(farewell(fps)))?;
        self.buf.queue(Print('\n'))?;
        self.flush_buf()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Human-readable goodbye printed on shutdown.
pub fn farewell(fps: u32) -> String {
    format!("Ciallo～(∠・ω< )⌒★ @ {fps} FPS")
}

/// Encode every plan into a frame script.
pub fn encode_plans(plans: &[DeltaPlan]) -> Result<Vec<FrameScript>> {
    plans
        .iter()
        .map(|plan| {
            let mut out = Vec::new();
            encode_plan_into(plan, &mut out)?;
            Ok(out)
        })
        .collect()
}

/// Encode a single plan into `out`, op by op, in compiled order.
pub fn encode_plan_into(plan: &DeltaPlan, out: &mut Vec<u8>) -> Result<()> {
    for op in plan.ops() {
        match op {
            DeltaOp::FullRedraw { lines } => encode_full_into(lines, out)?,
            DeltaOp::LinePatch { row, content } => {
                encode_patch_into(*row, content.as_deref(), out)?
            }
        }
    }
    Ok(())
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(lines: &[String], out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    for line in lines {
        out.queue(Print(line))?;
        out.queue(Print('\n'))?;
    }
    Ok(())
}

/// Encode a single-row replacement into `out`.
///
/// The row is erased before writing so a shorter line leaves nothing behind.
pub fn encode_patch_into(row: usize, content: Option<&str>, out: &mut Vec<u8>) -> Result<()> {
    let row = u16::try_from(row).unwrap_or(u16::MAX);
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(terminal::Clear(ClearType::CurrentLine))?;
    if let Some(line) = content {
        out.queue(Print(line))?;
    }
    out.queue(Print('\n'))?;
    Ok(())
}
