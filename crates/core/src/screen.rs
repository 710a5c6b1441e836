//! Line-oriented model of what the terminal is showing.
//!
//! [`LineBuffer`] applies [`DeltaPlan`]s the way the terminal would, which
//! lets tests check that replaying the compiled plans reproduces every
//! frame without looking at escape sequences.

use crate::delta::{DeltaOp, DeltaPlan};
use crate::types::Frame;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineBuffer {
    rows: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row contents, including blank rows left behind by patches.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Rows with trailing blank rows dropped.
    pub fn visible(&self) -> &[String] {
        trim_blank_tail(&self.rows)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn set_row(&mut self, row: usize, content: &str) {
        if row >= self.rows.len() {
            self.rows.resize(row + 1, String::new());
        }
        self.rows[row].clear();
        self.rows[row].push_str(content);
    }

    pub fn apply_op(&mut self, op: &DeltaOp) {
        match op {
            DeltaOp::FullRedraw { lines } => {
                self.clear();
                self.rows.extend(lines.iter().cloned());
            }
            DeltaOp::LinePatch { row, content } => {
                self.set_row(*row, content.as_deref().unwrap_or(""));
            }
        }
    }

    pub fn apply(&mut self, plan: &DeltaPlan) {
        for op in plan.ops() {
            self.apply_op(op);
        }
    }

    /// True when the screen looks exactly like `frame`.
    pub fn shows(&self, frame: &Frame) -> bool {
        self.visible() == trim_blank_tail(frame.lines())
    }
}

fn trim_blank_tail(rows: &[String]) -> &[String] {
    let end = rows
        .iter()
        .rposition(|r| !r.is_empty())
        .map_or(0, |i| i + 1);
    &rows[..end]
}
