//! Delta compiler: per-frame line patches.
//!
//! Frame 0 is always a full redraw. Every later frame is reduced to the
//! rows whose content differs from the frame before it, in ascending row
//! order. Rows missing from either frame compare as empty strings, so a
//! frame that shrinks gets its stale trailing rows blanked and a frame that
//! grows gets the new rows written.
//!
//! Plans are compiled once at startup and replayed on every loop.

use crate::types::{Animation, Frame};

/// One terminal write step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaOp {
    /// Clear the screen, home the cursor, write every line in order.
    FullRedraw { lines: Vec<String> },
    /// Move to `row` (0-based), column 0, and replace that row.
    /// `None` leaves the row blank.
    LinePatch { row: usize, content: Option<String> },
}

/// Ordered writes turning the previously displayed frame into this one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeltaPlan {
    ops: Vec<DeltaOp>,
}

impl DeltaPlan {
    pub fn ops(&self) -> &[DeltaOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Full redraw of `frame`, independent of whatever was on screen.
    pub fn full(frame: &Frame) -> Self {
        Self {
            ops: vec![DeltaOp::FullRedraw {
                lines: frame.lines().to_vec(),
            }],
        }
    }

    /// Line patches from `prev` to `cur`.
    pub fn between(prev: &Frame, cur: &Frame) -> Self {
        let mut ops = Vec::new();
        for_each_changed_row(prev, cur, |row, content| {
            ops.push(DeltaOp::LinePatch {
                row,
                content: content.map(str::to_owned),
            });
        });
        Self { ops }
    }
}

/// Compile one plan per frame: a full redraw for frame 0, patches after.
pub fn compile(animation: &Animation) -> Vec<DeltaPlan> {
    let frames = animation.frames();
    let mut plans = Vec::with_capacity(frames.len());
    plans.push(DeltaPlan::full(&frames[0]));
    plans.extend(frames.windows(2).map(|w| DeltaPlan::between(&w[0], &w[1])));
    plans
}

/// Total number of ops across `plans`.
pub fn op_count(plans: &[DeltaPlan]) -> usize {
    plans.iter().map(DeltaPlan::len).sum()
}

fn for_each_changed_row(prev: &Frame, cur: &Frame, mut f: impl FnMut(usize, Option<&str>)) {
    let max_rows = prev.len().max(cur.len());
    for row in 0..max_rows {
        let before = prev.line(row).unwrap_or("");
        let after = cur.line(row);
        if after.unwrap_or("") != before {
            f(row, after);
        }
    }
}
