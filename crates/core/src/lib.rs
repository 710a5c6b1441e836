//! Animation core: loading frames and compiling them into terminal deltas.
//!
//! This crate has no terminal or timer dependencies. It turns animation
//! JSON into an [`Animation`](crate::types::Animation) and the animation
//! into one [`DeltaPlan`] per frame.
//!
//! # Module Structure
//!
//! - [`store`]: JSON decoding and validation
//! - [`delta`]: the delta compiler (full redraw for frame 0, line patches after)
//! - [`screen`]: a line buffer that replays plans, used to check them
//!
//! # Example
//!
//! ```
//! use ciallo_core::{compile, store, DeltaOp, LineBuffer};
//!
//! let anim = store::from_json(r#"[["A","B"],["A","C"],["A","C"]]"#).unwrap();
//! let plans = compile(&anim);
//!
//! assert_eq!(plans[1].ops(), [DeltaOp::LinePatch { row: 1, content: Some("C".into()) }]);
//! assert!(plans[2].is_empty());
//!
//! let mut screen = LineBuffer::new();
//! for (plan, frame) in plans.iter().zip(anim.frames()) {
//!     screen.apply(plan);
//!     assert!(screen.shows(frame));
//! }
//! ```

pub mod delta;
pub mod screen;
pub mod store;

pub use ciallo_types as types;

pub use delta::{compile, op_count, DeltaOp, DeltaPlan};
pub use screen::LineBuffer;
pub use store::AnimationError;
