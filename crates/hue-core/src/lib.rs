//! # hue-core — combination engine for hueloop
//!
//! This crate contains everything between the color math and the UI:
//!
//! - **[`combination`]** — the four-role `Combination` record, `Role`, and
//!   the `PinMask` that holds roles constant across generations
//! - **[`palette`]** — the ordered, mutable candidate-color collection
//! - **[`generate`]** — constraint-guided random sampling: draw roles from
//!   the palette until the foreground/background pair meets the target
//!   contrast ratio (bounded retries, best-effort fallback)
//! - **[`history`]** — linear, branch-discarding undo/redo over combinations
//! - **[`share`]** — query-string encoding for shareable combinations
//! - **[`likes`]** — saved-combination list with a pluggable persistence seam
//! - **[`ticker`]** — the auto-cycling interval as a poll-driven handle
//! - **[`filter`]** — colorblindness filter selection (name only; the
//!   visual transform is the renderer's problem)
//! - **[`session`]** — the facade that wires all of the above into the
//!   next/previous/like/pin interaction model

pub mod combination;
pub mod filter;
pub mod generate;
pub mod history;
pub mod likes;
pub mod palette;
pub mod session;
pub mod share;
pub mod ticker;

pub use combination::{Combination, PinMask, Role};
pub use generate::{BackgroundMode, GenerateError, Generated, Generator};
pub use history::History;
pub use palette::Palette;
pub use session::Session;
