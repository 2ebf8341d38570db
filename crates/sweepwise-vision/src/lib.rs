//! Board perception from screen captures.
//!
//! This crate turns an RGB capture of the game area into a
//! [`Board`](sweepwise_core::Board). Capturing the screen is left to a
//! [`FrameGrabber`] implementation; everything after that is pure and
//! testable.
//!
//! # Overview
//!
//! - [`Frame`]: an in-memory RGB image
//! - [`TileLayout`]: how the frame is cut into tiles
//! - [`ColorTable`] and [`classify`]: mapping a tile's pixels to a
//!   [`Tile`](sweepwise_core::Tile)
//! - [`Perception`]: parallel per-tile classification with a cache that
//!   skips tiles whose pixels did not change
//! - [`render_board`]: the inverse, painting a board with the table's colors
//!
//! # Examples
//!
//! ```
//! use sweepwise_core::{Board, Dimensions};
//! use sweepwise_vision::{ColorTable, Perception, ScanConfig, TileLayout, render_board};
//!
//! let board: Board = "
//!     1F_
//!     11_
//! "
//! .parse()?;
//! let layout = TileLayout::new(board.dims(), 30, 30)?;
//! let table = ColorTable::default();
//! let frame = render_board(&board, &layout, &table)?;
//!
//! let mut perception = Perception::new(layout, table, ScanConfig::default());
//! assert_eq!(perception.read(&frame)?, board);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    color::{ColorClass, ColorTable, ScanConfig, classify},
    error::VisionError,
    frame::{Frame, Rgb},
    layout::{Rect, TileLayout},
    perception::{FrameGrabber, Perception, ReadStats, TileCache},
    render::render_board,
};

mod color;
mod error;
mod frame;
mod layout;
mod perception;
mod render;
