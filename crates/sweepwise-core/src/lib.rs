//! Core data structures for Minesweeper decision making.
//!
//! This crate provides the board model shared by the solver, the vision layer
//! and the bot loop.
//!
//! # Overview
//!
//! - [`position`]: Cell coordinates ([`Position`]) and board size ([`Dimensions`])
//! - [`tile`]: The per-cell state ([`Tile`]) as read from the game
//! - [`board`]: A fixed-size grid of tiles ([`Board`]) with bounds-checked
//!   neighbor queries
//!
//! # Examples
//!
//! ```
//! use sweepwise_core::{Board, Position, Tile};
//!
//! let board: Board = "
//!     1__
//!     11_
//!     ___
//! "
//! .parse()?;
//!
//! assert_eq!(board[Position::new(0, 0)], Tile::Number(1));
//! let covered = board.covered_neighbors(Position::new(0, 0));
//! assert_eq!(covered.as_slice(), &[Position::new(0, 1)]);
//! # Ok::<(), sweepwise_core::BoardError>(())
//! ```

pub mod board;
mod error;
pub mod position;
pub mod tile;

pub use self::{
    board::{Board, Neighbors},
    error::BoardError,
    position::{Dimensions, Position},
    tile::Tile,
};
