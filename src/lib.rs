//! Sokoban rules engine: a grid of blocks, a player and boxes to push onto
//! switches, plus the loader, renderer, input mapping, session and solver
//! that the `sokoswitch` binary is built from.

pub mod input;
pub mod level;
pub mod levels;
pub mod session;
pub mod solver;
pub mod tileset;
pub mod zobrist;
