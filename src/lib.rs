//! Snaktionary - a two-player word race in the terminal
//!
//! One player steers a snake with the keyboard and eats the letters of each
//! word in order. The other player moves a pointer with the mouse and clicks
//! the same letters, hidden among decoys. Whoever finishes every word first,
//! or outlasts the other's mistake, wins.
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Input framing, the merged event queue and key mapping (input module)
//! - The menu/play session state machine (session module)
//! - TUI rendering (render module) and the terminal event loop (modes module)
//! - The winner log and status metrics (winners, metrics modules)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
pub mod winners;
