//! Othello rules engine, minimax/alpha-beta AI and match runner.

pub mod core;
pub mod display;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;

#[cfg(test)]
mod logic_tests;
