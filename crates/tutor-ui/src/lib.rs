//! egui panels for the tutor.
//!
//! Panels render from borrowed session state and return actions; they
//! never call the controller themselves.

pub mod chart;
pub mod panels;
pub mod state;
pub mod theme;
pub mod visualizer;

#[cfg(test)]
mod tests;
