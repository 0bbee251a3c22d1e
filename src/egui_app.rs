//! egui front-end: state, controller and renderer.

pub mod controller;
pub mod state;
pub mod ui;
