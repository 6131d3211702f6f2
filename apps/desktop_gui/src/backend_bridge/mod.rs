//! Bridge between the egui thread and the async upload controller.

pub mod commands;
pub mod runtime;
