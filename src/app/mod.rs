// Application layer: drives the state container and renders its output.

pub mod interactive;
pub mod runtime;
pub mod view;
