//! Runtime that executes gateway calls off the UI thread.

pub mod runtime;
