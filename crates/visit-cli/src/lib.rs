//! Interactive session components for the visit records tool.

pub mod console;
pub mod display;
pub mod logging;
pub mod session;
