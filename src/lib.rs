pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod keycodes;
pub mod keymap;
pub mod layouts;
pub mod parser;
pub mod registry;
pub mod reorder;
pub mod serializer;
// cmd and reports belong to the binary (main.rs).

pub use crate::error::{KbdError, KbdResult};
pub use crate::keymap::{Action, Keymap};
pub use crate::parser::{parse, Parsed};
pub use crate::serializer::serialize;
