//! TUI Blocks (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches share a single import path.

pub use tui_blocks_core as core;
pub use tui_blocks_engine as engine;
pub use tui_blocks_input as input;
pub use tui_blocks_term as term;
pub use tui_blocks_types as types;
