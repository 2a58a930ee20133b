//! carvis (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof:
//! `carvis::{types, core, term, scene}`.

pub use carvis_core as core;
pub use carvis_scene as scene;
pub use carvis_term as term;
pub use carvis_types as types;
