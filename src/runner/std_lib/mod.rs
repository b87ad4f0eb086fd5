//! Standard library native classes.
//!
//! This module contains the script-visible classes backed by the host:
//! Mouse, Point and System.

pub mod core;
pub mod mouse;
pub mod point;
pub mod system;

pub use self::core::register_core_builtins;
