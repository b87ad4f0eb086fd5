//! Core built-ins registration.
//!
//! This module provides the function to register all core native classes
//! with the NativeClassRegistry.

use crate::runner::plugin::registry::{ClassEntry, NativeClassRegistry};

use super::mouse::{self, MouseClass};
use super::point::{self, PointClass};
use super::system::{self, SystemClass};

/// Register all core native classes with the registry.
pub fn register_core_builtins(registry: &mut NativeClassRegistry) {
    registry.register(ClassEntry::new(mouse::CLASS_NAME, false, Box::new(MouseClass)).as_broadcaster());
    registry.register(ClassEntry::new(point::CLASS_NAME, true, Box::new(PointClass)));
    registry.register(ClassEntry::new(system::CLASS_NAME, false, Box::new(SystemClass)));
}
