//! Interfaces to the host engine.

pub mod point;
pub mod stage;

pub use point::HostPoint;
pub use stage::{fire, EventHandler, HostStage, InputEvent, InputEventKind, SimpleStage, StageRef};
