//! # scriptshim - legacy script object model in Rust
//!
//! The object/property substrate and native-binding boundary of a runtime that re-implements a
//! prototype-based, loosely typed scripting language on top of a host engine:
//! - Property descriptors and prototype-chain resolution (get / put / delete / enumerate)
//! - Total coercions between script values, numbers, strings and booleans
//! - A native class binder exposing host functionality as script classes
//! - An event bridge re-dispatching host input as broadcast calls
//!
//! ## Quick Start
//!
//! ```
//! use scriptshim::runner::ds::realm::Context;
//! use scriptshim::runner::ds::value::ScriptValue;
//! use scriptshim::runner::ds::operations::object::{call_property, construct, get};
//! use scriptshim::runner::plugin::registry::NativeClassRegistry;
//!
//! let ctx = Context::with_defaults();
//! NativeClassRegistry::with_core().install(&ctx).unwrap();
//!
//! let point_class = ctx.global("Point").unwrap();
//! let p = construct(&ctx, &point_class, &[ScriptValue::Number(3.0), ScriptValue::Number(4.0)]);
//! let p = p.as_object().unwrap();
//! assert_eq!(get(&ctx, p, "length"), ScriptValue::Number(5.0));
//! assert_eq!(call_property(&ctx, p, "toString", &[]), ScriptValue::from("(x=3, y=4)"));
//! ```
//!
//! ## Host Input
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use scriptshim::runner::ds::realm::Context;
//! use scriptshim::runner::host::stage::{fire, InputEvent, InputEventKind, SimpleStage, StageRef};
//! use scriptshim::runner::plugin::registry::NativeClassRegistry;
//! use scriptshim::runner::std_lib::mouse;
//!
//! let ctx = Context::with_defaults();
//! NativeClassRegistry::with_core().install(&ctx).unwrap();
//!
//! let stage = Rc::new(RefCell::new(SimpleStage::default()));
//! let stage_ref: StageRef = stage.clone();
//! let mouse_class = ctx.global("Mouse").unwrap();
//! mouse::bind_stage(&ctx, &mouse_class, &stage_ref);
//!
//! // listeners added with Mouse.addListener now receive onMouseDown
//! fire(&*stage, &InputEvent::new(InputEventKind::MouseDown, 10.0, 20.0));
//! ```
//!
//! ## Architecture
//!
//! - **[`runner::ds`]** - Data structures (values, objects, descriptors, the context)
//!   - **[`runner::ds::operations`]** - Property resolution, calls, coercion, broadcasting
//! - **[`runner::plugin`]** - Native class binding and the event bridge
//! - **[`runner::std_lib`]** - Mouse, Point and System
//! - **[`runner::host`]** - Host stage and point interfaces
//! - **[`runner::config`]** - Runtime configuration

#[macro_use]
extern crate lazy_static;

pub mod runner;
