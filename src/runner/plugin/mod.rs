//! Native class binding and host event plumbing.
//!
//! This module is the boundary between host code and the script object model:
//!
//! ```text
//! NativeClass ──spec + impl table──▶ binder::wrap ──▶ class object ──▶ Context globals
//!                                                          ▲
//! HostStage ──input events──▶ EventBridge ──broadcastMessage┘
//! ```
//!
//! ### Key Components
//!
//! - **[`NativeClass`]**: a host class described by a declarative member table plus the native
//!   functions backing it
//! - **[`wrap`]**: validates the table against the implementations and builds the class object
//! - **[`NativeClassRegistry`]**: the bootstrapper that installs every registered class into a
//!   [`Context`](crate::runner::ds::realm::Context)
//! - **[`EventBridge`]**: per-context subscription of a listener object to a host stage
//!
//! ## Example: Custom Class
//!
//! ```
//! use scriptshim::runner::ds::realm::Context;
//! use scriptshim::runner::ds::value::ScriptValue;
//! use scriptshim::runner::ds::operations::object::call_property;
//! use scriptshim::runner::plugin::registry::{ClassEntry, NativeClassRegistry};
//! use scriptshim::runner::plugin::types::{NativeClass, NativeClassSpec, NativeImplTable};
//!
//! fn triple(_ctx: &Context, _this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
//!     match args.first() {
//!         Some(ScriptValue::Number(n)) => ScriptValue::Number(n * 3.0),
//!         _ => ScriptValue::Undefined,
//!     }
//! }
//!
//! struct MyMath;
//!
//! impl NativeClass for MyMath {
//!     fn spec(&self) -> NativeClassSpec {
//!         NativeClassSpec::new("MyMath").static_method("triple")
//!     }
//!
//!     fn implementations(&self) -> NativeImplTable {
//!         NativeImplTable::new().static_method("triple", triple)
//!     }
//! }
//!
//! let ctx = Context::with_defaults();
//! let mut registry = NativeClassRegistry::with_core();
//! registry.register(ClassEntry::new("MyMath", false, Box::new(MyMath)));
//! registry.install(&ctx).unwrap();
//!
//! let my_math = ctx.global("MyMath").unwrap();
//! let result = call_property(&ctx, &my_math, "triple", &[ScriptValue::Number(7.0)]);
//! assert_eq!(result, ScriptValue::Number(21.0));
//! ```

pub mod binder;
pub mod event_bridge;
pub mod registry;
pub mod types;

pub use binder::wrap;
pub use event_bridge::{BindingState, EventBridge};
pub use registry::{ClassEntry, NativeClassRegistry};
pub use types::{BuiltInFn, MemberKind, NativeClass, NativeClassSpec, NativeFn, NativeImplTable};
