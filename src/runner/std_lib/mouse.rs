//! Mouse built-in object.
//!
//! A plain broadcaster object with `show` and `hide`. Host input reaches its listeners through
//! the context's event bridge once [`bind_stage`] has been called.

use crate::runner::ds::object::ScriptObjectRef;
use crate::runner::ds::realm::Context;
use crate::runner::ds::value::ScriptValue;
use crate::runner::host::stage::StageRef;
use crate::runner::plugin::types::{NativeClass, NativeClassSpec, NativeImplTable};

pub const CLASS_NAME: &str = "Mouse";

pub struct MouseClass;

impl NativeClass for MouseClass {
    fn spec(&self) -> NativeClassSpec {
        NativeClassSpec::new(CLASS_NAME)
            .static_method("show")
            .static_method("hide")
    }

    fn implementations(&self) -> NativeImplTable {
        NativeImplTable::new()
            .static_method("show", mouse_show)
            .static_method("hide", mouse_hide)
    }
}

/// Routes `stage` input events to the listeners of `mouse`. Calling it again replaces the
/// previous subscription.
pub fn bind_stage(ctx: &Context, mouse: &ScriptObjectRef, stage: &StageRef) {
    ctx.event_bridge().borrow_mut().bind_stage(ctx, mouse, stage);
}

fn mouse_show(ctx: &Context, _this: &ScriptValue, _args: &[ScriptValue]) -> ScriptValue {
    ctx.event_bridge().borrow().show_cursor();
    ScriptValue::Undefined
}

fn mouse_hide(ctx: &Context, _this: &ScriptValue, _args: &[ScriptValue]) -> ScriptValue {
    ctx.event_bridge().borrow().hide_cursor();
    ScriptValue::Undefined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::operations::object::call_property;
    use crate::runner::host::stage::{HostStage, SimpleStage};
    use crate::runner::plugin::binder::wrap;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_hide_and_show_toggle_cursor() {
        let ctx = Context::with_defaults();
        let mouse = wrap(&ctx, false, &MouseClass).unwrap();
        let stage = Rc::new(RefCell::new(SimpleStage::default()));
        let stage_ref: StageRef = stage.clone();
        bind_stage(&ctx, &mouse, &stage_ref);

        call_property(&ctx, &mouse, "hide", &[]);
        assert!(!stage.borrow().cursor_visible());
        call_property(&ctx, &mouse, "show", &[]);
        assert!(stage.borrow().cursor_visible());
    }

    #[test]
    fn test_show_without_stage_is_harmless() {
        let ctx = Context::with_defaults();
        let mouse = wrap(&ctx, false, &MouseClass).unwrap();
        assert_eq!(call_property(&ctx, &mouse, "show", &[]), ScriptValue::Undefined);
    }
}
