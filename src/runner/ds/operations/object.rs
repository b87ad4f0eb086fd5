//! Property resolution, writes and calls on shared script objects.
//!
//! Every function here releases its `RefCell` borrow before running a getter, setter or function
//! body, so native code may freely touch the same object again.

use crate::runner::ds::function_object::FunctionKind;
use crate::runner::ds::object::{object_create, ScriptObjectRef};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyFlags, PropertyKind};
use crate::runner::ds::realm::Context;
use crate::runner::ds::value::ScriptValue;

enum Resolved {
    Value(ScriptValue),
    Getter(Option<ScriptObjectRef>),
    Missing,
}

/// Looks `name` up along the prototype chain of `o`.
///
/// Accessors run with `this` bound to `o`, not to the object that defines them. Resolution stops
/// after `max_prototype_depth` links and then behaves as if the property were missing.
pub fn get(ctx: &Context, o: &ScriptObjectRef, name: &str) -> ScriptValue {
    match resolve(ctx, o, name) {
        Resolved::Value(v) => v,
        Resolved::Getter(Some(getter)) => call(ctx, &getter, &ScriptValue::Object(o.clone()), &[]),
        Resolved::Getter(None) | Resolved::Missing => ScriptValue::Undefined,
    }
}

fn resolve(ctx: &Context, o: &ScriptObjectRef, name: &str) -> Resolved {
    let max_depth = ctx.config().max_prototype_depth;
    let mut current = Some(o.clone());
    let mut depth = 0;
    while let Some(obj) = current {
        if depth > max_depth {
            tracing::warn!(
                target: "object",
                property = name,
                max_depth,
                "prototype chain too deep, treating property as missing"
            );
            return Resolved::Missing;
        }
        let obj_ref = (*obj).borrow();
        if let Some(pd) = obj_ref.get_own_property(name) {
            return match &pd.kind {
                PropertyKind::Data { value } => Resolved::Value(value.clone()),
                PropertyKind::Accessor { get, .. } => Resolved::Getter(get.clone()),
            };
        }
        current = obj_ref.get_prototype_of();
        depth += 1;
    }
    Resolved::Missing
}

/// Writes `name` on `o` itself.
///
/// An own accessor receives the value through its setter (nothing happens without one), an own
/// read-only data property ignores the write, and anything else becomes a new own data property.
/// The prototype chain is never consulted.
pub fn put(ctx: &Context, o: &ScriptObjectRef, name: &str, value: ScriptValue) {
    let setter = {
        let mut obj = (**o).borrow_mut();
        match obj.get_own_property(name).map(|pd| (pd.flags, pd.kind.clone())) {
            Some((_, PropertyKind::Accessor { set, .. })) => set,
            Some((flags, PropertyKind::Data { .. })) => {
                if flags.writable {
                    obj.define_own_property(name, PropertyDescriptor::new_data(value, flags));
                }
                return;
            }
            None => {
                obj.define_own_property(
                    name,
                    PropertyDescriptor::new_data(value, PropertyFlags::DEFAULT),
                );
                return;
            }
        }
    };
    if let Some(setter) = setter {
        call(ctx, &setter, &ScriptValue::Object(o.clone()), &[value]);
    }
}

pub fn delete(o: &ScriptObjectRef, name: &str) -> bool {
    (**o).borrow_mut().delete(name)
}

pub fn enumerate(o: &ScriptObjectRef) -> Vec<String> {
    (**o).borrow().enumerate()
}

pub fn has_own(o: &ScriptObjectRef, name: &str) -> bool {
    (**o).borrow().has_own(name)
}

pub fn has_property(ctx: &Context, o: &ScriptObjectRef, name: &str) -> bool {
    !matches!(resolve(ctx, o, name), Resolved::Missing)
}

pub fn define_value(o: &ScriptObjectRef, name: &str, value: ScriptValue, flags: PropertyFlags) {
    (**o)
        .borrow_mut()
        .define_own_property(name, PropertyDescriptor::new_data(value, flags));
}

/// Invokes `f` with `this`. Calling something that is not a function yields `Undefined`.
pub fn call(ctx: &Context, f: &ScriptObjectRef, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    let (body, kind) = match (**f).borrow().as_function() {
        Some(func) => (func.body.clone(), func.function_kind),
        None => {
            tracing::trace!(target: "object", "call on a non-callable object ignored");
            return ScriptValue::Undefined;
        }
    };
    match kind {
        FunctionKind::Normal => body.call(ctx, this, args),
        FunctionKind::ConstructOnCall => construct(ctx, f, args),
    }
}

/// Runs `f` as a constructor.
///
/// The new object's prototype is whatever `f.prototype` holds right now (falling back to
/// `Object.prototype` when that is not an object). An object returned by the body replaces the
/// freshly allocated one.
pub fn construct(ctx: &Context, f: &ScriptObjectRef, args: &[ScriptValue]) -> ScriptValue {
    let body = match (**f).borrow().as_function() {
        Some(func) => func.body.clone(),
        None => return ScriptValue::Undefined,
    };
    let prototype = match get(ctx, f, "prototype") {
        ScriptValue::Object(p) => p,
        _ => ctx.object_prototype(),
    };
    let instance = object_create(Some(prototype));
    let this = ScriptValue::Object(instance);
    match body.call(ctx, &this, args) {
        result @ ScriptValue::Object(_) => result,
        _ => this,
    }
}

/// `o[name](args...)` with `this = o`. Missing or non-callable members yield `Undefined`.
pub fn call_property(ctx: &Context, o: &ScriptObjectRef, name: &str, args: &[ScriptValue]) -> ScriptValue {
    match get(ctx, o, name) {
        ScriptValue::Object(f) => call(ctx, &f, &ScriptValue::Object(o.clone()), args),
        _ => ScriptValue::Undefined,
    }
}
