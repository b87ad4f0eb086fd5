//! Turns a [`NativeClass`] into a script-visible class object.
//!
//! The declared member table is checked against the host implementations before anything is
//! installed, so a misconfigured class never shows up half-bound.

use std::collections::{HashMap, HashSet};

use crate::runner::ds::error::BindError;
use crate::runner::ds::function_object::{constructor_create, install_prototype, FunctionKind};
use crate::runner::ds::object::ScriptObjectRef;
use crate::runner::ds::object_property::PropertyDescriptor;
use crate::runner::ds::realm::Context;
use crate::runner::ds::value::ScriptValue;
use crate::runner::plugin::types::{
    BuiltInFn, MemberSpec, NativeClass, NativeImplTable, NativeMember,
};

/// Materializes `class` in `ctx`.
///
/// With `is_function` the result is a constructor (running the native constructor body, or doing
/// nothing when none is provided) whose `prototype` carries the instance members. Otherwise it is a
/// plain object holding the static members, plus a `prototype` when instance members are declared.
pub fn wrap(
    ctx: &Context,
    is_function: bool,
    class: &dyn NativeClass,
) -> Result<ScriptObjectRef, BindError> {
    let spec = class.spec();
    let implementations = class.implementations();

    check_duplicates(&spec.name, &spec.static_members)?;
    check_duplicates(&spec.name, &spec.instance_members)?;
    let statics = resolve_members(&spec.name, &spec.static_members, &implementations.statics)?;
    let instance = resolve_members(&spec.name, &spec.instance_members, &implementations.instance)?;

    class.init_static(ctx);

    let instance_prototype = ctx.new_object();
    for (member, native) in &instance {
        install_member(ctx, &instance_prototype, member, native);
    }

    let class_object = if is_function {
        let (body, kind) = constructor_of(&implementations);
        constructor_create(
            Some(ctx.function_prototype()),
            spec.name.clone(),
            body,
            kind,
            instance_prototype,
        )
    } else {
        let class_object = ctx.new_object();
        if !instance.is_empty() {
            install_prototype(&class_object, &instance_prototype);
        }
        class_object
    };

    for (member, native) in &statics {
        install_member(ctx, &class_object, member, native);
    }

    tracing::debug!(
        target: "binder",
        class = %spec.name,
        is_function,
        statics = statics.len(),
        instance = instance.len(),
        "native class bound"
    );
    Ok(class_object)
}

fn constructor_of(implementations: &NativeImplTable) -> (BuiltInFn, FunctionKind) {
    match &implementations.constructor {
        Some((body, kind)) => (body.clone(), *kind),
        None => (BuiltInFn::Native(no_op_constructor), FunctionKind::Normal),
    }
}

fn no_op_constructor(_ctx: &Context, _this: &ScriptValue, _args: &[ScriptValue]) -> ScriptValue {
    ScriptValue::Undefined
}

fn check_duplicates(class: &str, members: &[MemberSpec]) -> Result<(), BindError> {
    let mut seen = HashSet::new();
    for member in members {
        if !seen.insert(member.name.as_str()) {
            return Err(BindError::DuplicateMember {
                class: class.to_string(),
                member: member.name.clone(),
            });
        }
    }
    Ok(())
}

fn resolve_members<'a>(
    class: &str,
    members: &'a [MemberSpec],
    implementations: &HashMap<String, NativeMember>,
) -> Result<Vec<(&'a MemberSpec, NativeMember)>, BindError> {
    members
        .iter()
        .map(|member| {
            let native = implementations.get(&member.name).ok_or_else(|| {
                BindError::MissingMember {
                    class: class.to_string(),
                    member: member.name.clone(),
                }
            })?;
            if native.kind() != member.kind {
                return Err(BindError::KindMismatch {
                    class: class.to_string(),
                    member: member.name.clone(),
                    declared: member.kind,
                    found: native.kind(),
                });
            }
            Ok((member, native.clone()))
        })
        .collect()
}

fn install_member(ctx: &Context, target: &ScriptObjectRef, member: &MemberSpec, native: &NativeMember) {
    let descriptor = match native {
        NativeMember::Method(body) => {
            let f = ctx.new_function(member.name.clone(), body.clone());
            PropertyDescriptor::new_data(ScriptValue::Object(f), member.flags)
        }
        NativeMember::Getter(getter) => {
            let get = ctx.new_function(member.name.clone(), getter.clone());
            PropertyDescriptor::new_accessor(Some(get), None, member.flags)
        }
        NativeMember::GetterSetter(getter, setter) => {
            let get = ctx.new_function(member.name.clone(), getter.clone());
            let set = ctx.new_function(member.name.clone(), setter.clone());
            PropertyDescriptor::new_accessor(Some(get), Some(set), member.flags)
        }
    };
    (**target)
        .borrow_mut()
        .define_own_property(&member.name, descriptor);
}
