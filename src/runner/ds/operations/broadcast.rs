//! Listener-list broadcasting.
//!
//! A broadcaster keeps its listeners in a hidden array-like `_listeners` object (`length` plus
//! index keys) so scripts that poke at it see what they expect. The list itself is the run of own
//! index keys starting at `0`; `length` is read-only and only mirrors it.

use crate::runner::ds::object::ScriptObjectRef;
use crate::runner::ds::object_property::PropertyFlags;
use crate::runner::ds::operations::object::{call_property, define_value, delete, get, has_own, put};
use crate::runner::ds::operations::type_conversion::to_string_value;
use crate::runner::ds::realm::Context;
use crate::runner::ds::value::ScriptValue;
use crate::runner::plugin::types::BuiltInFn;

pub const LISTENERS_PROPERTY: &str = "_listeners";

/// Turns `o` into a broadcaster: installs `_listeners`, `addListener`, `removeListener` and
/// `broadcastMessage`, none of them enumerable.
pub fn initialize(ctx: &Context, o: &ScriptObjectRef) {
    let listeners = ctx.new_object();
    set_length(&listeners, 0);
    define_value(
        o,
        LISTENERS_PROPERTY,
        ScriptValue::Object(listeners),
        PropertyFlags::NATIVE_MEMBER,
    );
    let methods: [(&str, fn(&Context, &ScriptValue, &[ScriptValue]) -> ScriptValue); 3] = [
        ("addListener", broadcaster_add_listener),
        ("removeListener", broadcaster_remove_listener),
        ("broadcastMessage", broadcaster_broadcast_message),
    ];
    for (name, func) in methods.iter() {
        let f = ctx.new_function(*name, BuiltInFn::Native(*func));
        define_value(o, name, ScriptValue::Object(f), PropertyFlags::NATIVE_MEMBER);
    }
}

fn listener_list(ctx: &Context, o: &ScriptObjectRef) -> Option<ScriptObjectRef> {
    match get(ctx, o, LISTENERS_PROPERTY) {
        ScriptValue::Object(list) => Some(list),
        _ => None,
    }
}

fn set_length(list: &ScriptObjectRef, length: usize) {
    define_value(list, "length", ScriptValue::Number(length as f64), PropertyFlags::HIDDEN);
}

/// Own index keys `0, 1, ...` up to the first gap.
fn collect_entries(ctx: &Context, list: &ScriptObjectRef) -> Vec<ScriptValue> {
    let mut entries = Vec::new();
    loop {
        let key = entries.len().to_string();
        if !has_own(list, &key) {
            return entries;
        }
        entries.push(get(ctx, list, &key));
    }
}

/// Current listeners in registration order.
pub fn listeners(ctx: &Context, o: &ScriptObjectRef) -> Vec<ScriptValue> {
    match listener_list(ctx, o) {
        Some(list) => collect_entries(ctx, &list),
        None => Vec::new(),
    }
}

/// Appends `listener`, first dropping any earlier registration of the same object.
pub fn add_listener(ctx: &Context, o: &ScriptObjectRef, listener: ScriptValue) -> bool {
    remove_listener(ctx, o, &listener);
    let list = match listener_list(ctx, o) {
        Some(list) => list,
        None => return false,
    };
    let length = collect_entries(ctx, &list).len();
    put(ctx, &list, &length.to_string(), listener);
    set_length(&list, length + 1);
    true
}

pub fn remove_listener(ctx: &Context, o: &ScriptObjectRef, listener: &ScriptValue) -> bool {
    let list = match listener_list(ctx, o) {
        Some(list) => list,
        None => return false,
    };
    let current = collect_entries(ctx, &list);
    let index = match current.iter().position(|l| l == listener) {
        Some(index) => index,
        None => return false,
    };
    for i in index..current.len() - 1 {
        put(ctx, &list, &i.to_string(), current[i + 1].clone());
    }
    delete(&list, &(current.len() - 1).to_string());
    set_length(&list, current.len() - 1);
    true
}

/// `o[method](args...)`, the call every broadcast and host event ends in.
pub fn broadcast_call(ctx: &Context, o: &ScriptObjectRef, method: &str, args: &[ScriptValue]) -> ScriptValue {
    call_property(ctx, o, method, args)
}

/// Calls `message` on a snapshot of the listeners, in registration order. Listeners without such a
/// method are skipped. Returns how many listeners were visited.
pub fn broadcast_message(
    ctx: &Context,
    o: &ScriptObjectRef,
    message: &str,
    args: &[ScriptValue],
) -> usize {
    let snapshot = listeners(ctx, o);
    tracing::trace!(target: "broadcast", name = message, listeners = snapshot.len(), "broadcast");
    for listener in &snapshot {
        if let ScriptValue::Object(l) = listener {
            broadcast_call(ctx, l, message, args);
        }
    }
    snapshot.len()
}

fn broadcaster_add_listener(ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    match this {
        ScriptValue::Object(o) => {
            let listener = args.first().cloned().unwrap_or_default();
            ScriptValue::Boolean(add_listener(ctx, o, listener))
        }
        _ => ScriptValue::Boolean(false),
    }
}

fn broadcaster_remove_listener(ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    match this {
        ScriptValue::Object(o) => {
            let listener = args.first().cloned().unwrap_or_default();
            ScriptValue::Boolean(remove_listener(ctx, o, &listener))
        }
        _ => ScriptValue::Boolean(false),
    }
}

fn broadcaster_broadcast_message(ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    if let (ScriptValue::Object(o), Some(message)) = (this, args.first()) {
        let message = to_string_value(ctx, message);
        broadcast_message(ctx, o, &message, &args[1..]);
    }
    ScriptValue::Undefined
}
