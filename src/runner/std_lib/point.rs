//! Point built-in class.
//!
//! Points are ordinary objects with `x` and `y` data properties. Arithmetic goes through
//! [`HostPoint`], reading the components with number coercion and writing plain numbers back.

use crate::runner::ds::function_object::FunctionKind;
use crate::runner::ds::object::{object_create, ScriptObjectRef};
use crate::runner::ds::operations::object::{get, put};
use crate::runner::ds::operations::type_conversion::{to_number, to_string_value};
use crate::runner::ds::realm::Context;
use crate::runner::ds::value::ScriptValue;
use crate::runner::host::point::HostPoint;
use crate::runner::plugin::types::{NativeClass, NativeClassSpec, NativeImplTable};

pub const CLASS_NAME: &str = "Point";

pub struct PointClass;

impl NativeClass for PointClass {
    fn spec(&self) -> NativeClassSpec {
        NativeClassSpec::new(CLASS_NAME)
            .static_method("distance")
            .static_method("interpolate")
            .static_method("polar")
            .instance_getter("length")
            .instance_method("add")
            .instance_method("clone")
            .instance_method("equals")
            .instance_method("normalize")
            .instance_method("offset")
            .instance_method("subtract")
            .instance_method("toString")
    }

    fn implementations(&self) -> NativeImplTable {
        NativeImplTable::new()
            .with_constructor(point_constructor, FunctionKind::ConstructOnCall)
            .static_method("distance", point_distance)
            .static_method("interpolate", point_interpolate)
            .static_method("polar", point_polar)
            .instance_getter("length", point_get_length)
            .instance_method("add", point_add)
            .instance_method("clone", point_clone)
            .instance_method("equals", point_equals)
            .instance_method("normalize", point_normalize)
            .instance_method("offset", point_offset)
            .instance_method("subtract", point_subtract)
            .instance_method("toString", point_to_string)
    }
}

/// Reads `v` as a host point. Anything that is not an object is the origin.
pub fn to_host_point(ctx: &Context, v: &ScriptValue) -> HostPoint {
    match v {
        ScriptValue::Object(o) => {
            HostPoint::new(to_number(&get(ctx, o, "x")), to_number(&get(ctx, o, "y")))
        }
        _ => HostPoint::default(),
    }
}

pub fn copy_host_point_to(ctx: &Context, p: &HostPoint, o: &ScriptObjectRef) {
    put(ctx, o, "x", ScriptValue::Number(p.x()));
    put(ctx, o, "y", ScriptValue::Number(p.y()));
}

/// A new point object inheriting from the current `Point.prototype` of `ctx`.
pub fn new_point(ctx: &Context, x: ScriptValue, y: ScriptValue) -> ScriptObjectRef {
    let prototype = ctx
        .global(CLASS_NAME)
        .and_then(|class| get(ctx, &class, "prototype").as_object().cloned())
        .unwrap_or_else(|| ctx.object_prototype());
    let point = object_create(Some(prototype));
    put(ctx, &point, "x", x);
    put(ctx, &point, "y", y);
    point
}

pub fn from_host_point(ctx: &Context, p: &HostPoint) -> ScriptValue {
    ScriptValue::Object(new_point(
        ctx,
        ScriptValue::Number(p.x()),
        ScriptValue::Number(p.y()),
    ))
}

fn arg(args: &[ScriptValue], index: usize) -> ScriptValue {
    args.get(index).cloned().unwrap_or_default()
}

fn number_arg(args: &[ScriptValue], index: usize) -> f64 {
    to_number(&arg(args, index))
}

/// Point(x, y): components are stored as given. With no arguments the point is the origin.
fn point_constructor(ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    if let ScriptValue::Object(o) = this {
        let (x, y) = if args.is_empty() {
            (ScriptValue::Number(0.0), ScriptValue::Number(0.0))
        } else {
            (arg(args, 0), arg(args, 1))
        };
        put(ctx, o, "x", x);
        put(ctx, o, "y", y);
    }
    ScriptValue::Undefined
}

fn point_distance(ctx: &Context, _this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    let a = to_host_point(ctx, &arg(args, 0));
    let b = to_host_point(ctx, &arg(args, 1));
    ScriptValue::Number(HostPoint::distance(&a, &b))
}

fn point_interpolate(ctx: &Context, _this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    let a = to_host_point(ctx, &arg(args, 0));
    let b = to_host_point(ctx, &arg(args, 1));
    let f = number_arg(args, 2);
    from_host_point(ctx, &HostPoint::interpolate(&a, &b, f))
}

fn point_polar(ctx: &Context, _this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    let p = HostPoint::polar(number_arg(args, 0), number_arg(args, 1));
    from_host_point(ctx, &p)
}

fn point_get_length(ctx: &Context, this: &ScriptValue, _args: &[ScriptValue]) -> ScriptValue {
    ScriptValue::Number(to_host_point(ctx, this).length())
}

fn point_add(ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    let p = to_host_point(ctx, this).add(&to_host_point(ctx, &arg(args, 0)));
    from_host_point(ctx, &p)
}

fn point_subtract(ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    let p = to_host_point(ctx, this).subtract(&to_host_point(ctx, &arg(args, 0)));
    from_host_point(ctx, &p)
}

/// Copies the raw component values, without coercion.
fn point_clone(ctx: &Context, this: &ScriptValue, _args: &[ScriptValue]) -> ScriptValue {
    let (x, y) = match this {
        ScriptValue::Object(o) => (get(ctx, o, "x"), get(ctx, o, "y")),
        _ => (ScriptValue::Undefined, ScriptValue::Undefined),
    };
    ScriptValue::Object(new_point(ctx, x, y))
}

fn point_equals(ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    let equal = to_host_point(ctx, this).equals(&to_host_point(ctx, &arg(args, 0)));
    ScriptValue::Boolean(equal)
}

fn point_normalize(ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    if let ScriptValue::Object(o) = this {
        let mut p = to_host_point(ctx, this);
        p.normalize(number_arg(args, 0));
        copy_host_point_to(ctx, &p, o);
    }
    ScriptValue::Undefined
}

fn point_offset(ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    if let ScriptValue::Object(o) = this {
        let mut p = to_host_point(ctx, this);
        p.offset(number_arg(args, 0), number_arg(args, 1));
        copy_host_point_to(ctx, &p, o);
    }
    ScriptValue::Undefined
}

fn point_to_string(ctx: &Context, this: &ScriptValue, _args: &[ScriptValue]) -> ScriptValue {
    let (x, y) = match this {
        ScriptValue::Object(o) => (get(ctx, o, "x"), get(ctx, o, "y")),
        _ => (ScriptValue::Undefined, ScriptValue::Undefined),
    };
    ScriptValue::String(format!(
        "(x={}, y={})",
        to_string_value(ctx, &x),
        to_string_value(ctx, &y)
    ))
}
