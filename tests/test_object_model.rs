//! Tests for the object model.
//!
//! These tests drive objects, descriptors, functions and the prototype chain through the
//! public operations only.

extern crate scriptshim;

use proptest::prelude::*;
use scriptshim::runner::config::RuntimeConfig;
use scriptshim::runner::ds::function_object::{constructor_create, FunctionKind};
use scriptshim::runner::ds::object::{object_create, set_prototype_of, ScriptObjectRef};
use scriptshim::runner::ds::object_property::PropertyFlags;
use scriptshim::runner::ds::operations::object::{
    call, call_property, construct, define_value, delete, enumerate, get, has_own, has_property,
    put,
};
use scriptshim::runner::ds::realm::Context;
use scriptshim::runner::ds::value::ScriptValue;
use scriptshim::runner::plugin::types::BuiltInFn;

fn num(n: f64) -> ScriptValue {
    ScriptValue::Number(n)
}

// ============================================================================
// Property tests
// ============================================================================

mod property_tests {
    use super::*;

    #[test]
    fn test_enumerate_keeps_insertion_order_and_skips_hidden() {
        let ctx = Context::with_defaults();
        let o = ctx.new_object();
        put(&ctx, &o, "b", num(1.0));
        put(&ctx, &o, "a", num(2.0));
        define_value(&o, "secret", num(3.0), PropertyFlags::HIDDEN);
        put(&ctx, &o, "c", num(4.0));
        put(&ctx, &o, "b", num(5.0));
        assert_eq!(enumerate(&o), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_enumerate_lists_own_properties_only() {
        let ctx = Context::with_defaults();
        let parent = ctx.new_object();
        put(&ctx, &parent, "inherited", num(1.0));
        let child = object_create(Some(parent));
        put(&ctx, &child, "own", num(2.0));
        assert_eq!(enumerate(&child), vec!["own"]);
        assert!(has_property(&ctx, &child, "inherited"));
        assert!(!has_own(&child, "inherited"));
    }

    #[test]
    fn test_delete_respects_deletable() {
        let ctx = Context::with_defaults();
        let o = ctx.new_object();
        put(&ctx, &o, "temp", num(1.0));
        define_value(&o, "pinned", num(2.0), PropertyFlags::NATIVE_MEMBER);
        assert!(delete(&o, "temp"));
        assert!(!delete(&o, "temp"));
        assert!(!delete(&o, "pinned"));
        assert_eq!(get(&ctx, &o, "temp"), ScriptValue::Undefined);
        assert_eq!(get(&ctx, &o, "pinned"), num(2.0));
    }

    #[test]
    fn test_delete_reveals_inherited_value() {
        let ctx = Context::with_defaults();
        let parent = ctx.new_object();
        put(&ctx, &parent, "x", num(1.0));
        let child = object_create(Some(parent));
        put(&ctx, &child, "x", num(2.0));
        assert!(delete(&child, "x"));
        assert_eq!(get(&ctx, &child, "x"), num(1.0));
    }

    proptest! {
        #[test]
        fn writable_put_then_get_round_trips(name in "[a-z]{1,8}", value in -1.0e6f64..1.0e6) {
            let ctx = Context::with_defaults();
            let o = ctx.new_object();
            put(&ctx, &o, &name, num(value));
            prop_assert_eq!(get(&ctx, &o, &name), num(value));
        }

        #[test]
        fn read_only_put_keeps_old_value(old in -1.0e6f64..1.0e6, new in -1.0e6f64..1.0e6) {
            let ctx = Context::with_defaults();
            let o = ctx.new_object();
            define_value(&o, "fixed", num(old), PropertyFlags::DEFAULT.read_only());
            put(&ctx, &o, "fixed", num(new));
            prop_assert_eq!(get(&ctx, &o, "fixed"), num(old));
        }

        #[test]
        fn shadowing_never_touches_the_prototype(depth in 1usize..12, value in -100.0f64..100.0) {
            let ctx = Context::with_defaults();
            let root = ctx.new_object();
            put(&ctx, &root, "v", num(-1.0));
            let mut leaf = root.clone();
            for _ in 0..depth {
                leaf = object_create(Some(leaf));
            }
            prop_assert_eq!(get(&ctx, &leaf, "v"), num(-1.0));
            put(&ctx, &leaf, "v", num(value));
            prop_assert_eq!(get(&ctx, &leaf, "v"), num(value));
            prop_assert_eq!(get(&ctx, &root, "v"), num(-1.0));
        }
    }
}

// ============================================================================
// Prototype chain tests
// ============================================================================

mod prototype_tests {
    use super::*;

    #[test]
    fn test_cycle_is_rejected() {
        let ctx = Context::with_defaults();
        let a = ctx.new_object();
        let b = object_create(Some(a.clone()));
        assert!(!set_prototype_of(&a, Some(b.clone())));
        assert!(!set_prototype_of(&a, Some(a.clone())));
        assert!(set_prototype_of(&b, None));
        assert!(set_prototype_of(&a, Some(b)));
    }

    #[test]
    fn test_deep_chain_stops_at_configured_depth() {
        let ctx = Context::new(RuntimeConfig::new().with_max_prototype_depth(4));
        let root = ctx.new_object();
        put(&ctx, &root, "far", num(1.0));
        let mut leaf = root.clone();
        for _ in 0..10 {
            leaf = object_create(Some(leaf));
        }
        assert_eq!(get(&ctx, &leaf, "far"), ScriptValue::Undefined);
        assert!(!has_property(&ctx, &leaf, "far"));

        let mut near = root.clone();
        for _ in 0..3 {
            near = object_create(Some(near));
        }
        assert_eq!(get(&ctx, &near, "far"), num(1.0));
    }

    #[test]
    fn test_objects_inherit_object_to_string() {
        let ctx = Context::with_defaults();
        let o = ctx.new_object();
        assert_eq!(call_property(&ctx, &o, "toString", &[]), ScriptValue::from("[object Object]"));
    }
}

// ============================================================================
// Function tests
// ============================================================================

mod function_tests {
    use super::*;

    fn remember_args(ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
        if let ScriptValue::Object(o) = this {
            put(ctx, o, "count", num(args.len() as f64));
        }
        ScriptValue::Undefined
    }

    fn return_this(_ctx: &Context, this: &ScriptValue, _args: &[ScriptValue]) -> ScriptValue {
        this.clone()
    }

    fn make_class(ctx: &Context, kind: FunctionKind) -> ScriptObjectRef {
        constructor_create(
            Some(ctx.function_prototype()),
            "Thing",
            BuiltInFn::Native(remember_args),
            kind,
            ctx.new_object(),
        )
    }

    #[test]
    fn test_construct_links_prototype() {
        let ctx = Context::with_defaults();
        let class = make_class(&ctx, FunctionKind::Normal);
        let instance = construct(&ctx, &class, &[num(1.0), num(2.0)]);
        let instance = instance.as_object().cloned().unwrap();
        assert_eq!(get(&ctx, &instance, "count"), num(2.0));
        assert_eq!(get(&ctx, &instance, "constructor"), ScriptValue::Object(class));
    }

    #[test]
    fn test_construct_reads_prototype_at_call_time() {
        let ctx = Context::with_defaults();
        let class = make_class(&ctx, FunctionKind::Normal);
        let replacement = ctx.new_object();
        put(&ctx, &replacement, "marker", ScriptValue::Boolean(true));
        put(&ctx, &class, "prototype", ScriptValue::Object(replacement));
        let instance = construct(&ctx, &class, &[]).as_object().cloned().unwrap();
        assert_eq!(get(&ctx, &instance, "marker"), ScriptValue::Boolean(true));
    }

    #[test]
    fn test_construct_on_call_ignores_this() {
        let ctx = Context::with_defaults();
        let class = make_class(&ctx, FunctionKind::ConstructOnCall);
        let caller = ctx.new_object();
        let result = call(&ctx, &class, &ScriptValue::Object(caller.clone()), &[num(5.0)]);
        assert!(result.is_object());
        assert_ne!(result, ScriptValue::Object(caller.clone()));
        assert!(!has_own(&caller, "count"));
    }

    #[test]
    fn test_call_passes_this() {
        let ctx = Context::with_defaults();
        let f = ctx.new_function("self", BuiltInFn::Native(return_this));
        assert_eq!(call(&ctx, &f, &num(9.0), &[]), num(9.0));
        assert!(!has_own(&f, "prototype"));
    }

    #[test]
    fn test_calling_a_plain_object_is_undefined() {
        let ctx = Context::with_defaults();
        let o = ctx.new_object();
        assert_eq!(call(&ctx, &o, &ScriptValue::Undefined, &[]), ScriptValue::Undefined);
        assert_eq!(call_property(&ctx, &o, "missing", &[]), ScriptValue::Undefined);
    }
}
