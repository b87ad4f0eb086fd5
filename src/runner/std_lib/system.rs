//! System built-in object: `System.capabilities` and `System.security`.
//!
//! Both sub-objects are created once per context by `init_static` and handed out by the static
//! accessors. No capability is backed by the host yet, so every query reports
//! [`HostCapability::Unavailable`].

use std::fmt;

use crate::runner::ds::object::ScriptObjectRef;
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyFlags};
use crate::runner::ds::operations::object::define_value;
use crate::runner::ds::operations::type_conversion::to_string_value;
use crate::runner::ds::realm::Context;
use crate::runner::ds::value::ScriptValue;
use crate::runner::plugin::types::{BuiltInFn, NativeClass, NativeClassSpec, NativeImplTable};

pub const CLASS_NAME: &str = "System";

pub const CAPABILITY_PROPERTIES: [&str; 26] = [
    "avHardwareDisable",
    "hasAccessibility",
    "hasAudio",
    "hasAudioEncoder",
    "hasEmbeddedVideo",
    "hasIME",
    "hasMP3",
    "hasPrinting",
    "hasScreenBroadcast",
    "hasScreenPlayback",
    "hasStreamingAudio",
    "hasStreamingVideo",
    "hasVideoEncoder",
    "isDebugger",
    "language",
    "localFileReadDisable",
    "manufacturer",
    "os",
    "pixelAspectRatio",
    "playerType",
    "screenColor",
    "screenDPI",
    "screenResolutionX",
    "screenResolutionY",
    "serverString",
    "version",
];

/// Answer to a host capability query.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCapability {
    /// The host does not report this capability.
    Unavailable,
    Boolean(bool),
    String(String),
    Number(f64),
}

impl HostCapability {
    pub fn to_script_value(&self) -> ScriptValue {
        match self {
            HostCapability::Unavailable => ScriptValue::Null,
            HostCapability::Boolean(b) => ScriptValue::Boolean(*b),
            HostCapability::String(s) => ScriptValue::String(s.clone()),
            HostCapability::Number(n) => ScriptValue::Number(*n),
        }
    }
}

impl fmt::Display for HostCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCapability::Unavailable => write!(f, "unavailable"),
            HostCapability::Boolean(b) => write!(f, "{}", b),
            HostCapability::String(s) => write!(f, "{}", s),
            HostCapability::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Looks up one capability of the host.
pub fn query_capability(name: &str) -> HostCapability {
    tracing::trace!(target: "system", capability = name, "capability queried");
    HostCapability::Unavailable
}

/// Per-context state of `System`.
pub struct SystemStatics {
    pub capabilities: ScriptObjectRef,
    pub security: ScriptObjectRef,
}

pub struct SystemClass;

impl NativeClass for SystemClass {
    fn spec(&self) -> NativeClassSpec {
        NativeClassSpec::new(CLASS_NAME)
            .static_getter("capabilities")
            .static_getter("security")
    }

    fn implementations(&self) -> NativeImplTable {
        NativeImplTable::new()
            .static_getter("capabilities", system_get_capabilities)
            .static_getter("security", system_get_security)
    }

    fn init_static(&self, ctx: &Context) {
        ctx.set_static_state(create_statics(ctx));
    }
}

fn create_capabilities(ctx: &Context) -> ScriptObjectRef {
    let capabilities = ctx.new_object();
    for name in CAPABILITY_PROPERTIES.iter().copied() {
        let getter = ctx.new_function(
            name,
            BuiltInFn::closure(move |_ctx, _this, _args| query_capability(name).to_script_value()),
        );
        (*capabilities).borrow_mut().define_own_property(
            name,
            PropertyDescriptor::new_accessor(Some(getter), None, PropertyFlags::HIDDEN),
        );
    }
    capabilities
}

fn create_security(ctx: &Context) -> ScriptObjectRef {
    let security = ctx.new_object();
    let sandbox_type = ctx.new_function("sandboxType", BuiltInFn::Native(security_get_sandbox_type));
    (*security).borrow_mut().define_own_property(
        "sandboxType",
        PropertyDescriptor::new_accessor(Some(sandbox_type), None, PropertyFlags::HIDDEN),
    );
    let methods: [(&str, fn(&Context, &ScriptValue, &[ScriptValue]) -> ScriptValue); 3] = [
        ("allowDomain", security_allow_domain),
        ("allowInsecureDomain", security_allow_insecure_domain),
        ("loadPolicyFile", security_load_policy_file),
    ];
    for (name, func) in methods.iter() {
        let f = ctx.new_function(*name, BuiltInFn::Native(*func));
        define_value(&security, name, ScriptValue::Object(f), PropertyFlags::HIDDEN);
    }
    security
}

fn create_statics(ctx: &Context) -> SystemStatics {
    SystemStatics {
        capabilities: create_capabilities(ctx),
        security: create_security(ctx),
    }
}

/// `System.capabilities` of `ctx`, created on first use when the class was never bound.
pub fn get_capabilities(ctx: &Context) -> ScriptObjectRef {
    ctx.static_state_or_init(create_statics).capabilities.clone()
}

pub fn get_security(ctx: &Context) -> ScriptObjectRef {
    ctx.static_state_or_init(create_statics).security.clone()
}

fn system_get_capabilities(ctx: &Context, _this: &ScriptValue, _args: &[ScriptValue]) -> ScriptValue {
    ScriptValue::Object(get_capabilities(ctx))
}

fn system_get_security(ctx: &Context, _this: &ScriptValue, _args: &[ScriptValue]) -> ScriptValue {
    ScriptValue::Object(get_security(ctx))
}

fn security_get_sandbox_type(_ctx: &Context, _this: &ScriptValue, _args: &[ScriptValue]) -> ScriptValue {
    query_capability("sandboxType").to_script_value()
}

fn security_allow_domain(ctx: &Context, _this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    let domain = to_string_value(ctx, &args.first().cloned().unwrap_or_default());
    tracing::debug!(target: "system", %domain, "allowDomain ignored");
    ScriptValue::Undefined
}

fn security_allow_insecure_domain(ctx: &Context, _this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    let domain = to_string_value(ctx, &args.first().cloned().unwrap_or_default());
    tracing::debug!(target: "system", %domain, "allowInsecureDomain ignored");
    ScriptValue::Undefined
}

fn security_load_policy_file(ctx: &Context, _this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
    let url = to_string_value(ctx, &args.first().cloned().unwrap_or_default());
    tracing::debug!(target: "system", %url, "loadPolicyFile ignored");
    ScriptValue::Undefined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::operations::object::{call_property, delete, get};
    use crate::runner::plugin::binder::wrap;

    #[test]
    fn test_every_capability_is_unavailable() {
        let ctx = Context::with_defaults();
        let system = wrap(&ctx, false, &SystemClass).unwrap();
        let capabilities = get(&ctx, &system, "capabilities").as_object().cloned().unwrap();
        for name in CAPABILITY_PROPERTIES.iter() {
            assert_eq!(get(&ctx, &capabilities, name), ScriptValue::Null, "{}", name);
        }
        assert!(capabilities.borrow().enumerate().is_empty());
        assert!(!delete(&capabilities, "os"));
        assert_eq!(query_capability("os"), HostCapability::Unavailable);
    }

    #[test]
    fn test_static_accessors_return_the_same_objects() {
        let ctx = Context::with_defaults();
        let system = wrap(&ctx, false, &SystemClass).unwrap();
        let first = get(&ctx, &system, "security");
        let second = get(&ctx, &system, "security");
        assert_eq!(first, second);
    }

    #[test]
    fn test_statics_are_created_on_first_use() {
        let ctx = Context::with_defaults();
        assert!(ctx.get_static_state::<SystemStatics>().is_none());
        let capabilities = get_capabilities(&ctx);
        assert!(std::rc::Rc::ptr_eq(&capabilities, &get_capabilities(&ctx)));
        assert_eq!(get(&ctx, &capabilities, "os"), ScriptValue::Null);
        assert!(ctx.get_static_state::<SystemStatics>().is_some());
    }

    #[test]
    fn test_security_methods_are_noops() {
        let ctx = Context::with_defaults();
        let system = wrap(&ctx, false, &SystemClass).unwrap();
        let security = get(&ctx, &system, "security").as_object().cloned().unwrap();
        assert_eq!(get(&ctx, &security, "sandboxType"), ScriptValue::Null);
        for method in &["allowDomain", "allowInsecureDomain", "loadPolicyFile"] {
            let result = call_property(&ctx, &security, method, &[ScriptValue::from("example.com")]);
            assert_eq!(result, ScriptValue::Undefined);
        }
    }

    #[test]
    fn test_host_capability_values() {
        assert_eq!(HostCapability::Boolean(true).to_script_value(), ScriptValue::Boolean(true));
        assert_eq!(HostCapability::Number(72.0).to_script_value(), ScriptValue::Number(72.0));
        assert_eq!(HostCapability::Unavailable.to_string(), "unavailable");
    }
}
