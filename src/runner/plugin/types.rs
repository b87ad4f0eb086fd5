//! Core types for native class binding.

use crate::runner::ds::function_object::FunctionKind;
use crate::runner::ds::object_property::PropertyFlags;
use crate::runner::ds::realm::Context;
use crate::runner::ds::value::ScriptValue;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Function signature for built-in methods.
/// Native functions receive the owning context, the `this` value and the arguments. They never
/// fail: anything a script can pass in has a defined result.
pub type NativeFn = fn(ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue;

/// Built-in function - either a plain function pointer or a capturing closure.
#[derive(Clone)]
pub enum BuiltInFn {
    /// Direct function pointer - zero overhead for compiled-in functions.
    Native(NativeFn),

    /// Closure, for members that carry per-binding data (e.g. the capability name they report).
    Closure(Rc<dyn Fn(&Context, &ScriptValue, &[ScriptValue]) -> ScriptValue>),
}

impl BuiltInFn {
    pub fn closure<F>(f: F) -> Self
    where
        F: Fn(&Context, &ScriptValue, &[ScriptValue]) -> ScriptValue + 'static,
    {
        BuiltInFn::Closure(Rc::new(f))
    }

    /// Execute this built-in function.
    pub fn call(&self, ctx: &Context, this: &ScriptValue, args: &[ScriptValue]) -> ScriptValue {
        match self {
            BuiltInFn::Native(f) => f(ctx, this, args),
            BuiltInFn::Closure(f) => f(ctx, this, args),
        }
    }
}

/// Declared shape of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Method,
    Getter,
    GetterSetter,
}
impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Method => write!(f, "method"),
            MemberKind::Getter => write!(f, "accessor-get"),
            MemberKind::GetterSetter => write!(f, "accessor-get-set"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberSpec {
    pub name: String,
    pub kind: MemberKind,
    pub flags: PropertyFlags,
}
impl MemberSpec {
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        MemberSpec {
            name: name.into(),
            kind,
            flags: PropertyFlags::NATIVE_MEMBER,
        }
    }

    pub fn with_flags(mut self, flags: PropertyFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Declarative member table of a native class. Built once per class and consumed by the binder.
#[derive(Debug, Clone)]
pub struct NativeClassSpec {
    /// Name of the class (e.g., "Point", "Mouse").
    pub name: String,

    pub static_members: Vec<MemberSpec>,

    pub instance_members: Vec<MemberSpec>,
}

impl NativeClassSpec {
    pub fn new(name: impl Into<String>) -> Self {
        NativeClassSpec {
            name: name.into(),
            static_members: Vec::new(),
            instance_members: Vec::new(),
        }
    }

    pub fn static_method(mut self, name: impl Into<String>) -> Self {
        self.static_members
            .push(MemberSpec::new(name, MemberKind::Method));
        self
    }

    pub fn static_getter(mut self, name: impl Into<String>) -> Self {
        self.static_members
            .push(MemberSpec::new(name, MemberKind::Getter));
        self
    }

    pub fn static_member(mut self, member: MemberSpec) -> Self {
        self.static_members.push(member);
        self
    }

    pub fn instance_method(mut self, name: impl Into<String>) -> Self {
        self.instance_members
            .push(MemberSpec::new(name, MemberKind::Method));
        self
    }

    pub fn instance_getter(mut self, name: impl Into<String>) -> Self {
        self.instance_members
            .push(MemberSpec::new(name, MemberKind::Getter));
        self
    }

    pub fn instance_member(mut self, member: MemberSpec) -> Self {
        self.instance_members.push(member);
        self
    }
}

/// A native implementation of one member.
#[derive(Clone)]
pub enum NativeMember {
    Method(BuiltInFn),
    Getter(BuiltInFn),
    GetterSetter(BuiltInFn, BuiltInFn),
}
impl NativeMember {
    pub fn kind(&self) -> MemberKind {
        match self {
            NativeMember::Method(_) => MemberKind::Method,
            NativeMember::Getter(_) => MemberKind::Getter,
            NativeMember::GetterSetter(_, _) => MemberKind::GetterSetter,
        }
    }
}

/// Host-side implementations backing a [`NativeClassSpec`].
#[derive(Clone)]
pub struct NativeImplTable {
    pub constructor: Option<(BuiltInFn, FunctionKind)>,
    pub statics: HashMap<String, NativeMember>,
    pub instance: HashMap<String, NativeMember>,
}

impl NativeImplTable {
    pub fn new() -> Self {
        NativeImplTable {
            constructor: None,
            statics: HashMap::new(),
            instance: HashMap::new(),
        }
    }

    pub fn with_constructor(mut self, body: NativeFn, kind: FunctionKind) -> Self {
        self.constructor = Some((BuiltInFn::Native(body), kind));
        self
    }

    pub fn static_method(mut self, name: impl Into<String>, func: NativeFn) -> Self {
        self.statics
            .insert(name.into(), NativeMember::Method(BuiltInFn::Native(func)));
        self
    }

    pub fn static_getter(mut self, name: impl Into<String>, getter: NativeFn) -> Self {
        self.statics
            .insert(name.into(), NativeMember::Getter(BuiltInFn::Native(getter)));
        self
    }

    pub fn instance_method(mut self, name: impl Into<String>, func: NativeFn) -> Self {
        self.instance
            .insert(name.into(), NativeMember::Method(BuiltInFn::Native(func)));
        self
    }

    pub fn instance_getter(mut self, name: impl Into<String>, getter: NativeFn) -> Self {
        self.instance
            .insert(name.into(), NativeMember::Getter(BuiltInFn::Native(getter)));
        self
    }

    pub fn instance_accessor(
        mut self,
        name: impl Into<String>,
        getter: NativeFn,
        setter: NativeFn,
    ) -> Self {
        self.instance.insert(
            name.into(),
            NativeMember::GetterSetter(BuiltInFn::Native(getter), BuiltInFn::Native(setter)),
        );
        self
    }
}

impl Default for NativeImplTable {
    fn default() -> Self {
        Self::new()
    }
}

/// A script-visible class implemented by host code.
pub trait NativeClass {
    fn spec(&self) -> NativeClassSpec;

    fn implementations(&self) -> NativeImplTable;

    /// Prepares the class's per-context static state. Runs before members are bound.
    fn init_static(&self, _ctx: &Context) {}
}
