//! The per-environment root of the object graph.

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use uuid::Uuid;

use crate::runner::config::RuntimeConfig;
use crate::runner::ds::function_object::function_create;
use crate::runner::ds::object::{object_create, ScriptObjectRef};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyFlags};
use crate::runner::ds::value::ScriptValue;
use crate::runner::plugin::event_bridge::EventBridge;
use crate::runner::plugin::types::BuiltInFn;

pub type ContextRef = Rc<Context>;

/// One running script environment.
///
/// A context owns the builtin prototypes, the table of materialized classes, the static state of
/// native classes and the event bridge. Nothing here is shared between contexts. Dropping the
/// last strong reference disposes the context, which releases every stage subscription made
/// through it.
pub struct Context {
    id: Uuid,
    config: RuntimeConfig,
    self_ref: Weak<Context>,
    object_prototype: ScriptObjectRef,
    function_prototype: ScriptObjectRef,
    globals: RefCell<HashMap<String, ScriptObjectRef>>,
    static_state: RefCell<HashMap<TypeId, Rc<dyn Any>>>,
    event_bridge: RefCell<EventBridge>,
    disposed: Cell<bool>,
}

impl Context {
    pub fn new(config: RuntimeConfig) -> ContextRef {
        let object_prototype = object_create(None);
        let function_prototype = object_create(Some(object_prototype.clone()));

        let to_string = function_create(
            Some(function_prototype.clone()),
            "toString",
            BuiltInFn::Native(object_proto_to_string),
        );
        (*object_prototype).borrow_mut().define_own_property(
            "toString",
            PropertyDescriptor::new_data(ScriptValue::Object(to_string), PropertyFlags::NATIVE_MEMBER),
        );

        let ctx = Rc::new_cyclic(|self_ref| Context {
            id: Uuid::new_v4(),
            config,
            self_ref: self_ref.clone(),
            object_prototype,
            function_prototype,
            globals: RefCell::new(HashMap::new()),
            static_state: RefCell::new(HashMap::new()),
            event_bridge: RefCell::new(EventBridge::new()),
            disposed: Cell::new(false),
        });
        tracing::debug!(target: "context", context = %ctx.id, "context created");
        ctx
    }

    pub fn with_defaults() -> ContextRef {
        Self::new(RuntimeConfig::default())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// A weak handle to this context, for closures the host keeps alive.
    pub fn downgrade(&self) -> Weak<Context> {
        self.self_ref.clone()
    }

    pub fn object_prototype(&self) -> ScriptObjectRef {
        self.object_prototype.clone()
    }

    pub fn function_prototype(&self) -> ScriptObjectRef {
        self.function_prototype.clone()
    }

    /// A fresh ordinary object inheriting from `Object.prototype`.
    pub fn new_object(&self) -> ScriptObjectRef {
        object_create(Some(self.object_prototype()))
    }

    /// A fresh method object inheriting from `Function.prototype`.
    pub fn new_function(&self, name: impl Into<String>, body: BuiltInFn) -> ScriptObjectRef {
        function_create(Some(self.function_prototype()), name, body)
    }

    pub fn global(&self, name: &str) -> Option<ScriptObjectRef> {
        self.globals.borrow().get(name).cloned()
    }

    /// Replaces the class object registered under `name`.
    pub fn set_global(&self, name: impl Into<String>, value: ScriptObjectRef) {
        self.globals.borrow_mut().insert(name.into(), value);
    }

    pub fn global_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.globals.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Static state of the native class whose state type is `T`.
    pub fn get_static_state<T: Any>(&self) -> Option<Rc<T>> {
        let state = self.static_state.borrow().get(&TypeId::of::<T>()).cloned()?;
        state.downcast::<T>().ok()
    }

    pub fn set_static_state<T: Any>(&self, state: T) -> Rc<T> {
        let state = Rc::new(state);
        self.static_state
            .borrow_mut()
            .insert(TypeId::of::<T>(), state.clone() as Rc<dyn Any>);
        state
    }

    /// Returns the static state for `T`, creating it with `init` on first use.
    pub fn static_state_or_init<T: Any>(&self, init: impl FnOnce(&Context) -> T) -> Rc<T> {
        match self.get_static_state::<T>() {
            Some(state) => state,
            None => {
                let state = init(self);
                self.set_static_state(state)
            }
        }
    }

    pub fn event_bridge(&self) -> &RefCell<EventBridge> {
        &self.event_bridge
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Releases every stage subscription and forgets materialized classes. Safe to call twice.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.event_bridge.borrow_mut().unbind();
        self.globals.borrow_mut().clear();
        self.static_state.borrow_mut().clear();
        tracing::debug!(target: "context", context = %self.id, "context disposed");
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Object.prototype.toString
fn object_proto_to_string(ctx: &Context, _this: &ScriptValue, _args: &[ScriptValue]) -> ScriptValue {
    ScriptValue::String(ctx.config().object_placeholder.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(u32);

    #[test]
    fn test_static_state_is_per_context() {
        let a = Context::with_defaults();
        let b = Context::with_defaults();
        a.set_static_state(Counter(1));
        assert_eq!(a.get_static_state::<Counter>().unwrap().0, 1);
        assert!(b.get_static_state::<Counter>().is_none());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_static_state_or_init_runs_once() {
        let ctx = Context::with_defaults();
        let first = ctx.static_state_or_init(|_| Counter(7));
        let second = ctx.static_state_or_init(|_| Counter(9));
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(second.0, 7);
    }

    #[test]
    fn test_builtin_prototype_graph() {
        let ctx = Context::with_defaults();
        let fp = ctx.function_prototype();
        let parent = fp.borrow().get_prototype_of().unwrap();
        assert!(Rc::ptr_eq(&parent, &ctx.object_prototype()));
        assert!(ctx.object_prototype().borrow().get_prototype_of().is_none());
        assert!(ctx.object_prototype().borrow().has_own("toString"));
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let ctx = Context::with_defaults();
        ctx.set_global("Thing", ctx.new_object());
        ctx.dispose();
        ctx.dispose();
        assert!(ctx.is_disposed());
        assert!(ctx.global("Thing").is_none());
    }
}
