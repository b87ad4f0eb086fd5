//! Registry of native classes and the bootstrapper that installs them into a context.

use crate::runner::ds::error::BindError;
use crate::runner::ds::object::ScriptObjectRef;
use crate::runner::ds::operations::broadcast;
use crate::runner::ds::realm::Context;
use crate::runner::std_lib::register_core_builtins;

use super::binder::wrap;
use super::types::NativeClass;

/// How a registered class is materialized.
pub struct ClassEntry {
    pub name: String,
    /// Materialize as a constructor rather than a plain object.
    pub is_function: bool,
    /// Install the listener protocol on the class object.
    pub broadcaster: bool,
    class: Box<dyn NativeClass>,
}

impl ClassEntry {
    pub fn new(name: impl Into<String>, is_function: bool, class: Box<dyn NativeClass>) -> Self {
        ClassEntry {
            name: name.into(),
            is_function,
            broadcaster: false,
            class,
        }
    }

    pub fn as_broadcaster(mut self) -> Self {
        self.broadcaster = true;
        self
    }
}

/// Registry for native classes.
/// Holds the class definitions only; every [`install`](Self::install) produces fresh objects for
/// the target context.
pub struct NativeClassRegistry {
    entries: Vec<ClassEntry>,
}

impl NativeClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        NativeClassRegistry {
            entries: Vec::new(),
        }
    }

    /// Create a registry with the core classes (Mouse, Point, System).
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        register_core_builtins(&mut registry);
        registry
    }

    /// Registers `entry`, replacing an earlier class of the same name.
    pub fn register(&mut self, entry: ClassEntry) {
        self.entries.retain(|e| e.name != entry.name);
        self.entries.push(entry);
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn class_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Binds one class into `ctx` and publishes it as a global. `None` if no such class exists.
    pub fn materialize(
        &self,
        ctx: &Context,
        name: &str,
    ) -> Option<Result<ScriptObjectRef, BindError>> {
        let entry = self.entries.iter().find(|e| e.name == name)?;
        Some(Self::materialize_entry(ctx, entry))
    }

    /// Binds every registered class into `ctx`, in registration order. Stops at the first
    /// misconfigured class.
    pub fn install(&self, ctx: &Context) -> Result<(), BindError> {
        for entry in &self.entries {
            Self::materialize_entry(ctx, entry)?;
        }
        tracing::debug!(
            target: "binder",
            context = %ctx.id(),
            classes = self.entries.len(),
            "core classes installed"
        );
        Ok(())
    }

    fn materialize_entry(ctx: &Context, entry: &ClassEntry) -> Result<ScriptObjectRef, BindError> {
        let class_object = wrap(ctx, entry.is_function, entry.class.as_ref())?;
        if entry.broadcaster {
            broadcast::initialize(ctx, &class_object);
        }
        ctx.set_global(entry.name.clone(), class_object.clone());
        Ok(class_object)
    }
}

impl Default for NativeClassRegistry {
    fn default() -> Self {
        Self::with_core()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::plugin::types::{NativeClassSpec, NativeImplTable};

    struct Empty;

    impl NativeClass for Empty {
        fn spec(&self) -> NativeClassSpec {
            NativeClassSpec::new("Empty")
        }

        fn implementations(&self) -> NativeImplTable {
            NativeImplTable::new()
        }
    }

    struct Broken;

    impl NativeClass for Broken {
        fn spec(&self) -> NativeClassSpec {
            NativeClassSpec::new("Broken").static_method("missing")
        }

        fn implementations(&self) -> NativeImplTable {
            NativeImplTable::new()
        }
    }

    #[test]
    fn test_with_core_lists_core_classes() {
        let registry = NativeClassRegistry::with_core();
        assert!(registry.has_class("Mouse"));
        assert!(registry.has_class("Point"));
        assert!(registry.has_class("System"));
    }

    #[test]
    fn test_register_replaces_by_name() {
        let mut registry = NativeClassRegistry::new();
        registry.register(ClassEntry::new("Empty", false, Box::new(Empty)));
        registry.register(ClassEntry::new("Empty", true, Box::new(Empty)));
        assert_eq!(registry.class_names(), vec!["Empty"]);
    }

    #[test]
    fn test_install_publishes_globals() {
        let ctx = Context::with_defaults();
        NativeClassRegistry::with_core().install(&ctx).unwrap();
        assert_eq!(ctx.global_names(), vec!["Mouse", "Point", "System"]);
    }

    #[test]
    fn test_broken_class_is_not_published() {
        let ctx = Context::with_defaults();
        let mut registry = NativeClassRegistry::new();
        registry.register(ClassEntry::new("Broken", false, Box::new(Broken)));
        assert!(registry.install(&ctx).is_err());
        assert!(ctx.global("Broken").is_none());
        assert!(registry.materialize(&ctx, "Nothing").is_none());
    }

    #[test]
    fn test_materialize_twice_gives_independent_objects() {
        let ctx = Context::with_defaults();
        let mut registry = NativeClassRegistry::new();
        registry.register(ClassEntry::new("Empty", false, Box::new(Empty)).as_broadcaster());
        let first = registry.materialize(&ctx, "Empty").unwrap().unwrap();
        let second = registry.materialize(&ctx, "Empty").unwrap().unwrap();
        assert!(!std::rc::Rc::ptr_eq(&first, &second));
        assert!(second.borrow().has_own(broadcast::LISTENERS_PROPERTY));
    }
}
