use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::object::{ScriptObject, ScriptObjectRef};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyFlags};
use crate::runner::ds::value::ScriptValue;
use crate::runner::plugin::types::BuiltInFn;

/// How a plain call of the function behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// Call runs the body with the caller's `this`.
    Normal,
    /// Call is treated exactly like construction; the caller's `this` is ignored.
    ConstructOnCall,
}

pub struct FunctionObjectBase {
    pub name: String,
    pub body: BuiltInFn,
    pub function_kind: FunctionKind,
}
impl FunctionObjectBase {
    pub fn new(name: impl Into<String>, body: BuiltInFn, function_kind: FunctionKind) -> Self {
        FunctionObjectBase {
            name: name.into(),
            body,
            function_kind,
        }
    }
}

/// Creates a callable object without a `prototype` property, as used for methods and accessors.
pub fn function_create(
    function_prototype: Option<ScriptObjectRef>,
    name: impl Into<String>,
    body: BuiltInFn,
) -> ScriptObjectRef {
    Rc::new(RefCell::new(ScriptObject::new_function(
        function_prototype,
        FunctionObjectBase::new(name, body, FunctionKind::Normal),
    )))
}

/// Creates a constructible function whose `prototype` property is `instance_prototype`, and
/// links `instance_prototype.constructor` back to it.
pub fn constructor_create(
    function_prototype: Option<ScriptObjectRef>,
    name: impl Into<String>,
    body: BuiltInFn,
    function_kind: FunctionKind,
    instance_prototype: ScriptObjectRef,
) -> ScriptObjectRef {
    let base = FunctionObjectBase::new(name, body, function_kind);
    let f = Rc::new(RefCell::new(ScriptObject::new_function(function_prototype, base)));
    install_prototype(&f, &instance_prototype);
    f
}

/// Sets `f.prototype = instance_prototype` and `instance_prototype.constructor = f`.
pub fn install_prototype(f: &ScriptObjectRef, instance_prototype: &ScriptObjectRef) {
    (**f).borrow_mut().define_own_property(
        "prototype",
        PropertyDescriptor::new_data(
            ScriptValue::Object(instance_prototype.clone()),
            PropertyFlags::NATIVE_MEMBER,
        ),
    );
    (**instance_prototype).borrow_mut().define_own_property(
        "constructor",
        PropertyDescriptor::new_data(ScriptValue::Object(f.clone()), PropertyFlags::NATIVE_MEMBER),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::object::object_create;

    fn noop(
        _ctx: &crate::runner::ds::realm::Context,
        _this: &ScriptValue,
        _args: &[ScriptValue],
    ) -> ScriptValue {
        ScriptValue::Undefined
    }

    #[test]
    fn test_constructor_links_prototype_both_ways() {
        let proto = object_create(None);
        let f = constructor_create(
            None,
            "Thing",
            BuiltInFn::Native(noop),
            FunctionKind::Normal,
            proto.clone(),
        );
        let f_ref = f.borrow();
        match &f_ref.get_own_property("prototype").unwrap().kind {
            crate::runner::ds::object_property::PropertyKind::Data { value } => {
                assert_eq!(value, &ScriptValue::Object(proto.clone()))
            }
            _ => panic!("prototype should be a data property"),
        }
        assert!(proto.borrow().has_own("constructor"));
        assert!(!proto.borrow().get_own_property("constructor").unwrap().is_enumerable());
        assert_eq!(f_ref.as_function().unwrap().name, "Thing");
    }

    #[test]
    fn test_plain_function_has_no_prototype_property() {
        let f = function_create(None, "method", BuiltInFn::Native(noop));
        assert!(f.borrow().is_callable());
        assert!(!f.borrow().has_own("prototype"));
    }
}
