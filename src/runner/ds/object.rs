use crate::runner::ds::function_object::FunctionObjectBase;
use crate::runner::ds::object_property::PropertyDescriptor;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type ScriptObjectRef = Rc<RefCell<ScriptObject>>;

pub enum ObjectKind {
    Ordinary,
    Function(FunctionObjectBase),
}

/// Own-property table plus prototype link.
///
/// `keys` keeps insertion order for enumeration, `properties` gives constant time lookup.
pub struct ObjectBase {
    properties: HashMap<String, PropertyDescriptor>,
    keys: Vec<String>,
    prototype: Option<ScriptObjectRef>,
}
impl ObjectBase {
    pub fn new(prototype: Option<ScriptObjectRef>) -> Self {
        ObjectBase {
            properties: HashMap::new(),
            keys: Vec::new(),
            prototype,
        }
    }
}

pub struct ScriptObject {
    base: ObjectBase,
    kind: ObjectKind,
}
impl ScriptObject {
    pub fn new_ordinary(prototype: Option<ScriptObjectRef>) -> Self {
        ScriptObject {
            base: ObjectBase::new(prototype),
            kind: ObjectKind::Ordinary,
        }
    }

    pub fn new_function(prototype: Option<ScriptObjectRef>, function: FunctionObjectBase) -> Self {
        ScriptObject {
            base: ObjectBase::new(prototype),
            kind: ObjectKind::Function(function),
        }
    }

    pub fn get_object_base(&self) -> &ObjectBase {
        &self.base
    }

    pub fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.kind, ObjectKind::Function(_))
    }

    pub fn as_function(&self) -> Option<&FunctionObjectBase> {
        match &self.kind {
            ObjectKind::Function(f) => Some(f),
            ObjectKind::Ordinary => None,
        }
    }

    pub fn get_prototype_of(&self) -> Option<ScriptObjectRef> {
        self.base.prototype.clone()
    }

    pub fn get_own_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.base.properties.get(name)
    }

    pub fn has_own(&self, name: &str) -> bool {
        self.base.properties.contains_key(name)
    }

    /// Installs `descriptor` under `name`, replacing any existing own property in place so that
    /// its enumeration position is kept.
    pub fn define_own_property(&mut self, name: &str, descriptor: PropertyDescriptor) {
        if self
            .base
            .properties
            .insert(name.to_string(), descriptor)
            .is_none()
        {
            self.base.keys.push(name.to_string());
        }
    }

    /// Removes an own property if its descriptor allows it. Returns whether removal happened.
    pub fn delete(&mut self, name: &str) -> bool {
        match self.base.properties.get(name) {
            Some(pd) if pd.is_deletable() => {
                self.base.properties.remove(name);
                self.base.keys.retain(|k| k != name);
                true
            }
            _ => false,
        }
    }

    /// Own enumerable property names, in insertion order.
    pub fn enumerate(&self) -> Vec<String> {
        self.base
            .keys
            .iter()
            .filter(|k| {
                self.base
                    .properties
                    .get(k.as_str())
                    .map(|pd| pd.is_enumerable())
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    /// Every own property name, hidden ones included.
    pub fn own_property_keys(&self) -> Vec<String> {
        self.base.keys.clone()
    }

    pub fn to_string(&self) -> String {
        match &self.kind {
            ObjectKind::Ordinary => "object".to_string(),
            ObjectKind::Function(f) => format!("function {}() {{ [native code] }}", f.name),
        }
    }
}

pub fn object_create(prototype: Option<ScriptObjectRef>) -> ScriptObjectRef {
    Rc::new(RefCell::new(ScriptObject::new_ordinary(prototype)))
}

/// Links `o` to `prototype`. Returns `false`, leaving `o` untouched, when the new link would close
/// a cycle.
pub fn set_prototype_of(o: &ScriptObjectRef, prototype: Option<ScriptObjectRef>) -> bool {
    let mut p = prototype.clone();
    while let Some(some_p) = p {
        if Rc::ptr_eq(&some_p, o) {
            return false;
        }
        p = (*some_p).borrow().get_prototype_of();
    }
    (**o).borrow_mut().get_object_base_mut().prototype = prototype;
    true
}

/// Number of links between `o` and the end of its prototype chain.
pub fn prototype_depth(o: &ScriptObjectRef) -> usize {
    let mut depth = 0;
    let mut p = (**o).borrow().get_prototype_of();
    while let Some(some_p) = p {
        depth += 1;
        p = (*some_p).borrow().get_prototype_of();
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::object_property::PropertyFlags;
    use crate::runner::ds::value::ScriptValue;

    fn data(n: f64, flags: PropertyFlags) -> PropertyDescriptor {
        PropertyDescriptor::new_data(ScriptValue::Number(n), flags)
    }

    #[test]
    fn test_enumerate_keeps_insertion_order() {
        let mut o = ScriptObject::new_ordinary(None);
        o.define_own_property("b", data(1.0, PropertyFlags::DEFAULT));
        o.define_own_property("a", data(2.0, PropertyFlags::DEFAULT));
        o.define_own_property("hidden", data(3.0, PropertyFlags::HIDDEN));
        o.define_own_property("c", data(4.0, PropertyFlags::DEFAULT));
        assert_eq!(o.enumerate(), vec!["b", "a", "c"]);
        assert_eq!(o.own_property_keys(), vec!["b", "a", "hidden", "c"]);
    }

    #[test]
    fn test_redefine_keeps_position() {
        let mut o = ScriptObject::new_ordinary(None);
        o.define_own_property("x", data(1.0, PropertyFlags::DEFAULT));
        o.define_own_property("y", data(2.0, PropertyFlags::DEFAULT));
        o.define_own_property("x", data(5.0, PropertyFlags::DEFAULT));
        assert_eq!(o.enumerate(), vec!["x", "y"]);
    }

    #[test]
    fn test_delete_respects_deletable() {
        let mut o = ScriptObject::new_ordinary(None);
        o.define_own_property("gone", data(1.0, PropertyFlags::DEFAULT));
        o.define_own_property("stays", data(1.0, PropertyFlags::HIDDEN));
        assert!(o.delete("gone"));
        assert!(!o.delete("stays"));
        assert!(!o.delete("never_there"));
        assert!(!o.has_own("gone"));
        assert!(o.has_own("stays"));
    }

    #[test]
    fn test_set_prototype_rejects_cycles() {
        let a = object_create(None);
        let b = object_create(Some(a.clone()));
        let c = object_create(Some(b.clone()));
        assert!(!set_prototype_of(&a, Some(c.clone())));
        assert!(!set_prototype_of(&a, Some(a.clone())));
        assert!(a.borrow().get_prototype_of().is_none());
        assert_eq!(prototype_depth(&c), 2);
    }
}
