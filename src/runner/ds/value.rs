use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::runner::ds::object::ScriptObjectRef;
use crate::runner::ds::operations::type_conversion::{
    number_to_string, TYPE_STR_NULL, TYPE_STR_UNDEFINED,
};

/// The tagged value every script-visible slot holds.
pub enum ScriptValue {
    Undefined,
    Null,
    Boolean(bool),
    String(String),
    Number(f64),
    Object(ScriptObjectRef),
}
impl ScriptValue {
    pub fn is_undefined(&self) -> bool {
        matches!(self, ScriptValue::Undefined)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ScriptValue::Object(_))
    }

    pub fn as_object(&self) -> Option<&ScriptObjectRef> {
        match self {
            ScriptValue::Object(o) => Some(o),
            _ => None,
        }
    }
}
impl Clone for ScriptValue {
    fn clone(&self) -> Self {
        match self {
            ScriptValue::Undefined => ScriptValue::Undefined,
            ScriptValue::Null => ScriptValue::Null,
            ScriptValue::Boolean(b) => ScriptValue::Boolean(*b),
            ScriptValue::String(s) => ScriptValue::String(s.to_string()),
            ScriptValue::Number(n) => ScriptValue::Number(*n),
            ScriptValue::Object(o) => ScriptValue::Object(o.clone()),
        }
    }
}
impl Default for ScriptValue {
    fn default() -> Self {
        ScriptValue::Undefined
    }
}
impl From<f64> for ScriptValue {
    fn from(n: f64) -> Self {
        ScriptValue::Number(n)
    }
}
impl From<bool> for ScriptValue {
    fn from(b: bool) -> Self {
        ScriptValue::Boolean(b)
    }
}
impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        ScriptValue::String(s.to_string())
    }
}
impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        ScriptValue::String(s)
    }
}
impl From<ScriptObjectRef> for ScriptValue {
    fn from(o: ScriptObjectRef) -> Self {
        ScriptValue::Object(o)
    }
}
/// Primitives print as their string coercion. Objects print a fixed description, since running
/// `toString` needs a [`Context`](crate::runner::ds::realm::Context).
impl Display for ScriptValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Undefined => write!(f, "{}", TYPE_STR_UNDEFINED),
            ScriptValue::Null => write!(f, "{}", TYPE_STR_NULL),
            ScriptValue::Boolean(b) => write!(f, "{}", b),
            ScriptValue::String(s) => write!(f, "{}", s),
            ScriptValue::Number(n) => write!(f, "{}", number_to_string(*n)),
            ScriptValue::Object(o) => write!(f, "{}", (**o).borrow().to_string()),
        }
    }
}
impl fmt::Debug for ScriptValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Undefined => write!(f, "ScriptValue::Undefined"),
            ScriptValue::Null => write!(f, "ScriptValue::Null"),
            ScriptValue::Boolean(b) => write!(f, "ScriptValue::Boolean({})", b),
            ScriptValue::String(s) => write!(f, "ScriptValue::String({:?})", s),
            ScriptValue::Number(n) => write!(f, "ScriptValue::Number({:?})", n),
            ScriptValue::Object(_) => write!(f, "ScriptValue::Object(...)"),
        }
    }
}
impl PartialEq for ScriptValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScriptValue::Undefined, ScriptValue::Undefined) => true,
            (ScriptValue::Null, ScriptValue::Null) => true,
            (ScriptValue::Boolean(a), ScriptValue::Boolean(b)) => a == b,
            (ScriptValue::String(a), ScriptValue::String(b)) => a == b,
            (ScriptValue::Number(a), ScriptValue::Number(b)) => a == b,
            (ScriptValue::Object(a), ScriptValue::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
