use crate::runner::ds::object::ScriptObjectRef;
use crate::runner::ds::value::ScriptValue;
use std::rc::Rc;

/// Mutability and visibility of a single property.
///
/// Flags are fixed when the descriptor is installed; nothing in this crate flips them afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyFlags {
    pub enumerable: bool,
    pub deletable: bool,
    pub writable: bool,
}
impl PropertyFlags {
    /// Flags given to properties created by a plain `put`.
    pub const DEFAULT: PropertyFlags = PropertyFlags {
        enumerable: true,
        deletable: true,
        writable: true,
    };

    /// Flags given to members installed by the native class binder.
    pub const NATIVE_MEMBER: PropertyFlags = PropertyFlags {
        enumerable: false,
        deletable: false,
        writable: true,
    };

    pub const HIDDEN: PropertyFlags = PropertyFlags {
        enumerable: false,
        deletable: false,
        writable: false,
    };

    pub fn new(enumerable: bool, deletable: bool, writable: bool) -> Self {
        PropertyFlags {
            enumerable,
            deletable,
            writable,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }
}
impl Default for PropertyFlags {
    fn default() -> Self {
        PropertyFlags::DEFAULT
    }
}

#[derive(Clone)]
pub enum PropertyKind {
    Data {
        value: ScriptValue,
    },
    Accessor {
        get: Option<ScriptObjectRef>,
        set: Option<ScriptObjectRef>,
    },
}

#[derive(Clone)]
pub struct PropertyDescriptor {
    pub flags: PropertyFlags,
    pub kind: PropertyKind,
}
impl PropertyDescriptor {
    pub fn new_data(value: ScriptValue, flags: PropertyFlags) -> Self {
        PropertyDescriptor {
            flags,
            kind: PropertyKind::Data { value },
        }
    }

    pub fn new_accessor(
        get: Option<ScriptObjectRef>,
        set: Option<ScriptObjectRef>,
        flags: PropertyFlags,
    ) -> Self {
        PropertyDescriptor {
            flags,
            kind: PropertyKind::Accessor { get, set },
        }
    }

    pub fn is_enumerable(&self) -> bool {
        self.flags.enumerable
    }

    pub fn is_deletable(&self) -> bool {
        self.flags.deletable
    }

    pub fn is_writable(&self) -> bool {
        self.flags.writable
    }

    pub fn is_data_descriptor(&self) -> bool {
        match self.kind {
            PropertyKind::Data { .. } => true,
            PropertyKind::Accessor { .. } => false,
        }
    }

    pub fn is_accessor_descriptor(&self) -> bool {
        !self.is_data_descriptor()
    }
}
impl PartialEq for PropertyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        if self.flags != other.flags {
            return false;
        }
        match (&self.kind, &other.kind) {
            (PropertyKind::Data { value }, PropertyKind::Data { value: other_value }) => {
                value == other_value
            }
            (
                PropertyKind::Accessor { get, set },
                PropertyKind::Accessor {
                    get: other_get,
                    set: other_set,
                },
            ) => same_callable(get, other_get) && same_callable(set, other_set),
            _ => false,
        }
    }
}

fn same_callable(a: &Option<ScriptObjectRef>, b: &Option<ScriptObjectRef>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}
