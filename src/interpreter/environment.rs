use crate::value::Value;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Bindings of a single frame, kept in definition order.
type Scope = IndexMap<Rc<str>, Value>;

/// One lexical frame plus a link to its enclosing frame.
///
/// Cloning an `Environment` yields another handle to the same frame, which is
/// how closures share (rather than copy) the scope they were defined in.
/// The parent link is fixed at construction, so the chain is always finite
/// and acyclic.
#[derive(Clone, Default)]
pub struct Environment {
    bindings: Rc<RefCell<Scope>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh, empty frame whose lookups fall back to `parent`.
    pub fn with_parent(parent: &Environment) -> Self {
        Self {
            bindings: Rc::new(RefCell::new(IndexMap::new())),
            parent: Some(Rc::new(parent.clone())),
        }
    }

    /// Bind `name` in this frame, shadowing any binding in an ancestor.
    pub fn define(&self, name: impl Into<Rc<str>>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Look `name` up from this frame outwards.
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut frame = Some(self);
        while let Some(env) = frame {
            if let Some(value) = env.bindings.borrow().get(name) {
                return Some(value.clone());
            }
            frame = env.parent.as_deref();
        }
        None
    }

    /// Whether `name` is bound in this frame itself.
    pub fn has_own(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    pub fn parent(&self) -> Option<&Environment> {
        self.parent.as_deref()
    }

    /// Whether both handles refer to the same frame.
    pub fn same_frame(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.bindings, &other.bindings)
    }

    /// Number of frames from this one to the root, inclusive.
    pub fn depth(&self) -> usize {
        std::iter::successors(Some(self), |env| env.parent()).count()
    }

    /// Names bound in this frame, in definition order.
    pub fn names(&self) -> Vec<Rc<str>> {
        self.bindings.borrow().keys().cloned().collect()
    }
}

// Frames can contain closures that point back at them, so only names are shown.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.names())
            .field("depth", &self.depth())
            .finish()
    }
}
