use super::builtins;
use super::environment::Environment;
use super::special_forms::{self, SpecialForm};
use crate::value::{Function, NativeFunction, Value};
use indexmap::IndexMap;
use std::rc::Rc;

/// The fixed table of special forms and native functions an interpreter runs
/// with. It is built once, never mutated afterwards, and shared between
/// interpreters through an `Rc`.
#[derive(Clone)]
pub struct Registry {
    special_forms: IndexMap<&'static str, SpecialForm>,
    builtins: IndexMap<&'static str, NativeFunction>,
}

impl Registry {
    /// `if`, `while`, `do`, `define`, `fun` and the standard builtins.
    pub fn standard() -> Self {
        Self {
            special_forms: special_forms::standard().into_iter().collect(),
            builtins: builtins::standard().into_iter().map(|native| (native.name, native)).collect(),
        }
    }

    /// Add (or replace) a native function. Only usable while building.
    pub fn with_builtin(mut self, native: NativeFunction) -> Self {
        self.builtins.insert(native.name, native);
        self
    }

    pub fn special_form(&self, name: &str) -> Option<SpecialForm> {
        self.special_forms.get(name).copied()
    }

    pub fn is_special_form(&self, name: &str) -> bool {
        self.special_forms.contains_key(name)
    }

    pub fn special_form_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.special_forms.keys().copied()
    }

    pub fn builtin(&self, name: &str) -> Option<&NativeFunction> {
        self.builtins.get(name)
    }

    /// A root frame holding `true`, `false` and every builtin.
    pub fn global_environment(&self) -> Environment {
        let env = Environment::new();
        env.define("true", Value::Bool(true));
        env.define("false", Value::Bool(false));
        for (name, native) in &self.builtins {
            env.define(*name, Value::Function(Rc::new(Function::Native(*native))));
        }
        env
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
