use std::fmt;

use crate::interpreter::stack::ensure_sufficient_stack;
use crate::value::{Function, Value};

/// Formats a number the way the language prints it: integral values without
/// a fraction, `NaN`, signed `Infinity`, and exponent form (`1e+21`, `1e-7`)
/// outside `[1e-6, 1e21)`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
            _ => formatted,
        }
    } else {
        n.to_string()
    }
}

/// Textual form used by `print` and the REPL. Strings are raw at the top
/// level and quoted when nested inside an array.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_string(),
        other => repr_value(other),
    }
}

pub fn repr_value(value: &Value) -> String {
    ensure_sufficient_stack(|| match value {
        Value::Number(n) => format_number(*n),
        Value::String(s) => format!("\"{}\"", s),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => {
            let items = items.borrow();
            let elements: Vec<String> = items.iter().map(repr_value).collect();
            format!("[{}]", elements.join(", "))
        }
        Value::Function(func) => match func.as_ref() {
            Function::Native(native) => format!("<native {}>", native.name),
            Function::Closure(_) => "<function>".to_string(),
        },
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_value(self))
    }
}
