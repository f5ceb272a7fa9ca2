//! Output built-in functions.

use crate::format::display_value;
use crate::value::Value;
use super::super::error::InterpreterError;
use std::io::Write;

/// Writes the value on its own line and hands it back, so `print` can wrap
/// any subexpression for tracing.
pub fn builtin_print(args: &[Value], out: &mut dyn Write) -> Result<Value, InterpreterError> {
    let value = &args[0];
    if let Err(err) = writeln!(out, "{}", display_value(value)).and_then(|()| out.flush()) {
        tracing::warn!(%err, "print: output sink rejected write");
    }
    Ok(value.clone())
}
