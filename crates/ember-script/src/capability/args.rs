use ember_engine::paint::Color;
use mlua::{AnyUserData, UserData, Value};

use crate::host::color_from_table;

use super::userdata_name;

/// Userdata types that cross the bridge by value.
///
/// `NAME` is what argument errors report for the type.
pub(crate) trait NativeType: UserData + Clone + 'static {
    const NAME: &'static str;
}

/// Positional argument reader for one native call.
///
/// Positions are 1-based as in Lua error messages. An argument that was not
/// supplied, or was passed as `nil`, counts as absent: optional readers
/// return their default and required readers raise
/// `bad argument #n to 'fn' (T expected, got no value)`.
pub(crate) struct Args<'a> {
    func: &'static str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub(crate) fn new(func: &'static str, values: &'a [Value]) -> Self {
        Self { func, values }
    }

    fn get(&self, n: usize) -> Option<&Value> {
        match self.values.get(n - 1) {
            None | Some(Value::Nil) => None,
            Some(v) => Some(v),
        }
    }

    fn bad(&self, n: usize, expected: &str) -> mlua::Error {
        let got = self.get(n).map_or("no value", describe);
        bad_argument(n, self.func, expected, got)
    }

    pub(crate) fn number(&self, n: usize) -> mlua::Result<f64> {
        self.get(n).and_then(as_number).ok_or_else(|| self.bad(n, "number"))
    }

    pub(crate) fn number_or(&self, n: usize, default: f64) -> mlua::Result<f64> {
        match self.get(n) {
            None => Ok(default),
            Some(_) => self.number(n),
        }
    }

    pub(crate) fn integer(&self, n: usize) -> mlua::Result<i64> {
        self.get(n).and_then(as_integer).ok_or_else(|| self.bad(n, "integer"))
    }

    pub(crate) fn integer_or(&self, n: usize, default: i64) -> mlua::Result<i64> {
        match self.get(n) {
            None => Ok(default),
            Some(_) => self.integer(n),
        }
    }

    /// Strings and numbers are accepted, numbers converted to text.
    pub(crate) fn string(&self, n: usize) -> mlua::Result<String> {
        match self.get(n) {
            Some(Value::String(s)) => Ok(s.to_string_lossy()),
            Some(Value::Integer(i)) => Ok(i.to_string()),
            Some(Value::Number(x)) => Ok(x.to_string()),
            _ => Err(self.bad(n, "string")),
        }
    }

    /// Lua truthiness: only `false` and `nil` are false.
    pub(crate) fn flag_or(&self, n: usize, default: bool) -> bool {
        match self.get(n) {
            None => default,
            Some(Value::Boolean(b)) => *b,
            Some(_) => true,
        }
    }

    pub(crate) fn color(&self, n: usize) -> mlua::Result<Color> {
        match self.get(n) {
            Some(Value::Table(t)) => Ok(color_from_table(t)),
            _ => Err(self.bad(n, "color table")),
        }
    }

    pub(crate) fn color_or(&self, n: usize, default: Color) -> mlua::Result<Color> {
        match self.get(n) {
            None => Ok(default),
            Some(_) => self.color(n),
        }
    }

    /// Copies a native value out of its userdata block.
    pub(crate) fn native<T: NativeType>(&self, n: usize) -> mlua::Result<T> {
        match self.get(n) {
            Some(Value::UserData(ud)) => borrow_copy::<T>(ud).ok_or_else(|| self.bad(n, T::NAME)),
            _ => Err(self.bad(n, T::NAME)),
        }
    }
}

pub(crate) fn borrow_copy<T: NativeType>(ud: &AnyUserData) -> Option<T> {
    ud.borrow::<T>().ok().map(|r| (*r).clone())
}

pub(crate) fn bad_argument(n: usize, func: &str, expected: &str, got: &str) -> mlua::Error {
    mlua::Error::RuntimeError(format!(
        "bad argument #{n} to '{func}' ({expected} expected, got {got})"
    ))
}

/// Type name for error messages; native userdata report their own name.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::UserData(ud) => userdata_name(ud),
        other => other.type_name(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Number(x) => Some(*x),
        Value::String(s) => s.to_str().ok()?.trim().parse().ok(),
        _ => None,
    }
}

/// Floats are accepted when they hold an exact integer, as Lua does.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Number(x) if x.fract() == 0.0 && x.is_finite() => Some(*x as i64),
        Value::String(s) => s.to_str().ok()?.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlua::Lua;

    fn err_text(e: mlua::Error) -> String {
        e.to_string()
    }

    #[test]
    fn absent_and_nil_take_defaults() {
        let values = [Value::Integer(3), Value::Nil];
        let args = Args::new("f", &values);
        assert_eq!(args.integer_or(1, 0).unwrap(), 3);
        assert_eq!(args.integer_or(2, 7).unwrap(), 7);
        assert_eq!(args.number_or(5, 1.5).unwrap(), 1.5);
        assert!(!args.flag_or(2, false));
    }

    #[test]
    fn missing_required_reports_no_value() {
        let args = Args::new("new", &[]);
        let mlua::Error::RuntimeError(msg) = args.number(1).unwrap_err() else {
            panic!("expected a runtime error");
        };
        assert_eq!(msg, "bad argument #1 to 'new' (number expected, got no value)");
    }

    #[test]
    fn wrong_type_reports_lua_type_name() {
        let lua = Lua::new();
        let values = [Value::Table(lua.create_table().unwrap())];
        let args = Args::new("load", &values);
        let msg = err_text(args.string(1).unwrap_err());
        assert!(msg.contains("string expected, got table"), "{msg}");
    }

    #[test]
    fn integers_accept_integral_floats_only() {
        let values = [Value::Number(4.0), Value::Number(4.5)];
        let args = Args::new("f", &values);
        assert_eq!(args.integer(1).unwrap(), 4);
        assert!(args.integer(2).is_err());
    }

    #[test]
    fn truthiness_for_flags() {
        let values = [Value::Integer(0), Value::Boolean(false)];
        let args = Args::new("f", &values);
        assert!(args.flag_or(1, false));
        assert!(!args.flag_or(2, true));
    }

    #[test]
    fn numeric_strings_convert() {
        let lua = Lua::new();
        let values = [Value::String(lua.create_string(" 2.5 ").unwrap())];
        assert_eq!(Args::new("f", &values).number(1).unwrap(), 2.5);
    }
}
