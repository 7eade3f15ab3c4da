//! `core.vector` and `core.rect`: boxed geometry values.
//!
//! Values are copied into Lua-owned userdata when created and copied back out
//! on every native read.

use ember_engine::coords::{Rect, Vector};
use mlua::{Lua, MetaMethod, Table, UserData, UserDataMethods, Value, Variadic};

use crate::context::SharedContext;

use super::args::{Args, NativeType, borrow_copy, describe};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct BoxedVector(pub Vector);

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct BoxedRect(pub Rect);

impl NativeType for BoxedVector {
    const NAME: &'static str = "Vector";
}

impl NativeType for BoxedRect {
    const NAME: &'static str = "Rect";
}

// ── arithmetic ────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }

    fn scalar(self, v: Vector, s: f64) -> Vector {
        match self {
            ArithOp::Add => v.add_scalar(s),
            ArithOp::Sub => v.sub_scalar(s),
            ArithOp::Mul => v.mul_scalar(s),
            ArithOp::Div => v.div_scalar(s),
        }
    }

    fn pairwise(self, a: Vector, b: Vector) -> Vector {
        match self {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a.mul_vector(b),
            ArithOp::Div => a.div_vector(b),
        }
    }
}

#[derive(Debug, Copy, Clone)]
enum Operand {
    Scalar(f64),
    Vector(Vector),
}

fn operand(value: &Value) -> Option<Operand> {
    match value {
        Value::Integer(i) => Some(Operand::Scalar(*i as f64)),
        Value::Number(x) => Some(Operand::Scalar(*x)),
        Value::UserData(ud) => borrow_copy::<BoxedVector>(ud).map(|b| Operand::Vector(b.0)),
        _ => None,
    }
}

/// Resolves `a <op> b` where at least one side is a vector.
///
/// A scalar applies to each component whichever side it is on, so
/// `2 - v` equals `v - 2`.
fn arith(op: ArithOp, a: &Value, b: &Value) -> mlua::Result<BoxedVector> {
    let v = match (operand(a), operand(b)) {
        (Some(Operand::Scalar(s)), Some(Operand::Vector(v)))
        | (Some(Operand::Vector(v)), Some(Operand::Scalar(s))) => op.scalar(v, s),
        (Some(Operand::Vector(l)), Some(Operand::Vector(r))) => op.pairwise(l, r),
        _ => {
            return Err(mlua::Error::RuntimeError(format!(
                "attempt to perform arithmetic ({}) on {} and {}",
                op.symbol(),
                describe(a),
                describe(b)
            )));
        }
    };
    Ok(BoxedVector(v))
}

// ── Vector ────────────────────────────────────────────────────────────────

impl UserData for BoxedVector {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("x", |_, this, ()| Ok(this.0.x));
        methods.add_method("y", |_, this, ()| Ok(this.0.y));

        methods.add_method("lerp", |_, this, rest: Variadic<Value>| {
            let args = Args::new("lerp", &rest);
            let b: BoxedVector = args.native(1)?;
            let t = args.number(2)?;
            Ok(BoxedVector(Vector::lerp(this.0, b.0, t)))
        });

        for (meta, op) in [
            (MetaMethod::Add, ArithOp::Add),
            (MetaMethod::Sub, ArithOp::Sub),
            (MetaMethod::Mul, ArithOp::Mul),
            (MetaMethod::Div, ArithOp::Div),
        ] {
            methods.add_meta_function(meta, move |_, (a, b): (Value, Value)| arith(op, &a, &b));
        }

        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| {
            Ok(format!("Vector<x: {:?}, y: {:?}>", this.0.x, this.0.y))
        });
    }
}

pub(crate) fn vector_module(lua: &Lua, _ctx: &SharedContext) -> mlua::Result<Table> {
    let m = lua.create_table()?;

    m.set(
        "new",
        lua.create_function(|_, rest: Variadic<Value>| {
            let args = Args::new("new", &rest);
            Ok(BoxedVector(Vector::new(args.number(1)?, args.number(2)?)))
        })?,
    )?;

    m.set(
        "lerp",
        lua.create_function(|_, rest: Variadic<Value>| {
            let args = Args::new("lerp", &rest);
            let a: BoxedVector = args.native(1)?;
            let b: BoxedVector = args.native(2)?;
            Ok(BoxedVector(Vector::lerp(a.0, b.0, args.number(3)?)))
        })?,
    )?;

    m.set(
        "magnitude",
        lua.create_function(|_, rest: Variadic<Value>| {
            let v: BoxedVector = Args::new("magnitude", &rest).native(1)?;
            Ok(v.0.magnitude())
        })?,
    )?;

    m.set(
        "distance",
        lua.create_function(|_, rest: Variadic<Value>| {
            let args = Args::new("distance", &rest);
            let a: BoxedVector = args.native(1)?;
            let b: BoxedVector = args.native(2)?;
            Ok(Vector::distance(a.0, b.0))
        })?,
    )?;

    Ok(m)
}

// ── Rect ──────────────────────────────────────────────────────────────────

impl UserData for BoxedRect {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("x", |_, this, ()| Ok(this.0.x()));
        methods.add_method("y", |_, this, ()| Ok(this.0.y()));
        methods.add_method("w", |_, this, ()| Ok(this.0.w()));
        methods.add_method("h", |_, this, ()| Ok(this.0.h()));

        methods.add_method("overlaps", |_, this, rest: Variadic<Value>| {
            let other: BoxedRect = Args::new("overlaps", &rest).native(1)?;
            Ok(match this.0.overlaps(other.0) {
                Some(side) => (true, BoxedVector(side)),
                None => (false, BoxedVector(Vector::ZERO)),
            })
        });

        // Getter with no argument, setter with one.
        methods.add_method_mut("position", |_, this, rest: Variadic<Value>| {
            if rest.is_empty() {
                return Ok(Some(BoxedVector(this.0.position)));
            }
            let v: BoxedVector = Args::new("position", &rest).native(1)?;
            this.0.position = v.0;
            Ok(None)
        });

        methods.add_method("dimension", |_, this, ()| Ok(BoxedVector(this.0.dimension)));
        methods.add_method("center", |_, this, ()| Ok(BoxedVector(this.0.center())));

        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| {
            let r = this.0;
            Ok(format!(
                "Rect<x: {:?}, y: {:?}, w: {:?}, h: {:?}>",
                r.x(),
                r.y(),
                r.w(),
                r.h()
            ))
        });
    }
}

pub(crate) fn rect_module(lua: &Lua, _ctx: &SharedContext) -> mlua::Result<Table> {
    let m = lua.create_table()?;

    m.set(
        "new",
        lua.create_function(|_, rest: Variadic<Value>| {
            let args = Args::new("new", &rest);
            Ok(BoxedRect(Rect::new(
                args.number(1)?,
                args.number(2)?,
                args.number(3)?,
                args.number(4)?,
            )))
        })?,
    )?;

    Ok(m)
}

#[cfg(test)]
mod tests {
    use crate::Script;
    use crate::testing::{catch, headless_context, run};

    fn script() -> Script {
        let s = Script::new().unwrap();
        s.register_capabilities(&headless_context()).unwrap();
        s.load_source(
            "prelude",
            "Vector = require('core.vector'); Rect = require('core.rect')",
        )
        .unwrap();
        s
    }

    fn eval_string(s: &Script, expr: &str) -> String {
        run(s, &format!("out = {expr}"));
        s.get_string("out")
    }

    fn eval_number(s: &Script, expr: &str) -> f64 {
        run(s, &format!("out = {expr}"));
        s.get_string("out").parse().unwrap()
    }

    // ── vector ────────────────────────────────────────────────────────────

    #[test]
    fn tostring_formats_components() {
        let s = script();
        assert_eq!(eval_string(&s, "tostring(Vector.new(1, 2))"), "Vector<x: 1.0, y: 2.0>");
        assert_eq!(eval_string(&s, "tostring(Vector.new(-0.5, 3))"), "Vector<x: -0.5, y: 3.0>");
    }

    #[test]
    fn vector_plus_vector_is_componentwise() {
        let s = script();
        assert_eq!(
            eval_string(&s, "tostring(Vector.new(1, 2) + Vector.new(3, 4))"),
            "Vector<x: 4.0, y: 6.0>"
        );
        assert_eq!(
            eval_string(&s, "tostring(Vector.new(1, 2) - Vector.new(3, 4))"),
            "Vector<x: -2.0, y: -2.0>"
        );
    }

    #[test]
    fn scalar_side_does_not_matter() {
        let s = script();
        let left = eval_string(&s, "tostring(2 - Vector.new(5, 6))");
        let right = eval_string(&s, "tostring(Vector.new(5, 6) - 2)");
        assert_eq!(left, right);
        assert_eq!(left, "Vector<x: 3.0, y: 4.0>");
        assert_eq!(eval_string(&s, "tostring(3 * Vector.new(1, 2))"), "Vector<x: 3.0, y: 6.0>");
    }

    #[test]
    fn divide_by_zero_leaves_vector_unchanged() {
        let s = script();
        assert_eq!(eval_string(&s, "tostring(Vector.new(4, 8) / 0)"), "Vector<x: 4.0, y: 8.0>");
    }

    #[test]
    fn vector_times_vector_is_componentwise() {
        let s = script();
        assert_eq!(
            eval_string(&s, "tostring(Vector.new(2, 3) * Vector.new(4, 5))"),
            "Vector<x: 8.0, y: 15.0>"
        );
    }

    #[test]
    fn invalid_operands_raise() {
        let s = script();
        let msg = catch(&s, "return Vector.new(1, 1) + {}").unwrap();
        assert!(msg.contains("Vector and table"), "{msg}");
        assert!(catch(&s, "return Vector.new(1, 1) * Rect.new(0, 0, 1, 1)").is_some());
    }

    #[test]
    fn module_helpers() {
        let s = script();
        assert_eq!(eval_number(&s, "Vector.magnitude(Vector.new(3, 4))"), 5.0);
        assert_eq!(eval_number(&s, "Vector.distance(Vector.new(0, 0), Vector.new(0, 4))"), 4.0);
        assert_eq!(
            eval_string(&s, "tostring(Vector.lerp(Vector.new(0, 0), Vector.new(10, 20), 0.5))"),
            "Vector<x: 5.0, y: 10.0>"
        );
        assert_eq!(
            eval_string(&s, "tostring(Vector.new(0, 0):lerp(Vector.new(10, 0), 0.25))"),
            "Vector<x: 2.5, y: 0.0>"
        );
        assert_eq!(eval_number(&s, "Vector.new(7, 9):y()"), 9.0);
    }

    #[test]
    fn wrong_argument_type_is_catchable() {
        let s = script();
        let msg = catch(&s, "Vector.new('a', 1)").unwrap();
        assert!(
            msg.contains("bad argument #1 to 'new' (number expected, got string)"),
            "{msg}"
        );
        let msg = catch(&s, "Vector.distance(Vector.new(0, 0), Rect.new(0, 0, 1, 1))").unwrap();
        assert!(msg.contains("Vector expected, got Rect"), "{msg}");
        // The interpreter keeps running after a failed call.
        assert_eq!(eval_number(&s, "Vector.new(1, 2):x()"), 1.0);
    }

    // ── rect ──────────────────────────────────────────────────────────────

    #[test]
    fn overlaps_returns_flag_and_side() {
        let s = script();
        run(
            &s,
            "a = Rect.new(0, 0, 10, 10)
             hit, side = a:overlaps(Rect.new(10, 0, 10, 10))
             side_s = tostring(side)
             miss, none = a:overlaps(Rect.new(50, 50, 1, 1))
             none_s = tostring(none)",
        );
        assert!(s.get_bool("hit", false));
        assert_eq!(s.get_string("side_s"), "Vector<x: -1.0, y: 0.0>");
        assert!(!s.get_bool("miss", true));
        assert_eq!(s.get_string("none_s"), "Vector<x: 0.0, y: 0.0>");
    }

    #[test]
    fn position_setter_mutates_in_place() {
        let s = script();
        run(
            &s,
            "r = Rect.new(0, 0, 10, 10)
             alias = r
             r:position(Vector.new(5, 6))
             moved = tostring(alias)
             pos = tostring(r:position())",
        );
        assert_eq!(s.get_string("moved"), "Rect<x: 5.0, y: 6.0, w: 10.0, h: 10.0>");
        assert_eq!(s.get_string("pos"), "Vector<x: 5.0, y: 6.0>");
    }

    #[test]
    fn accessors_and_center() {
        let s = script();
        assert_eq!(eval_number(&s, "Rect.new(1, 2, 3, 4):w()"), 3.0);
        assert_eq!(
            eval_string(&s, "tostring(Rect.new(0, 0, 10, 20):center())"),
            "Vector<x: 5.0, y: 10.0>"
        );
        assert_eq!(
            eval_string(&s, "tostring(Rect.new(0, 0, 10, 20):dimension())"),
            "Vector<x: 10.0, y: 20.0>"
        );
    }

    #[test]
    fn returned_vectors_are_copies() {
        let s = script();
        run(
            &s,
            "r = Rect.new(1, 1, 2, 2)
             p = r:position()
             p = p + 10
             after = tostring(r)",
        );
        assert_eq!(s.get_string("after"), "Rect<x: 1.0, y: 1.0, w: 2.0, h: 2.0>");
    }
}
