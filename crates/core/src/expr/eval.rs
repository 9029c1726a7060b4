//! Tree-walking evaluation of parsed expressions

use super::parser::{BinaryOp, Expr, UnaryOp};

/// A runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Array(Vec<f64>),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Array(_) => "array",
        }
    }

    fn number(self) -> Result<f64, String> {
        match self {
            Value::Number(n) => Ok(n),
            other => Err(format!("expected number, found {}", other.type_name())),
        }
    }

    fn boolean(self) -> Result<bool, String> {
        match self {
            Value::Bool(b) => Ok(b),
            other => Err(format!("expected bool, found {}", other.type_name())),
        }
    }

    fn array(self) -> Result<Vec<f64>, String> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(format!("expected array, found {}", other.type_name())),
        }
    }
}

/// Names visible to an expression
pub struct Env<'a> {
    /// Stack contents, top first
    pub stack: &'a [f64],
}

impl Env<'_> {
    fn lookup(&self, name: &str) -> Result<Value, String> {
        match name {
            "s" => Ok(Value::Array(self.stack.to_vec())),
            _ => Err(format!("unknown name '{}'", name)),
        }
    }
}

pub fn eval(expr: &Expr, env: &Env) -> Result<Value, String> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Var(name) => env.lookup(name),
        Expr::Array(items) => {
            let values = items
                .iter()
                .map(|item| eval(item, env)?.number())
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(values))
        }
        Expr::Unary(op, operand) => {
            let value = eval(operand, env)?;
            match op {
                UnaryOp::Neg => Ok(Value::Number(-value.number()?)),
                UnaryOp::Plus => Ok(Value::Number(value.number()?)),
                UnaryOp::Not => Ok(Value::Bool(!value.boolean()?)),
            }
        }
        Expr::Binary(BinaryOp::And, lhs, rhs) => {
            if !eval(lhs, env)?.boolean()? {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(eval(rhs, env)?.boolean()?))
        }
        Expr::Binary(BinaryOp::Or, lhs, rhs) => {
            if eval(lhs, env)?.boolean()? {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(eval(rhs, env)?.boolean()?))
        }
        Expr::Binary(op, lhs, rhs) => binary(*op, eval(lhs, env)?, eval(rhs, env)?),
        Expr::Index(target, index) => {
            let items = eval(target, env)?.array()?;
            let index = eval(index, env)?.number()?;
            element(&items, index).map(Value::Number)
        }
        Expr::Call(name, args) => {
            let args = args
                .iter()
                .map(|arg| eval(arg, env))
                .collect::<Result<Vec<_>, _>>()?;
            call(name, args)
        }
        Expr::Conditional(cond, then, otherwise) => {
            if eval(cond, env)?.boolean()? {
                eval(then, env)
            } else {
                eval(otherwise, env)
            }
        }
    }
}

fn binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, String> {
    // Equality is the only comparison defined on bools
    if let (BinaryOp::Eq | BinaryOp::Ne, Value::Bool(a), Value::Bool(b)) = (op, &lhs, &rhs) {
        let equal = a == b;
        return Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }));
    }

    let a = lhs.number()?;
    let b = rhs.number()?;
    let value = match op {
        BinaryOp::Add => Value::Number(a + b),
        BinaryOp::Sub => Value::Number(a - b),
        BinaryOp::Mul => Value::Number(a * b),
        BinaryOp::Div => Value::Number(a / b),
        BinaryOp::Rem => Value::Number(a % b),
        BinaryOp::Pow => Value::Number(a.powf(b)),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::Ne => Value::Bool(a != b),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::Le => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::Ge => Value::Bool(a >= b),
        BinaryOp::And | BinaryOp::Or => {
            return Err("expected bool, found number".to_string());
        }
    };
    Ok(value)
}

/// Element at `index`; negative indexes count back from the end
fn element(items: &[f64], index: f64) -> Result<f64, String> {
    if index.fract() != 0.0 || !index.is_finite() {
        return Err(format!("index {} is not an integer", index));
    }
    let len = items.len() as i64;
    let mut i = index as i64;
    if i < 0 {
        i += len;
    }
    if i < 0 || i >= len {
        return Err(format!("index {} out of range (len {})", index, len));
    }
    Ok(items[i as usize])
}

fn call(name: &str, args: Vec<Value>) -> Result<Value, String> {
    match name {
        "abs" => unary_number(name, args, f64::abs),
        "ceil" => unary_number(name, args, f64::ceil),
        "floor" => unary_number(name, args, f64::floor),
        "round" => unary_number(name, args, f64::round),
        "int" => unary_number(name, args, f64::trunc),
        "float" => unary_number(name, args, |x| x),
        "len" => {
            let items = single(name, args)?.array()?;
            Ok(Value::Number(items.len() as f64))
        }
        "sum" => {
            let items = single(name, args)?.array()?;
            Ok(Value::Number(items.iter().sum()))
        }
        "mean" => {
            let items = non_empty(name, single(name, args)?.array()?)?;
            Ok(Value::Number(
                items.iter().sum::<f64>() / items.len() as f64,
            ))
        }
        "median" => {
            let mut items = non_empty(name, single(name, args)?.array()?)?;
            items.sort_by(f64::total_cmp);
            let mid = items.len() / 2;
            let median = if items.len() % 2 == 0 {
                (items[mid - 1] + items[mid]) / 2.0
            } else {
                items[mid]
            };
            Ok(Value::Number(median))
        }
        "first" => {
            let items = non_empty(name, single(name, args)?.array()?)?;
            Ok(Value::Number(items[0]))
        }
        "last" => {
            let items = non_empty(name, single(name, args)?.array()?)?;
            Ok(Value::Number(items[items.len() - 1]))
        }
        "max" => extremum(name, args, f64::max),
        "min" => extremum(name, args, f64::min),
        _ => Err(format!("unknown function '{}'", name)),
    }
}

fn single(name: &str, mut args: Vec<Value>) -> Result<Value, String> {
    if args.len() != 1 {
        return Err(format!(
            "{}() takes 1 argument, got {}",
            name,
            args.len()
        ));
    }
    Ok(args.remove(0))
}

fn non_empty(name: &str, items: Vec<f64>) -> Result<Vec<f64>, String> {
    if items.is_empty() {
        return Err(format!("{}() of empty array", name));
    }
    Ok(items)
}

fn unary_number(name: &str, args: Vec<Value>, f: fn(f64) -> f64) -> Result<Value, String> {
    Ok(Value::Number(f(single(name, args)?.number()?)))
}

/// `max`/`min` over either a single array or a list of numbers
fn extremum(name: &str, args: Vec<Value>, pick: fn(f64, f64) -> f64) -> Result<Value, String> {
    let values = match args.as_slice() {
        [Value::Array(items)] => items.clone(),
        _ => args
            .into_iter()
            .map(Value::number)
            .collect::<Result<Vec<_>, _>>()?,
    };
    let values = non_empty(name, values)?;
    Ok(Value::Number(values.into_iter().reduce(pick).unwrap_or(f64::NAN)))
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse;
    use super::*;

    fn run(source: &str, stack: &[f64]) -> Result<Value, String> {
        eval(&parse(source)?, &Env { stack })
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(run("2+3*4", &[]), Ok(Value::Number(14.0)));
        assert_eq!(run("(2+3)*4", &[]), Ok(Value::Number(20.0)));
        assert_eq!(run("2**10", &[]), Ok(Value::Number(1024.0)));
        assert_eq!(run("-2^2", &[]), Ok(Value::Number(-4.0)));
        assert_eq!(run("7 % 3", &[]), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_long_flat_chain() {
        let chain = "1+".repeat(500) + "1";
        assert_eq!(run(&chain, &[]), Ok(Value::Number(501.0)));
    }

    #[test]
    fn test_stack_view_is_top_first() {
        let view = [3.0, 2.0, 1.0];
        assert_eq!(run("s[0]", &view), Ok(Value::Number(3.0)));
        assert_eq!(run("s[-1]", &view), Ok(Value::Number(1.0)));
        assert_eq!(run("len(s)", &view), Ok(Value::Number(3.0)));
        assert_eq!(run("s[0] - s[1]", &view), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_index_out_of_range() {
        assert!(run("s[0]", &[]).is_err());
        assert!(run("s[3]", &[1.0, 2.0, 3.0]).is_err());
        assert!(run("s[0.5]", &[1.0]).is_err());
    }

    #[test]
    fn test_booleans_and_conditional() {
        assert_eq!(run("1 < 2", &[]), Ok(Value::Bool(true)));
        assert_eq!(run("true && !false", &[]), Ok(Value::Bool(true)));
        assert_eq!(run("false or 1 == 1", &[]), Ok(Value::Bool(true)));
        assert_eq!(run("1 > 2 ? 10 : 20", &[]), Ok(Value::Number(20.0)));
        assert!(run("1 ? 2 : 3", &[]).is_err());
    }

    #[test]
    fn test_short_circuit_skips_rhs() {
        assert_eq!(run("false && s[9] > 0", &[]), Ok(Value::Bool(false)));
        assert_eq!(run("true || s[9] > 0", &[]), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_functions() {
        let view = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(run("sum(s)", &view), Ok(Value::Number(10.0)));
        assert_eq!(run("mean(s)", &view), Ok(Value::Number(2.5)));
        assert_eq!(run("median(s)", &view), Ok(Value::Number(2.5)));
        assert_eq!(run("max(s)", &view), Ok(Value::Number(4.0)));
        assert_eq!(run("min(3, -1, 2)", &[]), Ok(Value::Number(-1.0)));
        assert_eq!(run("first(s) + last(s)", &view), Ok(Value::Number(6.0)));
        assert_eq!(run("round(2.5)", &[]), Ok(Value::Number(3.0)));
        assert_eq!(run("int(-2.7)", &[]), Ok(Value::Number(-2.0)));
        assert_eq!(run("abs(-3)", &[]), Ok(Value::Number(3.0)));
    }

    #[test]
    fn test_unknown_names_fail() {
        assert!(run("pi", &[]).is_err());
        assert!(run("sw", &[]).is_err());
        assert!(run("sqrt(4)", &[]).is_err());
    }

    #[test]
    fn test_type_errors() {
        assert!(run("true + 1", &[]).is_err());
        assert!(run("-s", &[1.0]).is_err());
        assert!(run("len(3)", &[]).is_err());
        assert!(run("mean(s)", &[]).is_err());
    }
}
