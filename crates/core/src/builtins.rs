//! Built-in operator tables
//!
//! Installed into the registry in table order: named operators, unary
//! functions, binary functions, ternary functions, constants. A later
//! table wins if a token appears twice.

use crate::error::CalcError;
use crate::operator::{Arity, Operator};
use crate::random::{DEFAULT_MAX_RAND, uniform_below};
use crate::special;
use crate::stack::Stack;
use crate::stats::Welford;
use rand::RngCore;
use rand::rngs::OsRng;

pub const FT_PER_M: f64 = 3.280839895;
pub const J_PER_FT_LB: f64 = 1.3558179483314004;
pub const L_PER_GAL: f64 = 3.785411784;
pub const KG_PER_LB: f64 = 0.45359237;
pub const W_PER_HP: f64 = 745.699872;

/// Speed of light in m/s
pub const C: f64 = 299_792_458.0;

const YDS_PER_MILE: f64 = 1760.0;
const SECS_PER_HOUR: f64 = 3600.0;

// =============================================================================
// Named operators
// =============================================================================

pub const NAMED: &[Operator] = &[
    Operator::binary("+", "addition", |a, b| a + b),
    Operator::binary("-", "subtraction", |a, b| a - b),
    Operator::binary("*", "multiplication", |a, b| a * b),
    Operator::binary("/", "division", |a, b| a / b),
    Operator::binary("<<", "left shift, x * 2^y", |a, b| a * 2f64.powf(b)),
    Operator::binary(">>", "right shift, x / 2^y", |a, b| a / 2f64.powf(b)),
    Operator::unary("!", "factorial (x * gamma(x))", |x| x * special::gamma(x)),
    Operator::unary("++", "increment", |x| x + 1.0),
    Operator::unary("--", "decrement", |x| x - 1.0),
    Operator::unary("neg", "negate the top value", |x| -x),
    Operator::unary("abs", "absolute value", f64::abs),
    Operator::unary("pow10", "10^x for integer x", special::pow10),
    Operator::unary(
        "signbit",
        "1 if the top value is negative (including -0), else 0",
        |x| if x.is_sign_negative() { 1.0 } else { 0.0 },
    ),
    Operator::unary("ilogb", "binary exponent of the top value", |x| {
        f64::from(special::ilogb(x))
    }),
    Operator::custom(
        "isinf",
        "1 if the top value is +Inf (top is kept)",
        Arity::Peek,
        is_inf,
    ),
    Operator::custom(
        "isninf",
        "1 if the top value is -Inf (top is kept)",
        Arity::Peek,
        is_ninf,
    ),
    Operator::custom(
        "isnan",
        "1 if the top value is NaN (top is kept)",
        Arity::Peek,
        is_nan,
    ),
    Operator::binary(
        "jn",
        "order-n Bessel function of the first kind (n x jn)",
        special::jn,
    ),
    Operator::binary(
        "yn",
        "order-n Bessel function of the second kind (n x yn)",
        special::yn,
    ),
    Operator::binary(
        "mil",
        "given yards to target and target speed in mph, target speed in milliradians per second",
        mph_to_mils,
    ),
    Operator::binary(
        "mph",
        "given yards to target and target speed in milliradians per second, target speed in mph",
        mils_to_mph,
    ),
    Operator::custom("sum", "sum of the entire stack", Arity::Whole, sum),
    Operator::custom(
        "avg",
        "average (mean) of the entire stack",
        Arity::Whole,
        avg,
    ),
    Operator::custom(
        "sd",
        "standard deviation of the entire stack",
        Arity::Whole,
        stddev,
    ),
    Operator::custom(
        "var",
        "variance of the entire stack",
        Arity::Whole,
        variance,
    ),
    Operator::custom("max", "maximum value on the stack", Arity::Whole, max),
    Operator::custom("min", "minimum value on the stack", Arity::Whole, min),
    Operator::unary("lor", "lorentz factor for a speed in m/s", lorentz),
    Operator::unary("cf", "celsius to fahrenheit", |x| x * 9.0 / 5.0 + 32.0),
    Operator::unary("fc", "fahrenheit to celsius", |x| (x - 32.0) * 5.0 / 9.0),
    Operator::unary("fm", "feet to meters", |x| x / FT_PER_M),
    Operator::unary("mf", "meters to feet", |x| x * FT_PER_M),
    Operator::unary("fj", "foot-pounds to joules", |x| x * J_PER_FT_LB),
    Operator::unary("jf", "joules to foot-pounds", |x| x / J_PER_FT_LB),
    Operator::unary("gl", "gallons to liters", |x| x * L_PER_GAL),
    Operator::unary("lg", "liters to gallons", |x| x / L_PER_GAL),
    Operator::unary("pk", "pounds to kilograms", |x| x * KG_PER_LB),
    Operator::unary("kp", "kilograms to pounds", |x| x / KG_PER_LB),
    Operator::unary("hw", "horsepower to watts", |x| x * W_PER_HP),
    Operator::unary("wh", "watts to horsepower", |x| x / W_PER_HP),
    Operator::unary(
        "pas",
        "pasteurization time in seconds at a temperature in fahrenheit",
        pasteurization_secs,
    ),
    Operator::unary(
        "pr",
        "atmospheric pressure in inHg at an altitude in feet",
        pressure_inhg,
    ),
    Operator::custom(
        "r",
        "random integer from 0 to 32767",
        Arity::Fixed(0),
        random,
    ),
    Operator::custom(
        "rn",
        "random integer from 0 to x",
        Arity::Fixed(1),
        random_below,
    ),
    Operator::custom(
        "frexp",
        "split x into a fraction in [0.5, 1) and a power of two",
        Arity::Fixed(1),
        frexp,
    ),
    Operator::custom("sw", "swap the top two values", Arity::Fixed(2), swap),
    Operator::custom("swa", "swap the top two values", Arity::Fixed(2), swap),
    Operator::custom("swap", "swap the top two values", Arity::Fixed(2), swap),
    Operator::custom(
        "sort",
        "sort the entire stack ascending",
        Arity::Whole,
        sort,
    ),
    Operator::custom("p", "pop and discard the top value", Arity::Fixed(1), pop),
    Operator::custom("pop", "pop and discard the top value", Arity::Fixed(1), pop),
    Operator::custom("noop", "do nothing", Arity::Fixed(0), noop),
];

// =============================================================================
// Generated families
// =============================================================================

pub const UNARY: &[Operator] = &[
    Operator::unary("acos", "arccosine, in radians", f64::acos),
    Operator::unary("acosh", "inverse hyperbolic cosine", f64::acosh),
    Operator::unary("asin", "arcsine, in radians", f64::asin),
    Operator::unary("asinh", "inverse hyperbolic sine", f64::asinh),
    Operator::unary("atan", "arctangent, in radians", f64::atan),
    Operator::unary("cbrt", "cube root", f64::cbrt),
    Operator::unary("ceil", "smallest integer >= x", f64::ceil),
    Operator::unary("cos", "cosine", f64::cos),
    Operator::unary("cosh", "hyperbolic cosine", f64::cosh),
    Operator::unary("erf", "error function", special::erf),
    Operator::unary("erfc", "complementary error function", special::erfc),
    Operator::unary(
        "erfcinv",
        "inverse complementary error function",
        special::erfcinv,
    ),
    Operator::unary("erfinv", "inverse error function", special::erfinv),
    Operator::unary("exp", "e^x", f64::exp),
    Operator::unary("exp2", "2^x", f64::exp2),
    Operator::unary("expm1", "e^x - 1, accurate near zero", f64::exp_m1),
    Operator::unary("floor", "largest integer <= x", f64::floor),
    Operator::unary("gamma", "gamma function", special::gamma),
    Operator::unary(
        "j0",
        "order-zero Bessel function of the first kind",
        special::j0,
    ),
    Operator::unary(
        "j1",
        "order-one Bessel function of the first kind",
        special::j1,
    ),
    Operator::unary("log", "natural logarithm", f64::ln),
    Operator::unary("log10", "decimal logarithm", f64::log10),
    Operator::unary("log1p", "ln(1 + x), accurate near zero", f64::ln_1p),
    Operator::unary("log2", "binary logarithm", f64::log2),
    Operator::unary("logb", "binary exponent", special::logb),
    Operator::unary("round", "nearest integer, half away from zero", f64::round),
    Operator::unary(
        "roundtoeven",
        "nearest integer, half to even",
        f64::round_ties_even,
    ),
    Operator::unary("sin", "sine", f64::sin),
    Operator::unary("sinh", "hyperbolic sine", f64::sinh),
    Operator::unary("sqrt", "square root", f64::sqrt),
    Operator::unary("tan", "tangent", f64::tan),
    Operator::unary("tanh", "hyperbolic tangent", f64::tanh),
    Operator::unary("trunc", "integer part of x", f64::trunc),
    Operator::unary(
        "y0",
        "order-zero Bessel function of the second kind",
        special::y0,
    ),
    Operator::unary(
        "y1",
        "order-one Bessel function of the second kind",
        special::y1,
    ),
];

pub const BINARY: &[Operator] = &[
    Operator::binary("%", "floating-point remainder of x/y", special::fmod),
    Operator::binary("**", "x^y", f64::powf),
    Operator::binary("^", "x^y", f64::powf),
    Operator::binary(
        "atan2",
        "arctangent of x/y, using both signs for the quadrant",
        f64::atan2,
    ),
    Operator::binary("dim", "maximum of x-y or 0", special::dim),
    Operator::binary(
        "hypot",
        "sqrt(x*x + y*y) without undue overflow",
        f64::hypot,
    ),
    Operator::binary("mod", "floating-point remainder of x/y", special::fmod),
    Operator::binary(
        "nextafter",
        "next representable value after x towards y",
        special::nextafter,
    ),
    Operator::binary("pow", "x^y", f64::powf),
    Operator::binary("remainder", "IEEE 754 remainder of x/y", special::remainder),
];

pub const TERNARY: &[Operator] = &[Operator::ternary(
    "fma",
    "fused multiply-add, x*y + z",
    special::fma,
)];

pub const CONSTANTS: &[Operator] = &[
    Operator::constant("c", "speed of light in m/s", C),
    Operator::constant("e", "euler's number", std::f64::consts::E),
    Operator::constant("inf", "positive infinity", f64::INFINITY),
    Operator::constant("ln10", "natural log of 10", std::f64::consts::LN_10),
    Operator::constant("ln2", "natural log of 2", std::f64::consts::LN_2),
    Operator::constant("log2e", "1 / ln2", std::f64::consts::LOG2_E),
    Operator::constant("log10e", "1 / ln10", std::f64::consts::LOG10_E),
    Operator::constant("nan", "not a number", f64::NAN),
    Operator::constant("ninf", "negative infinity", f64::NEG_INFINITY),
    Operator::constant("phi", "golden ratio", 1.618_033_988_749_895),
    Operator::constant(
        "pi",
        "ratio of a circle's circumference to its diameter",
        std::f64::consts::PI,
    ),
    Operator::constant("sqrt2", "square root of 2", std::f64::consts::SQRT_2),
    Operator::constant("sqrte", "square root of e", 1.648_721_270_700_128_2),
    Operator::constant(
        "sqrtphi",
        "square root of the golden ratio",
        1.272_019_649_514_069,
    ),
    Operator::constant("sqrtpi", "square root of pi", 1.772_453_850_905_516),
];

// =============================================================================
// Operator bodies
// =============================================================================

fn predicate(stack: &Stack, test: fn(f64) -> bool) -> Result<Vec<f64>, CalcError> {
    Ok(vec![if test(stack.top()) { 1.0 } else { 0.0 }])
}

fn is_inf(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    predicate(stack, |x| x == f64::INFINITY)
}

fn is_ninf(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    predicate(stack, |x| x == f64::NEG_INFINITY)
}

fn is_nan(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    predicate(stack, f64::is_nan)
}

fn mph_to_mils(distance_yds: f64, speed_mph: f64) -> f64 {
    let speed_yps = speed_mph * YDS_PER_MILE / SECS_PER_HOUR;
    1000.0 * (speed_yps / distance_yds).atan()
}

fn mils_to_mph(distance_yds: f64, mils_per_s: f64) -> f64 {
    let speed_yps = distance_yds * (mils_per_s / 1000.0).tan();
    speed_yps * SECS_PER_HOUR / YDS_PER_MILE
}

fn lorentz(v: f64) -> f64 {
    1.0 / (1.0 - (v * v) / (C * C)).sqrt()
}

/// Curve fit of pasteurization time against temperature
fn pasteurization_secs(temp_f: f64) -> f64 {
    (temp_f * -0.231).exp() * 1.23e15 * 60.0
}

/// Barometric formula, altitude in feet to pressure in inHg
fn pressure_inhg(altitude_ft: f64) -> f64 {
    29.921_252_4 * (1.0 - 1e-5 * 2.25577 * (altitude_ft / FT_PER_M)).powf(5.25588)
}

fn aggregate(stack: &Stack) -> Welford {
    stack.copy().into_iter().collect()
}

fn sum(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    Ok(vec![aggregate(stack).sum()])
}

fn avg(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    Ok(vec![aggregate(stack).mean()])
}

fn stddev(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    Ok(vec![aggregate(stack).stddev()])
}

fn variance(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    Ok(vec![aggregate(stack).variance()])
}

fn max(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    Ok(vec![aggregate(stack).max()])
}

fn min(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    Ok(vec![aggregate(stack).min()])
}

fn random(_stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    random_from(&mut OsRng)
}

fn random_below(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    random_below_from(stack, &mut OsRng)
}

fn random_from<R: RngCore>(rng: &mut R) -> Result<Vec<f64>, CalcError> {
    let n = uniform_below(rng, DEFAULT_MAX_RAND)?;
    Ok(vec![n as f64])
}

fn random_below_from<R: RngCore>(stack: &mut Stack, rng: &mut R) -> Result<Vec<f64>, CalcError> {
    let bound = stack.pop()?.trunc();
    if bound.is_nan() || bound < 1.0 {
        return Err(CalcError::InvalidOperand(format!(
            "rn: bound must be at least 1, got {}",
            bound
        )));
    }
    let n = uniform_below(rng, bound as u64)?;
    Ok(vec![n as f64])
}

fn frexp(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    let (fraction, exp) = special::frexp(stack.pop()?);
    Ok(vec![fraction, f64::from(exp)])
}

fn swap(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    stack.swap()?;
    Ok(Vec::new())
}

fn sort(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    stack.sort();
    Ok(Vec::new())
}

fn pop(stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    stack.pop()?;
    Ok(Vec::new())
}

fn noop(_stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
    Ok(Vec::new())
}
