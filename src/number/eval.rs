//! Pratt evaluation of numeric expressions.
//!
//! Precedence climbing over the number sub-tokenizer with two dispatch
//! tables indexed by token kind: `nud` handlers produce a value from a
//! prefix position, `led` handlers extend a value with an infix or
//! postfix operator. Integers promote to floats when mixed; bitwise
//! operators and modulo insist on integers.

use crate::error::ErrorKind;
use crate::token::{TokenKind, TOKEN_KIND_COUNT};

use super::tokenizer::{NumToken, NumTokenizer, NumValue};

/// An intermediate expression value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Num {
    Int(i64),
    Float(f64),
}

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_WEEK: i64 = 604_800;

// Operator precedence:
// 3   w  d  h  m  s
// 2   *  /  %  &
// 1   +  -  |  ^
// 0   everything else
#[rustfmt::skip]
static PRECEDENCE: [u8; TOKEN_KIND_COUNT] = [
    0, // Unknown
    0, // Error
    0, // IntegerVal
    0, // DecimalVal
    1, // Plus
    1, // Minus
    2, // Mul
    2, // Div
    1, // Xor
    2, // And
    1, // Or
    1, // Inverse
    2, // Mod
    0, // OpenParen
    0, // CloseParen
    0, // OpenBrace
    0, // CloseBrace
    0, // OpenSquare
    0, // CloseSquare
    0, // Colon
    0, // Quoteless
    0, // DoubleQuoted
    0, // SingleQuoted
    0, // Multiline
    0, // Comma
    3, // Weeks
    3, // Days
    3, // Hours
    3, // Minutes
    3, // Seconds
];

const HIGHEST_PRECEDENCE: u8 = 3;

fn precedence(kind: TokenKind) -> u8 {
    PRECEDENCE[kind as usize]
}

type NudFn = fn(&mut NumTokenizer<'_>, NumToken) -> Option<Num>;
type LedFn = fn(&mut NumTokenizer<'_>, NumToken, Num) -> Option<Num>;

#[rustfmt::skip]
static NUD_TABLE: [Option<NudFn>; TOKEN_KIND_COUNT] = [
    None,                 // Unknown
    None,                 // Error
    Some(nud_value),      // IntegerVal
    Some(nud_value),      // DecimalVal
    Some(nud_plus),       // Plus
    Some(nud_minus),      // Minus
    None,                 // Mul
    None,                 // Div
    None,                 // Xor
    None,                 // And
    None,                 // Or
    Some(nud_inverse),    // Inverse
    None,                 // Mod
    Some(nud_open_paren), // OpenParen
    None,                 // CloseParen
    None,                 // OpenBrace
    None,                 // CloseBrace
    None,                 // OpenSquare
    None,                 // CloseSquare
    None,                 // Colon
    None,                 // Quoteless
    None,                 // DoubleQuoted
    None,                 // SingleQuoted
    None,                 // Multiline
    None,                 // Comma
    None,                 // Weeks
    None,                 // Days
    None,                 // Hours
    None,                 // Minutes
    None,                 // Seconds
];

#[rustfmt::skip]
static LED_TABLE: [Option<LedFn>; TOKEN_KIND_COUNT] = [
    None,              // Unknown
    None,              // Error
    None,              // IntegerVal
    None,              // DecimalVal
    Some(led_plus),    // Plus
    Some(led_minus),   // Minus
    Some(led_mul),     // Mul
    Some(led_div),     // Div
    Some(led_xor),     // Xor
    Some(led_and),     // And
    Some(led_or),      // Or
    None,              // Inverse
    Some(led_mod),     // Mod
    None,              // OpenParen
    None,              // CloseParen
    None,              // OpenBrace
    None,              // CloseBrace
    None,              // OpenSquare
    None,              // CloseSquare
    None,              // Colon
    None,              // Quoteless
    None,              // DoubleQuoted
    None,              // SingleQuoted
    None,              // Multiline
    None,              // Comma
    Some(led_weeks),   // Weeks
    Some(led_days),    // Days
    Some(led_hours),   // Hours
    Some(led_minutes), // Minutes
    Some(led_seconds), // Seconds
];

/// Evaluates the expression in `input` to a float, or reports the error
/// and its byte offset within `input`.
pub(crate) fn eval_number_expression(input: &[u8]) -> Result<f64, (usize, ErrorKind)> {
    if let Some(pos) = unbalanced_close_paren(input) {
        return Err((pos, ErrorKind::UnopenedParenthesis));
    }
    let mut tk = NumTokenizer::new(input);
    tk.next_token();
    let res = expression(&mut tk, 0);
    let t = tk.token();
    if t.kind != TokenKind::Error {
        // leftover tokens after a complete expression
        return Err((t.pos, ErrorKind::InvalidNumericExpression));
    }
    let terminal = match t.value {
        NumValue::Err(kind) => kind,
        _ => ErrorKind::InvalidNumericExpression,
    };
    if terminal != ErrorKind::EndOfInput {
        return Err((t.pos, terminal));
    }
    match res {
        Some(Num::Int(i)) => Ok(i as f64),
        Some(Num::Float(x)) => Ok(x),
        None => Err((t.pos, ErrorKind::EndOfInput)),
    }
}

/// Index of a `)` with no matching `(`, checked up front so the error
/// lands on the offending byte.
fn unbalanced_close_paren(v: &[u8]) -> Option<usize> {
    let mut open = 0usize;
    for (i, &b) in v.iter().enumerate() {
        if b == b'(' {
            open += 1;
        } else if b == b')' {
            if open == 0 {
                return Some(i);
            }
            open -= 1;
        }
    }
    None
}

/// Evaluates the expression at the current token. On return the current
/// token is the first one after the evaluated expression. `None` means
/// the error token holds the cause (possibly plain end of input).
fn expression(tk: &mut NumTokenizer<'_>, rbp: u8) -> Option<Num> {
    if tk.done() {
        return None;
    }
    let mut t = tk.token();
    tk.next_token();
    let mut left = nud(tk, t);
    while let Some(l) = left {
        if rbp >= precedence(tk.token().kind) {
            return Some(l);
        }
        t = tk.token();
        tk.next_token();
        left = led(tk, t, l);
    }
    None
}

fn nud(tk: &mut NumTokenizer<'_>, t: NumToken) -> Option<Num> {
    match NUD_TABLE[t.kind as usize] {
        Some(f) => f(tk, t),
        None => {
            tk.set_error_at(ErrorKind::InvalidNumericExpression, t.pos);
            None
        }
    }
}

fn led(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    match LED_TABLE[t.kind as usize] {
        Some(f) => f(tk, t, left),
        None => {
            tk.set_error_at(ErrorKind::InvalidNumericExpression, t.pos);
            None
        }
    }
}

/// Re-anchors a bare end-of-input on the operator that was waiting for
/// an operand.
fn end_as_invalid(tk: &mut NumTokenizer<'_>, pos: usize) {
    if tk.error_kind() == Some(ErrorKind::EndOfInput) {
        tk.set_error_at(ErrorKind::InvalidNumericExpression, pos);
    }
}

/// Casts both operands to float unless both are integers.
fn normalize(a: Num, b: Num) -> (Num, Num) {
    match (a, b) {
        (Num::Int(x), Num::Float(y)) => (Num::Float(x as f64), Num::Float(y)),
        (Num::Float(x), Num::Int(y)) => (Num::Float(x), Num::Float(y as f64)),
        pair => pair,
    }
}

fn nud_value(_tk: &mut NumTokenizer<'_>, t: NumToken) -> Option<Num> {
    match t.value {
        NumValue::Int(i) => Some(Num::Int(i)),
        NumValue::Float(x) => Some(Num::Float(x)),
        _ => None,
    }
}

fn nud_plus(tk: &mut NumTokenizer<'_>, t: NumToken) -> Option<Num> {
    let right = expression(tk, HIGHEST_PRECEDENCE + 1);
    if right.is_none() {
        end_as_invalid(tk, t.pos);
    }
    right
}

fn nud_minus(tk: &mut NumTokenizer<'_>, t: NumToken) -> Option<Num> {
    match expression(tk, HIGHEST_PRECEDENCE + 1) {
        None => {
            end_as_invalid(tk, t.pos);
            None
        }
        Some(Num::Int(i)) => Some(Num::Int(i.wrapping_neg())),
        Some(Num::Float(x)) => Some(Num::Float(-x)),
    }
}

fn nud_inverse(tk: &mut NumTokenizer<'_>, t: NumToken) -> Option<Num> {
    match expression(tk, HIGHEST_PRECEDENCE + 1) {
        None => {
            end_as_invalid(tk, t.pos);
            None
        }
        Some(Num::Int(i)) => Some(Num::Int(!i)),
        Some(Num::Float(_)) => {
            tk.set_error_at(ErrorKind::OperandMustBeInteger, t.pos);
            None
        }
    }
}

fn nud_open_paren(tk: &mut NumTokenizer<'_>, t: NumToken) -> Option<Num> {
    let right = expression(tk, precedence(TokenKind::OpenParen));
    let Some(right) = right else {
        end_as_invalid(tk, t.pos);
        return None;
    };
    if tk.token().kind != TokenKind::CloseParen {
        tk.set_error_at(ErrorKind::UnclosedParenthesis, t.pos);
        return None;
    }
    tk.next_token();
    Some(right)
}

fn led_plus(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    let Some(right) = expression(tk, precedence(TokenKind::Plus)) else {
        end_as_invalid(tk, t.pos);
        return None;
    };
    Some(match normalize(left, right) {
        (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_add(b)),
        (Num::Float(a), Num::Float(b)) => Num::Float(a + b),
        pair => pair.0,
    })
}

fn led_minus(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    let Some(right) = expression(tk, precedence(TokenKind::Minus)) else {
        end_as_invalid(tk, t.pos);
        return None;
    };
    Some(match normalize(left, right) {
        (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_sub(b)),
        (Num::Float(a), Num::Float(b)) => Num::Float(a - b),
        pair => pair.0,
    })
}

fn led_mul(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    let Some(right) = expression(tk, precedence(TokenKind::Mul)) else {
        end_as_invalid(tk, t.pos);
        return None;
    };
    Some(match normalize(left, right) {
        (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_mul(b)),
        (Num::Float(a), Num::Float(b)) => Num::Float(a * b),
        pair => pair.0,
    })
}

fn led_div(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    let Some(right) = expression(tk, precedence(TokenKind::Div)) else {
        end_as_invalid(tk, t.pos);
        return None;
    };
    match normalize(left, right) {
        (Num::Int(a), Num::Int(b)) => {
            if b == 0 {
                tk.set_error_at(ErrorKind::DivisionByZero, t.pos);
                return None;
            }
            Some(Num::Int(a.wrapping_div(b)))
        }
        (Num::Float(a), Num::Float(b)) => {
            if b == 0.0 {
                tk.set_error_at(ErrorKind::DivisionByZero, t.pos);
                return None;
            }
            Some(Num::Float(a / b))
        }
        pair => Some(pair.0),
    }
}

fn led_mod(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    let Some(right) = expression(tk, precedence(TokenKind::Mod)) else {
        end_as_invalid(tk, t.pos);
        return None;
    };
    match normalize(left, right) {
        (Num::Int(a), Num::Int(b)) => {
            if b == 0 {
                tk.set_error_at(ErrorKind::DivisionByZero, t.pos);
                return None;
            }
            Some(Num::Int(a.wrapping_rem(b)))
        }
        _ => {
            tk.set_error_at(ErrorKind::OperandsMustBeInteger, t.pos);
            None
        }
    }
}

fn led_and(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    let Some(right) = expression(tk, precedence(TokenKind::And)) else {
        end_as_invalid(tk, t.pos);
        return None;
    };
    match normalize(left, right) {
        (Num::Int(a), Num::Int(b)) => Some(Num::Int(a & b)),
        _ => {
            tk.set_error_at(ErrorKind::OperandsMustBeInteger, t.pos);
            None
        }
    }
}

fn led_or(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    let Some(right) = expression(tk, precedence(TokenKind::Or)) else {
        end_as_invalid(tk, t.pos);
        return None;
    };
    match normalize(left, right) {
        (Num::Int(a), Num::Int(b)) => Some(Num::Int(a | b)),
        _ => {
            tk.set_error_at(ErrorKind::OperandsMustBeInteger, t.pos);
            None
        }
    }
}

fn led_xor(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    let Some(right) = expression(tk, precedence(TokenKind::Xor)) else {
        end_as_invalid(tk, t.pos);
        return None;
    };
    match normalize(left, right) {
        (Num::Int(a), Num::Int(b)) => Some(Num::Int(a ^ b)),
        _ => {
            tk.set_error_at(ErrorKind::OperandsMustBeInteger, t.pos);
            None
        }
    }
}

fn led_weeks(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    led_time_unit(tk, t, left, SECONDS_PER_WEEK, precedence(TokenKind::Weeks))
}

fn led_days(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    led_time_unit(tk, t, left, SECONDS_PER_DAY, precedence(TokenKind::Days))
}

fn led_hours(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    led_time_unit(tk, t, left, SECONDS_PER_HOUR, precedence(TokenKind::Hours))
}

fn led_minutes(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    led_time_unit(tk, t, left, SECONDS_PER_MINUTE, precedence(TokenKind::Minutes))
}

fn led_seconds(tk: &mut NumTokenizer<'_>, t: NumToken, left: Num) -> Option<Num> {
    led_time_unit(tk, t, left, 1, precedence(TokenKind::Seconds))
}

/// A duration suffix scales its left operand to seconds and may absorb
/// a following subexpression: `1h 2m 2s` is `1h + (2m + 2s)`.
fn led_time_unit(
    tk: &mut NumTokenizer<'_>,
    t: NumToken,
    left: Num,
    scale: i64,
    unit_prec: u8,
) -> Option<Num> {
    let scaled = match left {
        Num::Int(i) => Num::Int(i.wrapping_mul(scale)),
        Num::Float(x) => Num::Float(x * scale as f64),
    };
    // Nothing to absorb before a closing parenthesis or at stream end.
    if tk.done() || tk.token().kind == TokenKind::CloseParen {
        return Some(scaled);
    }
    // Recurse one level below the suffix precedence: sibling unit
    // suffixes carry equal precedence and must bind inside the
    // recursion for the left-to-right composition to hold.
    let Some(right) = expression(tk, unit_prec - 1) else {
        end_as_invalid(tk, t.pos);
        return None;
    };
    Some(match normalize(scaled, right) {
        (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_add(b)),
        (Num::Float(a), Num::Float(b)) => Num::Float(a + b),
        pair => pair.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> Result<f64, (usize, ErrorKind)> {
        eval_number_expression(input.as_bytes())
    }

    #[test]
    fn literals_and_arithmetic() {
        assert_eq!(eval("10"), Ok(10.0));
        assert_eq!(eval("2 + 5"), Ok(7.0));
        assert_eq!(eval("2 + 5.3"), Ok(7.3));
        assert_eq!(eval("1 + 2 * 3"), Ok(7.0));
        assert_eq!(eval("1 + 2 * 3 / 2"), Ok(4.0)); // integer division
        assert_eq!(eval("1 + 2 * (3 / 2)"), Ok(3.0));
        assert_eq!(eval("3*1024*1024"), Ok((3 * 1024 * 1024) as f64));
        assert_eq!(eval("10. * 3."), Ok(30.0));
        assert_eq!(eval("10. / 2. "), Ok(5.0));
        assert_eq!(eval("10. - 2. "), Ok(8.0));
    }

    #[test]
    fn unary_operators() {
        assert_eq!(eval("1 + -2"), Ok(-1.0));
        assert_eq!(eval("1 + +2"), Ok(3.0));
        assert_eq!(eval("1 + -(10 + 2)"), Ok(-11.0));
        assert_eq!(eval("1 + -(10 - (2 + 3))"), Ok(-4.0));
        assert_eq!(eval("10 - +5"), Ok(5.0));
        assert_eq!(eval("10. + - 2. "), Ok(8.0));
    }

    #[test]
    fn bitwise_and_modulo() {
        assert_eq!(eval("10 % 3"), Ok(1.0));
        assert_eq!(eval("10 ^ 3"), Ok(9.0));
        assert_eq!(eval("2. + (0x3 | 0x4)"), Ok(9.0));
        assert_eq!(eval("2. + (0x7 & ~0x2)"), Ok(7.0));
    }

    #[test]
    fn type_discipline_errors() {
        assert_eq!(eval("1 + ~7.3"), Err((4, ErrorKind::OperandMustBeInteger)));
        assert_eq!(eval("10. % 3"), Err((4, ErrorKind::OperandsMustBeInteger)));
        assert_eq!(eval("10. & 3"), Err((4, ErrorKind::OperandsMustBeInteger)));
        assert_eq!(eval("10. | 3"), Err((4, ErrorKind::OperandsMustBeInteger)));
        assert_eq!(eval("10. ^ 3"), Err((4, ErrorKind::OperandsMustBeInteger)));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval("10. / 0"), Err((4, ErrorKind::DivisionByZero)));
        assert_eq!(eval("10 % 0"), Err((3, ErrorKind::DivisionByZero)));
        assert_eq!(eval("10 / 0"), Err((3, ErrorKind::DivisionByZero)));
    }

    #[test]
    fn dangling_operators() {
        assert_eq!(eval(""), Err((0, ErrorKind::EndOfInput)));
        assert_eq!(eval(" "), Err((1, ErrorKind::EndOfInput)));
        assert_eq!(eval("a"), Err((0, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("+"), Err((0, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("~"), Err((0, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("& "), Err((0, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("10 + "), Err((3, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("10 * "), Err((3, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("10 - "), Err((3, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("10 / "), Err((3, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("10 % "), Err((3, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("10. & "), Err((4, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("10 ** "), Err((4, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("10. ~ "), Err((4, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("10. + -"), Err((6, ErrorKind::InvalidNumericExpression)));
    }

    #[test]
    fn residue_after_expression() {
        assert_eq!(eval("5 a"), Err((2, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("6 7"), Err((2, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("1.3 5h"), Err((4, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("1 + 1 2_ "), Err((6, ErrorKind::InvalidIntegerNumber)));
    }

    #[test]
    fn parentheses() {
        assert_eq!(eval("(2 + 3)*2"), Ok(10.0));
        assert_eq!(eval("1 + -(10 + 2"), Err((5, ErrorKind::UnclosedParenthesis)));
        assert_eq!(eval("( "), Err((0, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval(") "), Err((0, ErrorKind::UnopenedParenthesis)));
        assert_eq!(eval("10 +) "), Err((4, ErrorKind::UnopenedParenthesis)));
        assert_eq!(eval("(10 + 3)) "), Err((8, ErrorKind::UnopenedParenthesis)));
        assert_eq!(eval("10) "), Err((2, ErrorKind::UnopenedParenthesis)));
    }

    #[test]
    fn bad_literals_surface_their_kind() {
        assert_eq!(eval("10 & 0b_1_ "), Err((5, ErrorKind::InvalidBinaryNumber)));
        assert_eq!(eval("~0b_1_ "), Err((1, ErrorKind::InvalidBinaryNumber)));
        assert_eq!(eval("(0b_1_) "), Err((1, ErrorKind::InvalidBinaryNumber)));
        assert_eq!(eval("10. / 5__2. "), Err((6, ErrorKind::InvalidIntegerNumber)));
        assert_eq!(eval("1 + 1 2_ "), Err((6, ErrorKind::InvalidIntegerNumber)));
    }

    #[test]
    fn duration_suffixes() {
        assert_eq!(eval("2m"), Ok(120.0));
        assert_eq!(eval("2m 15"), Ok(135.0));
        assert_eq!(eval("1h"), Ok(3600.0));
        assert_eq!(eval("1h 10"), Ok(3610.0));
        assert_eq!(eval("1d"), Ok(86400.0));
        assert_eq!(eval("1d 10"), Ok(86410.0));
        assert_eq!(eval("1w"), Ok(604800.0));
        assert_eq!(eval("1w 10"), Ok(604810.0));
        assert_eq!(eval("1 s"), Ok(1.0));
        assert_eq!(eval("1s 10"), Ok(11.0));
        assert_eq!(eval("2m a"), Err((3, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("2h a"), Err((3, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("2d a"), Err((3, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("2w a"), Err((3, ErrorKind::InvalidNumericExpression)));
        assert_eq!(eval("2s a"), Err((3, ErrorKind::InvalidNumericExpression)));
    }

    #[test]
    fn duration_composition() {
        assert_eq!(eval("1h 2m 2s"), Ok(3722.0));
        assert_eq!(eval("1h 2m 2s + 4"), Ok(3726.0));
        assert_eq!(eval("1h 2m 2s - 2"), Ok(3720.0));
        assert_eq!(eval("1w 2d"), Ok(777600.0));
        assert_eq!(eval("(1m) * 2"), Ok(120.0));
        assert_eq!(eval("(1h 2m 2s) * 2"), Ok(7444.0));
        assert_eq!(eval("(1w) * 2"), Ok(1209600.0));
        assert_eq!(eval("(1d) * 2"), Ok(172800.0));
        assert_eq!(eval("(1h) * 2"), Ok(7200.0));
        assert_eq!(eval("1.3 + 1h"), Ok(3601.3));
        assert_eq!(
            eval("1h 2m 2s * 3"),
            Err((9, ErrorKind::InvalidNumericExpression))
        );
    }

    #[test]
    fn unary_minus_binds_tighter_than_suffix_composition() {
        assert_eq!(eval("-(1h 2m 2s)"), Ok(-3722.0));
        assert_eq!(eval("-1h 2m 2s"), Ok(-3478.0));
    }

    #[test]
    fn datetimes_in_expressions() {
        assert_eq!(eval("2020-12-23T15:40:05"), Ok(1608738005.0));
        assert_eq!(eval("2020-12-23T15:40:05 + 2m"), Ok(1608738125.0));
        assert_eq!(
            eval("2020-12-23T25:40:05"),
            Err((0, ErrorKind::InvalidISODateTime))
        );
        assert_eq!(
            eval("2020-12-23T15:40:60"),
            Err((0, ErrorKind::InvalidISODateTime))
        );
    }
}
