//! Record-literal grammar
//!
//! Catalog files hold JavaScript-style object literals: bare or quoted keys,
//! single-, double- or backtick-quoted strings, trailing commas and comments.
//! Plain JSON is a subset. Values are parsed into `serde_json::Value` so card
//! records decode through serde like any other document.

use crate::catalog::scanner::Span;
use crate::core::error::{BoostError, Result};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, digit1, multispace1, satisfy},
    combinator::{map, map_res, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
    IResult, Parser,
};
use serde_json::{Map, Number, Value};

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("//"), take_while(|c| c != '\n'))).parse(input)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
    recognize((tag("/*"), take_until("*/"), tag("*/"))).parse(input)
}

/// Whitespace and comments
fn trivia(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((multispace1, line_comment, block_comment)))).parse(input)
}

fn quoted(input: &str, quote: char) -> IResult<&str, String> {
    let (mut rest, _) = char::<&str, Error<&str>>(quote).parse(input)?;
    let mut out = String::new();

    loop {
        let mut chars = rest.chars();
        match chars.next() {
            None => return Err(nom::Err::Error(Error::new(rest, ErrorKind::Char))),
            Some(c) if c == quote => return Ok((chars.as_str(), out)),
            Some('\\') => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| nom::Err::Error(Error::new(rest, ErrorKind::Escaped)))?;
                match escaped {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    'b' => out.push('\u{8}'),
                    'f' => out.push('\u{c}'),
                    '0' => out.push('\0'),
                    'u' => {
                        let after = chars.as_str();
                        let (tail, decoded) = unicode_escape(after)?;
                        out.push(decoded);
                        rest = tail;
                        continue;
                    }
                    // Line continuation
                    '\n' => {}
                    other => out.push(other),
                }
                rest = chars.as_str();
            }
            Some(c) => {
                out.push(c);
                rest = chars.as_str();
            }
        }
    }
}

fn hex4(input: &str) -> IResult<&str, u32> {
    map_res(
        recognize((
            satisfy(|c| c.is_ascii_hexdigit()),
            satisfy(|c| c.is_ascii_hexdigit()),
            satisfy(|c| c.is_ascii_hexdigit()),
            satisfy(|c| c.is_ascii_hexdigit()),
        )),
        |digits: &str| u32::from_str_radix(digits, 16),
    )
    .parse(input)
}

/// The part of a `\uXXXX` escape after the `u`, joining surrogate pairs
fn unicode_escape(input: &str) -> IResult<&str, char> {
    let (rest, high) = hex4(input)?;
    if (0xD800..0xDC00).contains(&high) {
        if let Ok((tail, low)) = preceded(tag("\\u"), hex4).parse(rest) {
            if (0xDC00..0xE000).contains(&low) {
                let joined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return Ok((tail, char::from_u32(joined).unwrap_or(char::REPLACEMENT_CHARACTER)));
            }
        }
        return Ok((rest, char::REPLACEMENT_CHARACTER));
    }
    Ok((rest, char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER)))
}

fn double_quoted(input: &str) -> IResult<&str, String> {
    quoted(input, '"')
}

fn single_quoted(input: &str) -> IResult<&str, String> {
    quoted(input, '\'')
}

fn backtick_quoted(input: &str) -> IResult<&str, String> {
    quoted(input, '`')
}

fn string_literal(input: &str) -> IResult<&str, String> {
    alt((double_quoted, single_quoted, backtick_quoted)).parse(input)
}

fn number_value(text: &str) -> std::result::Result<Value, String> {
    let text = text.strip_prefix('+').unwrap_or(text);
    if text.contains(|c| matches!(c, '.' | 'e' | 'E')) {
        let float: f64 = text.parse().map_err(|e| format!("{}", e))?;
        Number::from_f64(float)
            .map(Value::Number)
            .ok_or_else(|| format!("non-finite number {}", text))
    } else {
        let int: i64 = text.parse().map_err(|e| format!("{}", e))?;
        Ok(Value::Number(int.into()))
    }
}

fn number(input: &str) -> IResult<&str, Value> {
    map_res(
        recognize((
            opt(alt((char('-'), char('+')))),
            take_while1(|c: char| c.is_ascii_digit() || c == '.'),
            opt((
                alt((char('e'), char('E'))),
                opt(alt((char('-'), char('+')))),
                digit1,
            )),
        )),
        number_value,
    )
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    ))
    .parse(input)
}

fn key(input: &str) -> IResult<&str, String> {
    alt((
        string_literal,
        map(identifier, str::to_string),
        map(digit1, str::to_string),
    ))
    .parse(input)
}

fn member(input: &str) -> IResult<&str, (String, Value)> {
    separated_pair(key, (trivia, char(':'), trivia), literal_value).parse(input)
}

/// Trailing comma, whitespace and comments before a closing delimiter
fn list_tail(input: &str) -> IResult<&str, ()> {
    value((), (trivia, opt(char(',')), trivia)).parse(input)
}

fn array(input: &str) -> IResult<&str, Value> {
    map(
        delimited(
            char('['),
            terminated(
                separated_list0(
                    preceded(trivia, char(',')),
                    preceded(trivia, literal_value),
                ),
                list_tail,
            ),
            char(']'),
        ),
        Value::Array,
    )
    .parse(input)
}

fn object(input: &str) -> IResult<&str, Value> {
    map(
        delimited(
            char('{'),
            terminated(
                separated_list0(preceded(trivia, char(',')), preceded(trivia, member)),
                list_tail,
            ),
            char('}'),
        ),
        |members| Value::Object(members.into_iter().collect::<Map<String, Value>>()),
    )
    .parse(input)
}

fn literal_value(input: &str) -> IResult<&str, Value> {
    alt((
        object,
        array,
        map(string_literal, Value::String),
        value(Value::Null, alt((tag("null"), tag("undefined")))),
        value(Value::Bool(true), tag("true")),
        value(Value::Bool(false), tag("false")),
        number,
    ))
    .parse(input)
}

fn syntax_error(text: &str, remaining: &str, message: impl Into<String>) -> BoostError {
    BoostError::SyntaxError {
        offset: text.len() - remaining.len(),
        message: message.into(),
    }
}

/// Lift a nom result into the crate error, with offsets relative to `text`
fn lift<'a, T>(text: &'a str, result: IResult<&'a str, T>) -> Result<(&'a str, T)> {
    result.map_err(|err| match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            syntax_error(text, e.input, format!("unexpected input ({:?})", e.code))
        }
        nom::Err::Incomplete(_) => syntax_error(text, "", "unexpected end of input"),
    })
}

/// Parse a complete literal, allowing surrounding whitespace and comments
pub fn parse_literal(text: &str) -> Result<Value> {
    let (rest, parsed) = lift(text, delimited(trivia, literal_value, trivia).parse(text))?;
    if !rest.is_empty() {
        return Err(syntax_error(text, rest, "unexpected trailing input"));
    }
    Ok(parsed)
}

/// Location of one top-level field inside an object literal
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpan {
    pub key: String,
    /// Whether the key was written in quotes
    pub quoted_key: bool,
    /// Offset of the first byte of the key
    pub key_start: usize,
    /// Span of the value text
    pub value_span: Span,
    /// Offset of the comma following the value, if any
    pub comma: Option<usize>,
    pub value: Value,
}

/// Top-level fields of an object literal, with byte positions relative to `text`
///
/// `text` must start with `{`; anything after the matching `}` is ignored.
pub fn object_fields(text: &str) -> Result<Vec<FieldSpan>> {
    let offset = |rest: &str| text.len() - rest.len();
    let (mut rest, _) = lift(text, (char('{'), trivia).parse(text))?;
    let mut fields = Vec::new();

    loop {
        let closing: IResult<&str, char> = char('}').parse(rest);
        if closing.is_ok() {
            return Ok(fields);
        }

        let key_start = offset(rest);
        let quoted_key = rest.starts_with(|c: char| matches!(c, '"' | '\'' | '`'));
        let (after_key, name) = lift(text, key(rest))?;
        let (value_rest, _) = lift(text, (trivia, char(':'), trivia).parse(after_key))?;
        let value_start = offset(value_rest);
        let (after_value, parsed) = lift(text, literal_value(value_rest))?;
        let value_end = offset(after_value);

        let (after_trivia, _) = lift(text, trivia(after_value))?;
        let (after_comma, comma) = lift(text, opt(char(',')).parse(after_trivia))?;
        let comma = comma.map(|_| offset(after_trivia));
        let (next, _) = lift(text, trivia(after_comma))?;

        fields.push(FieldSpan {
            key: name,
            quoted_key,
            key_start,
            value_span: value_start..value_end,
            comma,
            value: parsed,
        });

        if comma.is_none() && !next.starts_with('}') {
            return Err(syntax_error(text, next, "expected ',' or '}' after field"));
        }
        rest = next;
    }
}
