//! String to scalar conversion.

use std::{fmt::Display, str::FromStr};

use crate::{error::WriteError, shape::ScalarMut};

/// Parses `value` into the scalar behind `destination`, honoring its exact width.
pub(crate) fn write_scalar(destination: ScalarMut<'_>, value: &str) -> Result<(), WriteError> {
    let kind = destination.kind();
    match destination {
        ScalarMut::String(slot) => value.clone_into(slot),
        ScalarMut::I8(slot) => *slot = parse(value, kind)?,
        ScalarMut::I16(slot) => *slot = parse(value, kind)?,
        ScalarMut::I32(slot) => *slot = parse(value, kind)?,
        ScalarMut::I64(slot) => *slot = parse(value, kind)?,
        ScalarMut::I128(slot) => *slot = parse(value, kind)?,
        ScalarMut::Isize(slot) => *slot = parse(value, kind)?,
        ScalarMut::U8(slot) => *slot = parse_unsigned(value, kind)?,
        ScalarMut::U16(slot) => *slot = parse_unsigned(value, kind)?,
        ScalarMut::U32(slot) => *slot = parse_unsigned(value, kind)?,
        ScalarMut::U64(slot) => *slot = parse_unsigned(value, kind)?,
        ScalarMut::U128(slot) => *slot = parse_unsigned(value, kind)?,
        ScalarMut::Usize(slot) => *slot = parse_unsigned(value, kind)?,
        ScalarMut::F32(slot) => {
            let parsed: f32 = parse(value, kind)?;
            check_float_range(parsed.is_infinite(), value, kind)?;
            *slot = parsed;
        }
        ScalarMut::F64(slot) => {
            let parsed: f64 = parse(value, kind)?;
            check_float_range(parsed.is_infinite(), value, kind)?;
            *slot = parsed;
        }
        ScalarMut::Bool(slot) => {
            *slot = match value {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(WriteError::fatal(
                        "cannot read bool param value (must be true or false)",
                    ));
                }
            }
        }
    }
    Ok(())
}

fn parse<T>(value: &str, kind: &str) -> Result<T, WriteError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|error: T::Err| {
        WriteError::fatal(format!("cannot read {kind} param value {value:?}: {error}"))
    })
}

/// Unsigned kinds take no sign at all, not even `+`.
fn parse_unsigned<T>(value: &str, kind: &str) -> Result<T, WriteError>
where
    T: FromStr,
    T::Err: Display,
{
    if value.starts_with('+') {
        return Err(WriteError::fatal(format!(
            "cannot read {kind} param value {value:?}: invalid digit found in string"
        )));
    }
    parse(value, kind)
}

/// Float parsing saturates to infinity instead of failing on overflow.
fn check_float_range(is_infinite: bool, value: &str, kind: &str) -> Result<(), WriteError> {
    if is_infinite && !names_infinity(value) {
        return Err(WriteError::fatal(format!(
            "cannot read {kind} param value {value:?}: number out of range"
        )));
    }
    Ok(())
}

fn names_infinity(value: &str) -> bool {
    let unsigned = value.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
