//! Minimal-width integer selection from declared bounds.

use crate::generator::{
  ast::RustPrimitive,
  errors::{BoundKind, ResolveError, ResolveResult},
  schema::ScalarSchema,
};

/// Bounds of an integer schema after exclusivity has been folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerBounds {
  pub minimum: Option<i64>,
  pub maximum: Option<i64>,
}

impl IntegerBounds {
  pub fn from_schema(schema: &ScalarSchema) -> ResolveResult<Self> {
    let minimum = match schema.minimum {
      Some(min) if schema.exclusive_minimum => Some(
        min
          .checked_add(1)
          .ok_or_else(|| ResolveError::invalid_bound(BoundKind::Minimum, min))?,
      ),
      other => other,
    };
    let maximum = match schema.maximum {
      Some(max) if schema.exclusive_maximum => Some(
        max
          .checked_sub(1)
          .ok_or_else(|| ResolveError::invalid_bound(BoundKind::Maximum, max))?,
      ),
      other => other,
    };
    Ok(Self { minimum, maximum })
  }

  pub fn is_unsigned(&self) -> bool {
    self.minimum.is_some_and(|min| min >= 0)
  }
}

/// Bits needed to store `bound`. Absent bounds need none.
///
/// Signed counts include the sign bit and use the two's-complement range, so
/// `-128` and `127` both need 8 bits.
pub fn required_bits(bound: Option<i64>, unsigned: bool, which: BoundKind) -> ResolveResult<u32> {
  let Some(bound) = bound else {
    return Ok(0);
  };

  if unsigned {
    let magnitude = u64::try_from(bound).map_err(|_| ResolveError::invalid_bound(which, bound))?;
    return Ok(65 - (magnitude >> 1).leading_zeros());
  }

  let magnitude = if bound < 0 { -(bound + 1) } else { bound };
  Ok(65 - magnitude.unsigned_abs().leading_zeros())
}

/// Chooses the integer type for a schema.
///
/// `pointer_sized` controls whether the architecture-sized fallback is
/// `isize`/`usize` or the fixed 64-bit types.
pub fn integer_type(schema: &ScalarSchema, pointer_sized: bool) -> ResolveResult<RustPrimitive> {
  let bounds = IntegerBounds::from_schema(schema)?;
  let unsigned = bounds.is_unsigned();
  let min_bits = required_bits(bounds.minimum, unsigned, BoundKind::Minimum)?;
  let max_bits = required_bits(bounds.maximum, unsigned, BoundKind::Maximum)?;

  if let Some(primitive) = schema.format.as_deref().and_then(|f| format_width(f, unsigned)) {
    return Ok(primitive);
  }

  let primitive = if max_bits == 0 && min_bits <= 16 {
    match (unsigned, pointer_sized) {
      (true, true) => RustPrimitive::Usize,
      (false, true) => RustPrimitive::Isize,
      (true, false) => RustPrimitive::U64,
      (false, false) => RustPrimitive::I64,
    }
  } else {
    let bits = min_bits.max(max_bits);
    if unsigned {
      RustPrimitive::unsigned(bits)
    } else {
      RustPrimitive::signed(bits)
    }
  };

  Ok(primitive)
}

fn format_width(format: &str, unsigned: bool) -> Option<RustPrimitive> {
  let (bits, forced_unsigned) = match format {
    "int8" => (8, false),
    "int16" => (16, false),
    "int32" => (32, false),
    "int64" => (64, false),
    "uint8" => (8, true),
    "uint16" => (16, true),
    "uint32" => (32, true),
    "uint64" => (64, true),
    _ => return None,
  };
  Some(if unsigned || forced_unsigned {
    RustPrimitive::unsigned(bits)
  } else {
    RustPrimitive::signed(bits)
  })
}
