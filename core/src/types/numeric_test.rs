use super::{NumericType, TypeError, promote};
use NumericType::*;

#[test]
fn test_promote_is_commutative() {
    for a in NumericType::ALL {
        for b in NumericType::ALL {
            assert_eq!(promote(a, b), promote(b, a), "promote({a}, {b})");
        }
    }
}

#[test]
fn test_promote_identical_types() {
    for ty in NumericType::ALL {
        assert_eq!(promote(ty, ty), ty);
    }
}

#[test]
fn test_promote_floats_win() {
    for ty in NumericType::ALL {
        assert_eq!(promote(F64, ty), F64);
    }
    assert_eq!(promote(F32, I64), F32);
    assert_eq!(promote(F32, U64), F32);
    assert_eq!(promote(F32, F64), F64);
}

#[test]
fn test_promote_integer_table() {
    assert_eq!(promote(U64, I32), U64);
    assert_eq!(promote(U64, I64), U64);
    assert_eq!(promote(U64, U32), U64);
    assert_eq!(promote(I64, I32), I64);
    assert_eq!(promote(I64, U32), I64);
    // Not a rank order: mixed 32-bit signedness goes unsigned.
    assert_eq!(promote(I32, U32), U32);
}

#[test]
fn test_require_integer() {
    assert!(I32.require_integer("&").is_ok());
    assert!(U64.require_integer("~").is_ok());
    assert_eq!(
        F32.require_integer("&"),
        Err(TypeError::FloatOperand { op: "&", ty: F32 })
    );
    assert_eq!(
        F64.require_integer("|").unwrap_err().to_string(),
        "cannot apply `|` to double"
    );
}

#[test]
fn test_widths() {
    assert_eq!(I32.size(), 4);
    assert_eq!(U64.size(), 8);
    assert_eq!(F32.bits(), 32);
    assert!(U32.is_unsigned());
    assert!(!I64.is_unsigned());
}
