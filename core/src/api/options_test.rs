use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::*;
use crate::types::NumericType;

#[test]
fn test_default_capacities() {
    let caps = Capacities::default();
    assert_eq!(caps.of(MemoryClass::Int), 10_000);
    assert_eq!(caps.of(MemoryClass::Storage), 10_000);
    assert_eq!(caps.of(MemoryClass::M), 12);
}

#[test]
fn test_clamp() {
    let caps = Capacities::uniform(4);
    assert_eq!(caps.clamp(MemoryClass::Uint, 3), 3);
    assert_eq!(caps.clamp(MemoryClass::Uint, 4), 0);
    assert_eq!(caps.clamp(MemoryClass::Uint, u64::MAX), 0);
    assert_eq!(caps.clamp(MemoryClass::M, 11), 11);
    assert_eq!(caps.clamp(MemoryClass::M, 12), 0);
}

#[test]
fn test_memory_class_types() {
    for ty in NumericType::ALL {
        assert_eq!(MemoryClass::register(ty).element_type(), ty);
    }
    assert_eq!(MemoryClass::Storage.element_type(), NumericType::U32);
    assert_eq!(MemoryClass::Ulong.prefix(), "ul");
}

#[test]
fn test_stop_signals() {
    assert!(!NeverStop.should_stop());

    let flag = Arc::new(AtomicBool::new(false));
    assert!(!flag.should_stop());
    flag.store(true, Ordering::Relaxed);
    assert!(flag.should_stop());
    assert!((&*flag).should_stop());
}

#[test]
fn test_default_rotate_right_is_legacy() {
    assert_eq!(ExecutionOptions::default().rotate_right, RotateRightMode::ShiftLeft);
}
