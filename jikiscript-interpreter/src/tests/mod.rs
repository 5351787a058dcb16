//! End-to-end tests driving the interpreter through its public API

pub mod test_native_bridge;
pub mod test_test_harness;
