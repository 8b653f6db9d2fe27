//! Integration tests for Layer 0: Foundation
//!
//! Tests for errors, spatial math, and argument values.

mod errors;
mod math;
mod values;
