//! Common test utilities for j1939-dl integration tests

#[allow(dead_code)]
pub mod fixtures;
#[allow(dead_code)]
pub mod surface;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use surface::*;
