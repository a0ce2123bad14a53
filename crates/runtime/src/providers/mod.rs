//! Command provider implementations.

pub mod ai;
