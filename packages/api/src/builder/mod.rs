//! Tunnel builder API modules

pub mod auth;
pub mod core;

pub use core::*;
