//! Internal utilities for the octavelab plugin workspace.
//!
//! This crate provides low-level helpers shared between the core library and
//! the demo plugins. Everything here is compile-time safe (`const fn` where
//! possible) and has zero external dependencies.
//!
//! # Contents
//!
//! - [`FourCharCode`] - four-character component identity codes
//! - [`fourcc!`] - compile-time validated FourCC construction

pub mod fourcc;

pub use fourcc::FourCharCode;
