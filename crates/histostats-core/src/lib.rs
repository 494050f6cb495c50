//! Core types for histostats
//!
//! This crate provides the pieces every other histostats crate leans on:
//!
//! - [`Error`] / [`Result`]: the unified error type
//! - [`StatsType`] / [`EffectSizeType`]: closed enums for the user-facing
//!   option tokens, parsed once at the boundary
//! - [`math`]: descriptive statistics over `&[f64]`
//! - [`format`]: number formatting for labels and expressions
//!
//! # Example
//!
//! ```rust
//! use histostats_core::{math, format::format_percent, StatsType};
//!
//! let family: StatsType = "np".parse().unwrap();
//! assert_eq!(family, StatsType::Nonparametric);
//!
//! let data = [1.0, 2.0, 2.0, 3.0, 4.0, 100.0];
//! assert_eq!(math::median(&data).unwrap(), 2.5);
//! assert_eq!(format_percent(0.125, 1), "12.5%");
//! ```

pub mod error;
pub mod family;
pub mod format;
pub mod math;

pub use error::{check_conf_level, check_sample_size, Error, Result};
pub use family::{EffectSizeType, StatsType};
