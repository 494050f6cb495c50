//! Declarative histogram figures for histostats
//!
//! Figures are values assembled from components with `+`, in the manner of
//! a layered grammar of graphics:
//!
//! - [`BinLayer`], [`ReferenceLine`], [`NormalCurve`]: geometric layers
//! - [`SecondaryAxis`], [`Guides`], [`Labels`]: axes, legends and text
//! - [`Theme`]: non-data appearance
//!
//! Any type implementing [`Component`] can be added, which is how callers
//! inject their own adjustments. Several figures combine into a
//! [`CompositeFigure`] with [`compose`], and both render to SVG.
//!
//! # Example
//!
//! ```rust
//! use histostats_plot::{Aesthetics, BinLayer, Figure, Labels, SecondaryAxis};
//!
//! let data = [1.0, 2.0, 2.0, 3.0, 4.0, 100.0];
//! let figure = Figure::new()
//!     + BinLayer::new(&data, 40.0, Aesthetics::bins()).unwrap()
//!     + SecondaryAxis::proportion(8, 1)
//!     + Labels::new().x("x").y("count");
//!
//! let svg = figure.to_svg(640, 480).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod figure;
pub mod grid;
pub mod guide;
pub mod layer;
pub mod render;
pub mod style;
pub mod theme;

pub use figure::{Component, Figure};
pub use grid::{compose, Annotation, CompositeFigure, GridLayout, TagLevels};
pub use guide::{Guides, Labels, SecondaryAxis};
pub use layer::{BinLayer, NormalCurve, ReferenceLine};
pub use style::{Aesthetics, Color, LineType};
pub use theme::Theme;

pub use histostats_core::Result;
