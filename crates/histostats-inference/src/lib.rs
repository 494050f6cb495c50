//! One-sample inference for histostats
//!
//! Four families of location test share one request type and one result
//! type. The figure builders talk to them only through [`OneSampleEngine`],
//! so a caller can substitute another engine (or a recording mock in tests).
//!
//! - [`parametric`]: Student's t-test with Hedges' g / Cohen's d
//! - [`nonparametric`]: Wilcoxon signed-rank test with rank-biserial r
//! - [`robust`]: Tukey-McLaughlin trimmed-mean test
//! - [`bayes`]: JZS Bayes factor and posterior of the standardised effect
//! - [`centrality`]: the matching location estimate for reference lines
//!
//! # Example
//!
//! ```rust
//! use histostats_inference::{OneSampleEngine, OneSampleRequest, StatsEngine};
//! use histostats_core::StatsType;
//!
//! let data = [3.1, 4.7, 2.2, 5.9, 4.4, 3.8, 5.1, 4.0];
//! let request = OneSampleRequest::new(&data, "x").with_test_value(3.0);
//!
//! let result = StatsEngine::new().one_sample(&request).unwrap();
//! assert!(result.expression.to_string().starts_with("t_Student(7)"));
//!
//! let bayes = StatsEngine::new()
//!     .one_sample(&request.with_stats_type(StatsType::Bayes))
//!     .unwrap();
//! assert!(bayes.bayes_factor.is_some());
//! ```

pub mod bayes;
pub mod centrality;
pub mod engine;
pub mod expression;
pub mod nonparametric;
pub mod parametric;
pub mod robust;
pub mod traits;
pub mod types;

pub use centrality::{centrality, Centrality};
pub use engine::StatsEngine;
pub use expression::{Expression, Symbol, Term};
pub use traits::{OneSampleEngine, OneSampleRequest};
pub use types::{ConfidenceInterval, EffectSize, EffectSizeKind, StatsResult};
