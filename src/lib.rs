//! safescan - URL safety classification service
//!
//! Classifies a URL as safe or malicious, returning a confidence score and
//! a human-readable explanation. Two operating modes:
//!
//! 1. A trained random-forest classifier (JSON artifacts loaded at startup)
//!    over 33 lexical URL features
//! 2. A deterministic heuristic fallback when no model is loaded or the
//!    artifacts fail to load
//!
//! The pipeline is total: any input string yields a structurally valid
//! `ClassificationResult`, never a fault.
//!
//! # Example
//!
//! ```
//! use safescan::pipeline::{HeuristicEngine, UrlClassifierService};
//!
//! let service = UrlClassifierService::without_classifier(HeuristicEngine::default());
//! let result = service.classify("google.com");
//!
//! assert!(result.is_safe);
//! println!("Confidence: {:.2}", result.confidence);
//! ```

pub mod api;
pub mod model;
pub mod pipeline;
pub mod utils;

pub use model::{load_classifier, ClassifierAdapter, ModelError};
pub use pipeline::{ClassificationResult, HeuristicConfig, HeuristicEngine, UrlClassifierService};
