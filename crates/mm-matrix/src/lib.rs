//! `mm-matrix` - Dense generic matrices with three multiplication strategies.
//!
//! This crate provides:
//! - A row-major `Matrix<T>` over any `Element` type (integers, f32, f64, f16)
//! - Block addressing primitives (copy/add/subtract/multiply on square blocks)
//! - A `MultiplyStrategy` trait with `Textbook`, `BlockRecursive` and
//!   `Strassen` implementations
//! - `assemble`/`split` between a matrix and its four quadrants

pub mod assemble;
pub mod block;
pub mod config;
pub mod display;
pub mod element;
pub mod error;
pub mod matrix;
pub mod strategy;

// Re-export primary types at the crate root for convenience.
pub use assemble::{assemble, split};
pub use block::{BlockSpec, Offset, Quadrant};
pub use config::RecursionConfig;
pub use display::{ElementFormat, MatrixDisplay};
pub use element::Element;
pub use error::{MatrixError, Result};
pub use matrix::Matrix;
pub use strategy::{BlockRecursive, MultiplyStrategy, OpCounts, Strassen, Textbook};
