//! `mm-fill` - Seeded uniform element streams for filling matrices.
//!
//! A [`FillStream`] owns a seeded generator and a draw count. Every fill
//! advances the one generator, so successive matrices never share content.

pub mod config;
pub mod error;
pub mod stream;
pub mod uniform;

pub use config::FillConfig;
pub use error::{FillError, Result};
pub use stream::FillStream;
pub use uniform::UniformElement;
