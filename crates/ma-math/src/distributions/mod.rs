//! Probability distributions.
//!
//! Only the standard normal is needed: its CDF drives the Tauchen
//! construction and its inverse turns uniform deviates into Gaussian
//! innovations.

pub mod normal;

pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf};
