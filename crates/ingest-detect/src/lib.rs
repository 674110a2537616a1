//! Normalization and content-signature detection.
//!
//! Stages:
//! 1. Normalizer: null-byte and line-ending cleanup
//! 2. SignatureDetector: structural, distributional and stability layers

pub mod distribution;
pub mod markers;
pub mod normalizer;
pub mod signature;

pub use normalizer::Normalizer;
pub use signature::SignatureDetector;
