//! URL handling module for Favicon Scout
//!
//! This module provides scheme normalization, scheme validation and base URL
//! computation used to resolve root-relative icon links.

mod normalize;

pub use normalize::{base_url, is_valid, normalize};
