//! Geometric verification module
//!
//! A secondary, stricter confidence signal on top of embedding similarity:
//! an external SIFT service counts geometrically-consistent local feature
//! matches between two photographs. A failed or skipped verification never
//! blocks the similarity workflow; it degrades to "verification unavailable".

pub mod client;

pub use client::SiftClient;
