//! Collection of general utility helpers.

pub mod jwt;
