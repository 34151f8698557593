//! Demo driver for the `square-matrix` crate.

pub mod config;
pub mod demo;
