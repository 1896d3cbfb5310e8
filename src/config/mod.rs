//! Configuration module

mod interp;

pub use interp::InterpolatorConfig;
