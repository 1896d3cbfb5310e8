//! Text helpers shared by the interpolator

mod html;

pub use html::*;
