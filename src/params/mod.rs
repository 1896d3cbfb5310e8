//! Parameter frames and values
//!
//! A frame stack is a plain ordered slice of frames, outermost scope first.

mod frame;
mod value;

pub use frame::{select_frame, ParamFrame};
pub use value::ParamValue;
