//! param-interp: `{{expr}}` placeholder interpolation
//!
//! This crate substitutes placeholders in HTML and plain-text templates
//! using an ordered stack of parameter frames. Expressions are limited to
//! parameter references, literals and arithmetic, and failures never
//! propagate to the caller: HTML output marks the failed placeholder
//! inline, unicode output is absent altogether.
//!
//! ```
//! use param_interp::{process_html, process_unicode, ParamFrame};
//!
//! let mut frame = ParamFrame::new();
//! frame.set("a", "1");
//! frame.set("b", "2");
//!
//! assert_eq!(process_html("a+b = {{a + b}}", &[frame.clone()]), "a+b = 3");
//! assert_eq!(process_unicode("{{c}}", &[frame]), None);
//! ```

pub mod config;
pub mod expr;
pub mod helpers;
pub mod interp;
pub mod params;

pub use config::InterpolatorConfig;
pub use expr::{Expr, ExprError};
pub use interp::{
    get_params_from_string, process_html, process_unicode, InterpolationError, Interpolator,
};
pub use params::{ParamFrame, ParamValue};
