//! Placeholder interpolation
//!
//! Scans templates for `{{expr}}` placeholders and substitutes their values.
//! A placeholder runs from `{{` to the first following `}}` and may not
//! contain `}`, so `{{a{{b}}}}` yields the (malformed) body `a{{b` followed
//! by literal `}}`.
//!
//! The two output modes fail differently:
//! - HTML: each failed placeholder becomes an inline error tag, the rest of
//!   the template is still rendered.
//! - Unicode: any failed placeholder fails the whole template.

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::convert::Infallible;
use thiserror::Error;

use crate::config::InterpolatorConfig;
use crate::expr::{self, Expr, ExprError};
use crate::helpers::{html_escape, html_unescape};
use crate::params::{ParamFrame, ParamValue};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{([^}]*)\}\}").unwrap();
}

/// A placeholder that could not be substituted
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Cannot interpolate {{{{{placeholder}}}}}: {source}")]
pub struct InterpolationError {
    /// Placeholder body, without the braces
    pub placeholder: String,
    #[source]
    pub source: ExprError,
}

/// Template interpolator
#[derive(Debug, Clone, Default)]
pub struct Interpolator {
    config: InterpolatorConfig,
}

impl Interpolator {
    pub fn new(config: InterpolatorConfig) -> Self {
        Self { config }
    }

    /// Interpolate an HTML template. Never fails: placeholders that cannot
    /// be evaluated are replaced by the error tag, values are HTML-escaped.
    pub fn process_html(&self, template: &str, frames: &[ParamFrame]) -> String {
        let marker = self.config.error_marker();
        let result: Result<String, Infallible> = substitute(template, |body| {
            let source = self.decode(body);
            Ok(match evaluate_source(&source, frames) {
                Ok(value) => html_escape(&value.to_string()),
                Err(e) => {
                    tracing::debug!("Placeholder {{{{{}}}}} failed: {}", body, e);
                    marker.clone()
                }
            })
        });

        match result {
            Ok(output) => output,
            Err(never) => match never {},
        }
    }

    /// Interpolate a plain-text template, or `None` if any placeholder fails
    pub fn process_unicode(&self, template: &str, frames: &[ParamFrame]) -> Option<String> {
        self.try_process_unicode(template, frames)
            .map_err(|e| tracing::debug!("{}", e))
            .ok()
    }

    /// Like [`Interpolator::process_unicode`], reporting the first failing placeholder
    pub fn try_process_unicode(
        &self,
        template: &str,
        frames: &[ParamFrame],
    ) -> Result<String, InterpolationError> {
        substitute(template, |body| {
            evaluate_source(body, frames)
                .map(|value| value.to_string())
                .map_err(|source| InterpolationError {
                    placeholder: body.to_string(),
                    source,
                })
        })
    }

    /// Distinct parameter names referenced by the template's placeholders,
    /// in order of first appearance. Placeholders that do not parse are skipped.
    pub fn get_params_from_string(&self, template: &str) -> Vec<String> {
        let mut names = IndexSet::new();

        for caps in PLACEHOLDER.captures_iter(template) {
            let body = self.decode(&caps[1]);
            match Expr::parse(&body) {
                Ok(expr) => names.extend(expr.params()),
                Err(e) => tracing::debug!("Skipping placeholder {{{{{}}}}}: {}", body, e),
            }
        }

        names.into_iter().collect()
    }

    fn decode(&self, body: &str) -> String {
        if self.config.decode_entities {
            html_unescape(body)
        } else {
            body.to_string()
        }
    }
}

fn evaluate_source(source: &str, frames: &[ParamFrame]) -> Result<ParamValue, ExprError> {
    let expr = Expr::parse(source)?;
    expr::evaluate(&expr, frames)
}

/// Replace every placeholder with `render(body)`, copying other text verbatim
fn substitute<E, F>(template: &str, mut render: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        output.push_str(&template[last..whole.start()]);
        output.push_str(&render(body(&caps))?);
        last = whole.end();
    }

    output.push_str(&template[last..]);
    Ok(output)
}

fn body<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1).map(|m| m.as_str()).unwrap_or_default()
}

/// Interpolate an HTML template with the default configuration
pub fn process_html(template: &str, frames: &[ParamFrame]) -> String {
    Interpolator::default().process_html(template, frames)
}

/// Interpolate a plain-text template with the default configuration
pub fn process_unicode(template: &str, frames: &[ParamFrame]) -> Option<String> {
    Interpolator::default().process_unicode(template, frames)
}

/// Parameter names referenced by a template, with the default configuration
pub fn get_params_from_string(template: &str) -> Vec<String> {
    Interpolator::default().get_params_from_string(template)
}
