//! Expression evaluation against parameter frames

use super::{BinaryOp, Expr, ExprError};
use crate::params::{select_frame, ParamFrame, ParamValue};

/// Evaluate `expr` against an ordered frame stack.
///
/// The first frame that defines every referenced name is used; names are
/// never resolved across frames.
pub fn evaluate(expr: &Expr, frames: &[ParamFrame]) -> Result<ParamValue, ExprError> {
    let names = expr.params();
    if names.is_empty() {
        return expr.evaluate(&ParamFrame::new());
    }

    match select_frame(frames, &names) {
        Some(frame) => expr.evaluate(frame),
        None => Err(ExprError::UnresolvedReference(missing_names(frames, names))),
    }
}

/// Names no frame defines, or all of them when each is defined somewhere
/// but never together in one frame.
fn missing_names(frames: &[ParamFrame], names: Vec<String>) -> Vec<String> {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| !frames.iter().any(|f| f.contains(name)))
        .cloned()
        .collect();

    if missing.is_empty() {
        names
    } else {
        missing
    }
}

impl Expr {
    /// Evaluate against a single frame
    pub fn evaluate(&self, frame: &ParamFrame) -> Result<ParamValue, ExprError> {
        match self {
            Expr::Number(n) => Ok(ParamValue::Number(*n)),
            Expr::Str(s) => Ok(ParamValue::String(s.clone())),
            Expr::Ident(name) => frame
                .get(name)
                .cloned()
                .ok_or_else(|| ExprError::UnresolvedReference(vec![name.clone()])),
            Expr::Neg(inner) => {
                let n = inner.evaluate(frame)?.to_number('-')?;
                Ok(ParamValue::Number(-n))
            }
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.evaluate(frame)?.to_number(op.symbol())?;
                let r = rhs.evaluate(frame)?.to_number(op.symbol())?;
                op.apply(l, r).map(ParamValue::Number)
            }
        }
    }
}

impl BinaryOp {
    fn apply(&self, l: f64, r: f64) -> Result<f64, ExprError> {
        let result = match self {
            BinaryOp::Add => l + r,
            BinaryOp::Sub => l - r,
            BinaryOp::Mul => l * r,
            BinaryOp::Div => {
                if r == 0.0 {
                    return Err(ExprError::Arithmetic("division by zero".to_string()));
                }
                l / r
            }
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(ExprError::Arithmetic(format!(
                "{} {} {} overflows",
                l,
                self.symbol(),
                r
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(pairs: &[(&str, &str)]) -> ParamFrame {
        let mut frame = ParamFrame::new();
        for (k, v) in pairs {
            frame.set(k, *v);
        }
        frame
    }

    fn eval(source: &str, frames: &[ParamFrame]) -> Result<ParamValue, ExprError> {
        evaluate(&Expr::parse(source).unwrap(), frames)
    }

    #[test]
    fn test_identifier_keeps_string() {
        let frames = [frame(&[("a", "b")])];
        assert_eq!(eval("a", &frames).unwrap(), ParamValue::from("b"));
    }

    #[test]
    fn test_numeric_addition_of_strings() {
        let frames = [frame(&[("a", "1"), ("b", "2")])];
        assert_eq!(eval("a+b", &frames).unwrap().to_string(), "3");
    }

    #[test]
    fn test_type_mismatch() {
        let frames = [frame(&[("a", "1"), ("b", "hello")])];
        assert_eq!(
            eval("a + b", &frames).unwrap_err(),
            ExprError::TypeMismatch {
                operator: '+',
                value: "hello".to_string()
            }
        );
        assert!(matches!(
            eval("-'x'", &frames),
            Err(ExprError::TypeMismatch { operator: '-', .. })
        ));
    }

    #[test]
    fn test_left_to_right_evaluation() {
        let mut f = ParamFrame::new();
        f.set("a", 10);
        f.set("b", 4);
        f.set("c", 2.5);
        let frames = [f];
        assert_eq!(eval("a - b - c", &frames).unwrap().to_string(), "3.5");
        assert_eq!(eval("a - b * c", &frames).unwrap().to_string(), "0");
        assert_eq!(eval("(a - b) / c", &frames).unwrap().to_string(), "2.4");
    }

    #[test]
    fn test_first_complete_frame_wins() {
        let frames = [
            frame(&[("a", "outer")]),
            frame(&[("a", "1"), ("b", "2")]),
            frame(&[("a", "5"), ("b", "5")]),
        ];
        assert_eq!(eval("a", &frames).unwrap(), ParamValue::from("outer"));
        assert_eq!(eval("a + b", &frames).unwrap().to_string(), "3");
    }

    #[test]
    fn test_names_split_across_frames_fail() {
        let frames = [frame(&[("a", "1")]), frame(&[("b", "2")])];
        assert_eq!(
            eval("a + b", &frames).unwrap_err(),
            ExprError::UnresolvedReference(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_unresolved_lists_missing_names() {
        let frames = [frame(&[("a", "1")])];
        assert_eq!(
            eval("a + z", &frames).unwrap_err(),
            ExprError::UnresolvedReference(vec!["z".to_string()])
        );
        assert!(matches!(
            eval("a", &[]),
            Err(ExprError::UnresolvedReference(_))
        ));
    }

    #[test]
    fn test_literals_need_no_frame() {
        assert_eq!(eval("2 * 3", &[]).unwrap().to_string(), "6");
        assert_eq!(eval("'hi'", &[]).unwrap(), ParamValue::from("hi"));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(eval("1 / 0", &[]), Err(ExprError::Arithmetic(_))));
    }
}
