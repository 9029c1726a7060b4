//! Error type shared by the stack, the operator registry and the cascade.

/// Everything that can go wrong while evaluating one line of input.
///
/// `UnknownOperator` and `Expression` are fall-through signals between
/// cascade stages; the other variants reach the user.
#[derive(Debug)]
pub enum CalcError {
    /// An operator or command needed more operands than the stack holds
    InsufficientStack { needed: usize, available: usize },
    /// No operator is registered under this token
    UnknownOperator(String),
    /// The line is not an expression, or its value is not a number
    Expression(String),
    /// The OS random source failed
    RandomSource(String),
    /// An operand is outside the operator's domain
    InvalidOperand(String),
    /// Writing help or fixed-format output failed
    Io(std::io::Error),
}

impl CalcError {
    /// True for the signals the cascade swallows before trying the next stage
    pub fn is_fall_through(&self) -> bool {
        matches!(
            self,
            CalcError::UnknownOperator(_) | CalcError::Expression(_)
        )
    }
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcError::InsufficientStack { needed, available } => write!(
                f,
                "insufficient stack: need {}, have {}",
                needed, available
            ),
            CalcError::UnknownOperator(token) => write!(f, "no operator '{}'", token),
            CalcError::Expression(msg) => write!(f, "expression error: {}", msg),
            CalcError::RandomSource(msg) => write!(f, "random source failed: {}", msg),
            CalcError::InvalidOperand(msg) => write!(f, "{}", msg),
            CalcError::Io(e) => write!(f, "output error: {}", e),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalcError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CalcError {
    fn from(e: std::io::Error) -> Self {
        CalcError::Io(e)
    }
}

impl From<rand::Error> for CalcError {
    fn from(e: rand::Error) -> Self {
        CalcError::RandomSource(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_insufficient_stack() {
        let err = CalcError::InsufficientStack {
            needed: 2,
            available: 1,
        };
        assert_eq!(err.to_string(), "insufficient stack: need 2, have 1");
    }

    #[test]
    fn test_fall_through_classification() {
        assert!(CalcError::UnknownOperator("x".to_string()).is_fall_through());
        assert!(CalcError::Expression("bad".to_string()).is_fall_through());
        assert!(
            !CalcError::InsufficientStack {
                needed: 1,
                available: 0
            }
            .is_fall_through()
        );
        assert!(!CalcError::RandomSource("boom".to_string()).is_fall_through());
    }
}
