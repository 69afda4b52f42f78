use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The input is not a sequence of sequences of integer literals.
    #[error("malformed clause input: {0}")]
    Malformed(String),

    #[error("zero literal in clause {clause} at position {position}")]
    ZeroLiteral { clause: usize, position: usize },

    /// A literal's variable lies beyond the declared count, or beyond
    /// [`MAX_VARS`](crate::validate::MAX_VARS) when the count is inferred.
    #[error("literal {lit} in clause {clause} out of range for {vars} variables")]
    LiteralOutOfRange { clause: usize, lit: i32, vars: usize },

    #[error("variable count {0} exceeds the supported maximum of {max}", max = crate::validate::MAX_VARS)]
    TooManyVars(usize),

    #[error("DIMACS line {line}: {message}")]
    Dimacs { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Error::Malformed(_))
    }

    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            Error::ZeroLiteral { .. } | Error::LiteralOutOfRange { .. } | Error::TooManyVars(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
