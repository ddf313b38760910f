/// A request that could not be turned into a typed call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("missing argument '{0}'")]
    MissingArgument(&'static str),

    #[error("invalid argument '{name}': expected {expected}")]
    InvalidArgument {
        name: &'static str,
        expected: &'static str,
    },
}

/// Failures of `readFile` / `listFiles`.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("access denied: only files inside the application directory may be read")]
    OutsideRoot,

    #[error("file does not exist: {0}")]
    NotFound(String),

    #[error("not a regular file: {0}")]
    NotAFile(String),

    #[error("file too large ({size} bytes, max {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("file is not valid UTF-8 text")]
    NotUtf8,

    #[error("file root unavailable: {0}")]
    RootUnavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Rejection or failure of a `calculate` expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,

    #[error("expression too long (max {max} characters)")]
    TooLong { max: usize },

    #[error("expression nested too deeply")]
    TooDeep,

    #[error("invalid syntax: unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("invalid syntax: unexpected {0}")]
    UnexpectedToken(String),

    #[error("invalid syntax: unexpected end of expression")]
    UnexpectedEnd,

    #[error("invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("name '{0}' is not defined")]
    UndefinedName(String),

    #[error("'{0}' is not callable")]
    NotCallable(String),

    #[error("function '{0}' must be called")]
    BareFunction(String),

    #[error("{0}")]
    Type(String),

    #[error("{0}")]
    ZeroDivision(&'static str),

    #[error("math domain error")]
    Domain,

    #[error("integer overflow")]
    Overflow,

    #[error("result is not a finite number")]
    NonFinite,

    #[error("list too long (max {max} elements)")]
    ListTooLong { max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_error_display() {
        assert_eq!(
            CallError::UnknownOperation("eval".into()).to_string(),
            "Unknown operation: eval"
        );
        assert_eq!(
            CallError::MissingArgument("name").to_string(),
            "missing argument 'name'"
        );
        assert_eq!(
            CallError::InvalidArgument {
                name: "id",
                expected: "integer"
            }
            .to_string(),
            "invalid argument 'id': expected integer"
        );
    }

    #[test]
    fn calc_error_display() {
        assert_eq!(
            CalcError::UndefinedName("os".into()).to_string(),
            "name 'os' is not defined"
        );
        assert_eq!(
            CalcError::ZeroDivision("division by zero").to_string(),
            "division by zero"
        );
    }

    #[test]
    fn file_error_display() {
        assert!(FileError::OutsideRoot.to_string().starts_with("access denied"));
        assert_eq!(
            FileError::TooLarge { size: 10, max: 5 }.to_string(),
            "file too large (10 bytes, max 5)"
        );
    }
}
