use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoasterError {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Coincident mesh vertices {first} and {second}")]
    DuplicateVertex { first: usize, second: usize },

    #[error("Degenerate coordinate frame at u = {u}: reference vector is parallel to the tangent")]
    DegenerateFrame { u: f64 },

    #[error("Unknown track layout \"{0}\"")]
    UnknownLayout(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl CoasterError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoasterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = CoasterError::parse(12, "bad vertex");
        assert_eq!(err.to_string(), "Parse error at line 12: bad vertex");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "car.obj");
        let err: CoasterError = io.into();
        assert!(matches!(err, CoasterError::Io(_)));
    }
}
