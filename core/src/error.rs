use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingField(&'static str),
    UnknownSystem(std::string::String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "Missing required field: {}", field),
            ValidationError::UnknownSystem(name) => write!(f, "Unknown system type: {}", name),
        }
    }
}

impl error::Error for ValidationError {}
