use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Invalid unit: {unit}")]
    InvalidUnit { unit: String },

    #[error("Invalid shape: {shape}")]
    InvalidShape { shape: String },

    #[error("Invalid type: {kind}")]
    InvalidType { kind: String },

    #[error("Invalid operator: {operator}")]
    InvalidOperator { operator: String },

    #[error("Invalid date: {message}")]
    InvalidDate { message: String },

    #[error("Invalid expression: {message}")]
    InvalidExpression { message: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    System,
}

impl CalcError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn invalid_date(message: impl Into<String>) -> Self {
        CalcError::InvalidDate {
            message: message.into(),
        }
    }

    pub fn invalid_expression(message: impl Into<String>) -> Self {
        CalcError::InvalidExpression {
            message: message.into(),
        }
    }

    /// Stable name of the error kind, reported to API callers as `code`.
    pub fn code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "InvalidInput",
            CalcError::InvalidUnit { .. } => "InvalidUnit",
            CalcError::InvalidShape { .. } => "InvalidShape",
            CalcError::InvalidType { .. } => "InvalidType",
            CalcError::InvalidOperator { .. } => "InvalidOperator",
            CalcError::InvalidDate { .. } => "InvalidDate",
            CalcError::InvalidExpression { .. } => "InvalidExpression",
            CalcError::DivisionByZero => "DivisionByZero",
            CalcError::ConfigError { .. } => "ConfigError",
            CalcError::IoError(_) => "IoError",
            CalcError::SerializationError(_) => "SerializationError",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::ConfigError { .. } => ErrorCategory::Configuration,
            CalcError::IoError(_) | CalcError::SerializationError(_) => ErrorCategory::System,
            _ => ErrorCategory::Validation,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation => 400,
            ErrorCategory::Configuration | ErrorCategory::System => 500,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "Check that every required field is a finite number",
            CalcError::InvalidUnit { .. } => "Use one of the supported unit codes",
            CalcError::InvalidShape { .. } => {
                "Use rectangle, circle, triangle, square or trapezoid"
            }
            CalcError::InvalidType { .. } => "Use of, what, change, add or subtract",
            CalcError::InvalidOperator { .. } => "Use +, -, *, /, % or add, sub, mul, div, mod",
            CalcError::InvalidDate { .. } => "Pass the date as YYYY-MM-DD",
            CalcError::InvalidExpression { .. } => {
                "Only digits, '.', parentheses and + - * / % are allowed"
            }
            CalcError::DivisionByZero => "Use a non-zero divisor",
            CalcError::ConfigError { .. } => "Check the configuration file and CLI flags",
            CalcError::IoError(_) => "Check file paths and permissions",
            CalcError::SerializationError(_) => "Check that the input is valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        let errors = [
            CalcError::invalid_input("amount is required"),
            CalcError::InvalidUnit { unit: "furlong".into() },
            CalcError::InvalidShape { shape: "hexagon".into() },
            CalcError::InvalidType { kind: "double".into() },
            CalcError::InvalidOperator { operator: "^".into() },
            CalcError::invalid_date("not a date"),
            CalcError::invalid_expression("bad token"),
            CalcError::DivisionByZero,
        ];

        for error in errors {
            assert_eq!(error.category(), ErrorCategory::Validation);
            assert_eq!(error.status_code(), 400);
        }
    }

    #[test]
    fn test_config_error_is_server_side() {
        let error = CalcError::ConfigError {
            message: "port must be non-zero".into(),
        };
        assert_eq!(error.status_code(), 500);
        assert_eq!(error.code(), "ConfigError");
        assert_eq!(
            error.to_string(),
            "Configuration error: port must be non-zero"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "Division by zero");
        assert_eq!(
            CalcError::InvalidUnit { unit: "xx".into() }.to_string(),
            "Invalid unit: xx"
        );
    }
}
