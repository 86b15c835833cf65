use super::*;

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(position) => ParseError::Record {
                line: position.line(),
                message: err.to_string(),
            },
            None => ParseError::Malformed(err.to_string()),
        }
    }
}

impl From<dotenvy::Error> for ConfigError {
    fn from(error: dotenvy::Error) -> Self {
        ConfigError::Loading(error.to_string())
    }
}
