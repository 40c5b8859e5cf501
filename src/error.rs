use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    ModeParse,
    DateParse,
    InvalidSelection,
    CommandParse,
    ConfigParse,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(parse_error: chrono::ParseError) -> Error {
        Error::new(
            ErrorKind::DateParse,
            format!("Could not parse date: {}", parse_error).as_str(),
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(ErrorKind::ConfigParse, &toml_error.to_string())
    }
}

impl<E: std::fmt::Debug> From<nom::Err<E>> for Error {
    fn from(error: nom::Err<E>) -> Self {
        Error::new(
            ErrorKind::CommandParse,
            &format!("Error while parsing: {}", error),
        )
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        if let ErrorKind::IOError(err) = err.kind {
            err
        } else {
            let kind = err.kind.as_str();
            io::Error::new(io::ErrorKind::InvalidInput, err.message.unwrap_or(kind))
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::ModeParse => "invalid selection mode".to_owned(),
            ErrorKind::DateParse => "invalid date format".to_owned(),
            ErrorKind::InvalidSelection => "selection not allowed".to_owned(),
            ErrorKind::CommandParse => "invalid command".to_owned(),
            ErrorKind::ConfigParse => "invalid configuration".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}
