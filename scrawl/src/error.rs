use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

pub trait ScrawlErrorExt {
    /// report the error and its accumulated context to the log
    fn log(self);
    fn problem(self, why: String) -> Self;
}

impl<T> ScrawlErrorExt for Result<T, ScrawlError> {
    fn log(self) {
        if let Err(err) = self {
            err.log();
        }
    }

    fn problem(mut self, why: String) -> Self {
        if let Some(err) = self.as_mut().err() {
            err.why.push(why);
        }

        self
    }
}

impl ScrawlErrorExt for ScrawlError {
    fn log(self) {
        let msg = self
            .why
            .iter()
            .rev()
            .fold(String::new(), |acc, why| format!("{why} {acc}"));
        log::error!("{}", msg.trim_end());
    }

    fn problem(mut self, why: String) -> Self {
        self.why.push(why);
        self
    }
}

#[derive(Debug)]
pub struct ScrawlError {
    kind: ErrorKind,
    why: Vec<String>,
}

impl ScrawlError {
    pub fn new(kind: ErrorKind) -> Self {
        ScrawlError {
            kind,
            why: Vec::new(),
        }
    }

    pub fn because(kind: ErrorKind, reason: String) -> Self {
        ScrawlError {
            kind,
            why: vec![reason],
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl Display for ScrawlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.kind)
    }
}

impl Error for ScrawlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ErrorKind::IoError(err) => Some(err),
            ErrorKind::RonError(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ErrorKind {
    NoConfigDir,
    IoError(std::io::Error),
    RonError(Box<dyn std::error::Error>),
}

impl From<std::io::Error> for ScrawlError {
    fn from(err: std::io::Error) -> Self {
        let problem = format!("{err}");
        ScrawlError::new(ErrorKind::IoError(err)).problem(problem)
    }
}

impl From<ron::error::SpannedError> for ScrawlError {
    fn from(err: ron::error::SpannedError) -> Self {
        let problem = format!("{err}");
        ScrawlError::new(ErrorKind::RonError(Box::new(err))).problem(problem)
    }
}

impl From<ron::Error> for ScrawlError {
    fn from(err: ron::Error) -> Self {
        let problem = format!("{err}");
        ScrawlError::new(ErrorKind::RonError(Box::new(err))).problem(problem)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ErrorKind::NoConfigDir => write!(f, "No user configuration directory"),
            ErrorKind::IoError(err) => write!(f, "{err}"),
            ErrorKind::RonError(err) => write!(f, "{err}"),
        }
    }
}
