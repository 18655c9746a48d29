use std::{
    error::Error,
    fmt::{self, Display},
};

/// Tag prepended to every aggregated message.
const MESSAGE_TAG: &str = "paramtree";

/// How bad a single failure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The input named a location that does not exist or is malformed
    /// (unknown field, non-numeric index, ignored self value). Recoverable.
    Path,
    /// The location exists but the value could not be written into it.
    Fatal,
}

/// One failure found while writing a tree, located by its path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WriteError {
    message: String,
    path: String,
    severity: Severity,
}

impl WriteError {
    /// A failure at the current location.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        WriteError {
            message: message.into(),
            path: String::new(),
            severity,
        }
    }

    /// A recoverable failure at the current location.
    pub fn path_level(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Path)
    }

    /// A fatal failure at the current location.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Fatal)
    }

    /// Moves the failure to `path`, relative to the current location.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Slash-joined path from the write root to the failure site.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the failure is recoverable.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    fn prefix_path(&mut self, key: &str) {
        self.path = if self.path.is_empty() {
            key.to_owned()
        } else {
            format!("{key}/{}", self.path)
        };
    }
}

impl Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The failures collected by one write call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteErrors {
    errors: Vec<WriteError>,
}

impl WriteErrors {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over the recorded failures.
    pub fn iter(&self) -> std::slice::Iter<'_, WriteError> {
        self.errors.iter()
    }

    /// Records one failure.
    pub fn push(&mut self, error: WriteError) {
        self.errors.push(error);
    }

    /// Takes over failures found at the same location.
    pub fn merge(&mut self, other: WriteErrors) {
        self.errors.extend(other.errors);
    }

    /// Takes over failures found under the child `key`, prefixing their paths.
    pub fn merge_child(&mut self, key: &str, child: WriteErrors) {
        self.errors.extend(child.errors.into_iter().map(|mut error| {
            error.prefix_path(key);
            error
        }));
    }

    /// True when every failure is path-level.
    ///
    /// An empty set is trivially a warning; use [`WriteErrors::into_result`]
    /// to tell success apart.
    pub fn is_warning(&self) -> bool {
        self.errors
            .iter()
            .all(|error| error.severity == Severity::Path)
    }

    /// Reduces the set to a single outcome.
    pub fn into_result(self) -> Result<(), ParamError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ParamErrorKind::Write(self).into())
        }
    }
}

impl From<WriteError> for WriteErrors {
    fn from(error: WriteError) -> Self {
        WriteErrors {
            errors: vec![error],
        }
    }
}

impl IntoIterator for WriteErrors {
    type Item = WriteError;
    type IntoIter = std::vec::IntoIter<WriteError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a WriteErrors {
    type Item = &'a WriteError;
    type IntoIter = std::slice::Iter<'a, WriteError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl Display for WriteErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MESSAGE_TAG}: ")?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Error type for writing parameters.
#[derive(Debug)]
pub struct ParamError {
    kind: ParamErrorKind,
}

impl ParamError {
    /// Returns a reference to the error kind for detailed error inspection.
    pub fn kind(&self) -> &ParamErrorKind {
        &self.kind
    }

    /// Whether the destination is still usable: only path-level failures
    /// occurred, so some parameters were simply not mapped.
    pub fn is_warning(&self) -> bool {
        match &self.kind {
            ParamErrorKind::Write(errors) => errors.is_warning(),
            _ => false,
        }
    }

    /// The per-location failures, if this error came out of a tree write.
    pub fn write_errors(&self) -> Option<&WriteErrors> {
        match &self.kind {
            ParamErrorKind::Write(errors) => Some(errors),
            _ => None,
        }
    }
}

impl Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = &self.kind;
        write!(f, "{kind}")
    }
}

impl Error for ParamError {}

impl<K: Into<ParamErrorKind>> From<K> for ParamError {
    fn from(value: K) -> Self {
        let kind = value.into();
        ParamError { kind }
    }
}

/// Detailed classification of parameter errors.
#[derive(Debug)]
#[non_exhaustive]
pub enum ParamErrorKind {
    /// The write root is not a struct or fixed-size array. Nothing was written.
    InvalidRoot(&'static str),
    /// A parameter path has more segments than allowed. Nothing was written.
    PathTooDeep {
        /// The offending path, as given.
        path: String,
        /// Number of segments in `path`.
        depth: usize,
        /// The configured limit.
        max_depth: usize,
    },
    /// Failures collected while writing the tree.
    Write(WriteErrors),
}

impl Display for ParamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamErrorKind::InvalidRoot(kind) => write!(
                f,
                "{MESSAGE_TAG}: destination must be a struct or fixed-size array, got {kind}"
            ),
            ParamErrorKind::PathTooDeep {
                path,
                depth,
                max_depth,
            } => write!(
                f,
                "{MESSAGE_TAG}: path '{path}' has {depth} segments, at most {max_depth} allowed"
            ),
            ParamErrorKind::Write(errors) => write!(f, "{errors}"),
        }
    }
}

impl From<WriteErrors> for ParamErrorKind {
    fn from(value: WriteErrors) -> Self {
        Self::Write(value)
    }
}
