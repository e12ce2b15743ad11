use inverso_core_types::StoreId;
use thiserror::Error;

/// Result type alias using InversoError
pub type Result<T> = std::result::Result<T, InversoError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log assertions and command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Store structure
    InvalidPath,
    NotFound,
    AlreadyExists,
    IllegalMove,
    TypeMismatch,
    ChildMismatch,

    // Replay
    ExpiredTarget,
    Busy,

    // Journal misuse
    ProgrammingError,
    PerformanceWarning,

    // Commands
    UnknownCommand,
    InvalidArgument,

    // Configuration / IO
    InvalidConfig,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidPath => "ERR_INVALID_PATH",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::IllegalMove => "ERR_ILLEGAL_MOVE",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::ChildMismatch => "ERR_CHILD_MISMATCH",
            ExErrorKind::ExpiredTarget => "ERR_EXPIRED_TARGET",
            ExErrorKind::Busy => "ERR_BUSY",
            ExErrorKind::ProgrammingError => "ERR_PROGRAMMING_ERROR",
            ExErrorKind::PerformanceWarning => "ERR_PERFORMANCE_WARNING",
            ExErrorKind::UnknownCommand => "ERR_UNKNOWN_COMMAND",
            ExErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling and optional
/// context (operation, store, path, field) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    store_id: Option<StoreId>,
    path: Option<String>,
    field: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            store_id: None,
            path: None,
            field: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add store context
    pub fn with_store_id(mut self, store_id: StoreId) -> Self {
        self.store_id = Some(store_id);
        self
    }

    /// Add document path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add field name context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the store context, if any
    pub fn store_id(&self) -> Option<&StoreId> {
        self.store_id.as_ref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the field context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(store_id) = &self.store_id {
            write!(f, " (store_id: {})", store_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for store primitives, replay and journal misuse
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InversoError {
    // ===== Paths =====
    /// Path text could not be parsed
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    // ===== Store structure =====
    /// No spec at the given path
    #[error("Spec not found: {path}")]
    SpecNotFound { path: String },

    /// A spec already exists at the given path
    #[error("Spec already exists: {path}")]
    SpecAlreadyExists { path: String },

    /// The parent of a new spec does not exist
    #[error("Parent spec not found for {path}")]
    ParentNotFound { path: String },

    /// Move source/destination combination is not allowed
    #[error("Cannot move {from} to {to}: {reason}")]
    IllegalMove {
        from: String,
        to: String,
        reason: String,
    },

    /// Field holds a value of a different type than the primitive requires
    #[error("Field {field} on {path} is not a {expected}")]
    FieldTypeMismatch {
        path: String,
        field: String,
        expected: String,
    },

    /// Popped child does not match the last list entry
    #[error("Cannot pop {expected} from {field} on {path}: last entry is {found}")]
    ChildMismatch {
        path: String,
        field: String,
        expected: String,
        found: String,
    },

    // ===== Replay =====
    /// The store an edit targets no longer exists
    #[error("Store {store_id} has expired")]
    ExpiredTarget { store_id: StoreId },

    /// The store is already borrowed (replay from inside a hook)
    #[error("Store {store_id} is busy")]
    StoreBusy { store_id: StoreId },

    /// A finalized log is already being inverted
    #[error("Edit log is already in use")]
    LogInUse,

    // ===== Journal misuse =====
    /// `invert()` called while a transaction is open
    #[error("Cannot invert an edit log inside an open transaction (depth {depth})")]
    InvertInsideTransaction { depth: usize },

    /// Transaction closed more often than opened
    #[error("Transaction exit without matching enter")]
    UnbalancedTransaction,

    // ===== Commands =====
    /// No command registered under the name
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    /// Command arguments do not match the command's contract
    #[error("Invalid argument for {command}: {reason}")]
    InvalidArgument { command: String, reason: String },

    // ===== Configuration =====
    /// Configuration failed to parse or validate
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Filesystem error while reading configuration
    #[error("IO error: {message}")]
    Io { message: String },
}

impl InversoError {
    /// Canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        ExError::from(self.clone()).kind()
    }
}

/// Conversion from InversoError to ExError
impl From<InversoError> for ExError {
    fn from(err: InversoError) -> Self {
        match err {
            InversoError::InvalidPath { path, reason } => ExError::new(ExErrorKind::InvalidPath)
                .with_path(path)
                .with_message(reason),

            InversoError::SpecNotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_path(path)
                .with_message("Spec not found"),

            InversoError::ParentNotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_path(path)
                .with_op("create_spec")
                .with_message("Parent spec not found"),

            InversoError::SpecAlreadyExists { path } => ExError::new(ExErrorKind::AlreadyExists)
                .with_path(path)
                .with_message("Spec already exists"),

            InversoError::IllegalMove { from, to, reason } => {
                ExError::new(ExErrorKind::IllegalMove)
                    .with_path(from)
                    .with_op("move_spec")
                    .with_message(format!("to {}: {}", to, reason))
            }

            InversoError::FieldTypeMismatch {
                path,
                field,
                expected,
            } => ExError::new(ExErrorKind::TypeMismatch)
                .with_path(path)
                .with_field(field)
                .with_message(format!("Expected {}", expected)),

            InversoError::ChildMismatch {
                path,
                field,
                expected,
                found,
            } => ExError::new(ExErrorKind::ChildMismatch)
                .with_path(path)
                .with_field(field)
                .with_op("pop_child")
                .with_message(format!("Expected {}, found {}", expected, found)),

            InversoError::ExpiredTarget { store_id } => ExError::new(ExErrorKind::ExpiredTarget)
                .with_store_id(store_id)
                .with_message("Store has expired"),

            InversoError::StoreBusy { store_id } => ExError::new(ExErrorKind::Busy)
                .with_store_id(store_id)
                .with_message("Store is already borrowed"),

            InversoError::LogInUse => ExError::new(ExErrorKind::Busy)
                .with_op("invert")
                .with_message("Edit log is already in use"),

            InversoError::InvertInsideTransaction { depth } => {
                ExError::new(ExErrorKind::ProgrammingError)
                    .with_op("invert")
                    .with_message(format!("Invert called at depth {}", depth))
            }

            InversoError::UnbalancedTransaction => ExError::new(ExErrorKind::ProgrammingError)
                .with_op("exit")
                .with_message("Transaction exit without matching enter"),

            InversoError::UnknownCommand { name } => ExError::new(ExErrorKind::UnknownCommand)
                .with_op("create_command")
                .with_message(name),

            InversoError::InvalidArgument { command, reason } => {
                ExError::new(ExErrorKind::InvalidArgument)
                    .with_op(command)
                    .with_message(reason)
            }

            InversoError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            InversoError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

/// Conversion from std::io::Error to InversoError
impl From<std::io::Error> for InversoError {
    fn from(err: std::io::Error) -> Self {
        InversoError::Io {
            message: err.to_string(),
        }
    }
}
