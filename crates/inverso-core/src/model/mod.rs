pub mod path;
pub mod token;
pub mod value;

pub use path::DocumentPath;
pub use token::Token;
pub use value::{ChildValue, SpecData, SpecType, TimeCode, Value};

/// Field holding a spec's time samples
pub const TIME_SAMPLES_FIELD: &str = "timeSamples";

/// Address of one field: (spec path, field name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    pub path: DocumentPath,
    pub field: Token,
}

impl FieldKey {
    pub fn new(path: DocumentPath, field: Token) -> Self {
        Self { path, field }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.path, self.field)
    }
}
