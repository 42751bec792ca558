/// Errors raised when editing a [`TagSchema`](crate::tags::TagSchema).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Property {name} has kind {kind}, expected select or multi_select")]
    WrongPropertyKind { name: String, kind: String },
}
