use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Property values that cannot be flattened into a string
    #[error("property {0:?} does not hold a scalar value")]
    NonScalarProperty(String),
}
