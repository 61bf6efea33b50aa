//! Names used to key factories and models
//!
//! Factory and model names are plain strings at the call site but travel
//! through the pipeline as newtypes so the two can never be confused.

use nutype::nutype;

/// Unique key of a factory definition
#[nutype(derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRef,
    From,
    Into
))]
pub struct FactoryName(String);

impl From<&FactoryName> for FactoryName {
    fn from(name: &FactoryName) -> Self {
        name.clone()
    }
}

/// Name of the model a document is an instance of
#[nutype(derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRef,
    From,
    Into
))]
pub struct ModelName(String);
