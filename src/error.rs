use crate::domain::types::FactoryName;
use thiserror::Error;

/// Boxed error reported by caller-supplied generators, models, and adapters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fixture factory error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("No factory defined for model '{name}'")]
    UndefinedFactory { name: FactoryName },

    #[error("Failed to resolve attribute '{attribute}' of factory '{factory}': {source}")]
    AttributeResolution {
        factory: FactoryName,
        attribute: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to save document built by factory '{factory}': {source}")]
    Save {
        factory: FactoryName,
        #[source]
        source: BoxError,
    },

    #[error("Failed to destroy document created by factory '{factory}': {source}")]
    Destroy {
        factory: FactoryName,
        #[source]
        source: BoxError,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Settings error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Promise task ended before reporting a result")]
    PromiseDropped,
}

impl Error {
    pub fn undefined_factory(name: impl Into<FactoryName>) -> Self {
        Self::UndefinedFactory { name: name.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Name of the factory the failure is attributed to, when there is one.
    pub fn factory(&self) -> Option<&FactoryName> {
        match self {
            Self::UndefinedFactory { name } => Some(name),
            Self::AttributeResolution { factory, .. }
            | Self::Save { factory, .. }
            | Self::Destroy { factory, .. } => Some(factory),
            Self::Configuration(_) | Self::Config(_) | Self::PromiseDropped => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_factory_message_names_the_factory() {
        let error = Error::undefined_factory("post");
        assert_eq!(error.to_string(), "No factory defined for model 'post'");
        assert_eq!(error.factory().map(|name| name.as_ref()), Some("post"));
    }

    #[test]
    fn adapter_failures_keep_their_source() {
        let source: BoxError = "connection reset".into();
        let error = Error::Save {
            factory: FactoryName::from("user"),
            source,
        };

        let reported = std::error::Error::source(&error).map(ToString::to_string);
        assert_eq!(reported.as_deref(), Some("connection reset"));
    }

    #[test]
    fn configuration_errors_have_no_factory() {
        assert!(Error::configuration("missing spawner").factory().is_none());
        assert!(Error::PromiseDropped.factory().is_none());
    }
}
