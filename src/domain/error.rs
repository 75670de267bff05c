use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{message}")]
    ModelsNotLoaded { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Extraction error: {message}")]
    Extraction { message: String },

    #[error("Artifact error: {name} - {message}")]
    Artifact { name: String, message: String },

    #[error("Inference error: {message}")]
    Inference { message: String },

    #[error("Label decode error: {message}")]
    LabelDecode { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn models_not_loaded() -> Self {
        Self::ModelsNotLoaded {
            message: "Models not loaded on server".to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    pub fn artifact(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Artifact {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }

    pub fn label_decode(message: impl Into<String>) -> Self {
        Self::LabelDecode {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error means the pipeline cannot run at all
    pub fn is_models_not_loaded(&self) -> bool {
        matches!(self, Self::ModelsNotLoaded { .. })
    }
}
