//! Composer error taxonomy.

use carvis_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    /// Rejected at `open`, before any resource was acquired.
    #[error("invalid scene configuration: {0}")]
    Config(#[from] ConfigError),

    /// `step` or `set_target` on a composer that has already closed.
    #[error("scene is closed")]
    Closed,

    /// Terminal I/O failed while acquiring, presenting or releasing.
    #[error("presentation surface failed: {0:#}")]
    Surface(anyhow::Error),
}

impl SceneError {
    pub fn is_closed(&self) -> bool {
        matches!(self, SceneError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert() {
        let err: SceneError = ConfigError::NonPositiveLength(0.0).into();
        assert!(matches!(err, SceneError::Config(_)));
        assert!(err.to_string().starts_with("invalid scene configuration"));
    }

    #[test]
    fn surface_error_shows_context_chain() {
        let inner = anyhow::anyhow!("broken pipe").context("flush frame");
        let err = SceneError::Surface(inner);
        assert_eq!(
            err.to_string(),
            "presentation surface failed: flush frame: broken pipe"
        );
        assert!(!err.is_closed());
        assert!(SceneError::Closed.is_closed());
    }
}
