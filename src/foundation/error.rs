/// Convenience result type used across termreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by path builders, scenes and the player.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid caller-provided options or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A curved move needs at least two waypoints to form a spline window.
    #[error("path error: insufficient waypoints (need at least 2, got {got})")]
    InsufficientWaypoints {
        /// Number of waypoints actually supplied.
        got: usize,
    },

    /// A move was asked to take too few steps.
    #[error("path error: invalid step count {steps}")]
    InvalidStepCount {
        /// Step count actually supplied.
        steps: usize,
    },

    /// A scene with a derived duration was built from an empty effect list.
    #[error("scene error: cannot derive duration from no effects")]
    NoEffects,

    /// The effect handle is not registered with the scene.
    #[error("scene error: effect not found")]
    EffectNotFound,

    /// Errors when serializing or deserializing durable state.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
