use std::fmt;

/// Every problem found while validating a configuration.
///
/// Validation does not stop at the first error so the operator can fix all of
/// them in one go.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigErrors(Vec<String>);

impl ConfigErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, problem: impl Into<String>) {
        self.0.push(problem.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn problems(&self) -> &[String] {
        &self.0
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), AttackError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AttackError::Configuration(self))
        }
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, problem) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}", problem)?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AttackError {
    #[error("Invalid configuration:\n{0}")]
    Configuration(ConfigErrors),
    #[error("Cannot build frame: {0}")]
    InvalidFrameSpec(#[from] libdot11::error::Error),
    #[error("Failed to open injector on {interface}: {reason}")]
    InjectorOpen { interface: String, reason: String },
    #[error("Session has already run")]
    AlreadyRun,
}

impl AttackError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, AttackError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_problems() {
        let mut errors = ConfigErrors::new();
        errors.push("Interface name cannot be empty");
        errors.push("Channel must be between 1 and 14");
        assert_eq!(errors.len(), 2);

        let err = errors.into_result().unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Invalid configuration:\n  - Interface name cannot be empty\n  - Channel must be between 1 and 14"
        );
    }

    #[test]
    fn test_empty_is_ok() {
        assert!(ConfigErrors::new().into_result().is_ok());
    }
}
