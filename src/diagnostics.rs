// ABOUTME: Diagnostics accumulator for non-fatal warnings during deployment.
// ABOUTME: Collects tolerated anomalies that should reach the user without failing the run.

/// Collects non-fatal warnings during deployment operations.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during deployment.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// The bucket insert came back as not found.
    pub fn bucket_unconfirmed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::BucketUnconfirmed,
            message: message.into(),
        }
    }

    /// An archive already in the bucket is being replaced.
    pub fn version_overwritten(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::VersionOverwritten,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Bucket creation could not be confirmed.
    BucketUnconfirmed,
    /// Overwrite was requested and the versioned archive existed.
    VersionOverwritten,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_starts_empty() {
        let diag = Diagnostics::default();
        assert!(!diag.has_warnings());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn diagnostics_collects_warnings() {
        let mut diag = Diagnostics::default();

        diag.warn(Warning::bucket_unconfirmed("insert returned 404"));
        diag.warn(Warning::version_overwritten("gs://b/app/app-1.0.0.zip"));

        assert!(diag.has_warnings());
        assert_eq!(diag.warnings().len(), 2);
    }

    #[test]
    fn warning_constructors_set_correct_kind() {
        let bucket = Warning::bucket_unconfirmed("test");
        assert_eq!(bucket.kind, WarningKind::BucketUnconfirmed);

        let overwrite = Warning::version_overwritten("test");
        assert_eq!(overwrite.kind, WarningKind::VersionOverwritten);
    }
}
