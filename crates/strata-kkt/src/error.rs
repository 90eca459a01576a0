//! Reformulation error types.

use strata_core::ModelError;

/// Errors raised while validating problem data or assembling the KKT system.
///
/// All variants are deterministic pre-solve failures; nothing here is
/// retried, and solver outcomes are never mapped into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// A coefficient matrix or vector disagrees with the declared sizes.
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// An integer-restriction index points outside the upper-level variables.
    InvalidIndex {
        field: &'static str,
        index: usize,
        len: usize,
    },
    /// An upper-level box bound has lower > upper (or a NaN endpoint).
    BoundInconsistency { index: usize, lower: f64, upper: f64 },
    /// The requested complementarity encoding is not expressible on this model.
    UnsupportedComplementarityMethod { method: &'static str },
    /// Big-M constant must be finite and positive.
    InvalidBigM { big_m: f64 },
    /// Error propagated from the model layer.
    Model(ModelError),
}

impl BuildError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            BuildError::DimensionMismatch { .. } => "KKT_DIMENSION_MISMATCH",
            BuildError::InvalidIndex { .. } => "KKT_INVALID_INDEX",
            BuildError::BoundInconsistency { .. } => "KKT_BOUND_INCONSISTENCY",
            BuildError::UnsupportedComplementarityMethod { .. } => {
                "KKT_UNSUPPORTED_COMPLEMENTARITY"
            }
            BuildError::InvalidBigM { .. } => "KKT_INVALID_BIG_M",
            BuildError::Model(err) => err.code(),
        }
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::DimensionMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "[{}] Size of {} disagrees with declared dimensions: expected {}, found {}",
                self.code(),
                field,
                expected,
                found
            ),
            BuildError::InvalidIndex { field, index, len } => write!(
                f,
                "[{}] Index {} in {} is out of range for {} variables",
                self.code(),
                index,
                field,
                len
            ),
            BuildError::BoundInconsistency {
                index,
                lower,
                upper,
            } => write!(
                f,
                "[{}] Box bound {} is inconsistent: lower ({}) > upper ({})",
                self.code(),
                index,
                lower,
                upper
            ),
            BuildError::UnsupportedComplementarityMethod { method } => write!(
                f,
                "[{}] Complementarity method '{}' is not supported by this model backend",
                self.code(),
                method
            ),
            BuildError::InvalidBigM { big_m } => write!(
                f,
                "[{}] Big-M constant must be finite and positive (got {})",
                self.code(),
                big_m
            ),
            BuildError::Model(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for BuildError {
    fn from(err: ModelError) -> Self {
        BuildError::Model(err)
    }
}

#[cfg(test)]
mod tests {
    use super::BuildError;
    use strata_core::ModelError;

    #[test]
    fn display_prefixes_error_code() {
        let err = BuildError::DimensionMismatch {
            field: "g (rows)",
            expected: 2,
            found: 3,
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("[KKT_DIMENSION_MISMATCH]"));
        assert!(rendered.contains("g (rows)"));
    }

    #[test]
    fn model_errors_keep_their_code() {
        let err = BuildError::from(ModelError::NoObjective);
        assert_eq!(err.code(), "OBJECTIVE_MISSING");
        assert!(err.to_string().starts_with("[OBJECTIVE_MISSING]"));
    }

    #[test]
    fn unsupported_method_names_the_method() {
        let err = BuildError::UnsupportedComplementarityMethod { method: "bilinear" };
        assert_eq!(err.code(), "KKT_UNSUPPORTED_COMPLEMENTARITY");
        assert!(err.to_string().contains("bilinear"));
    }
}
