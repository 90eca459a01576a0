use strata_expr::ids::VariableId;

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// Bounds for a variable or constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Bounds fixing a value exactly.
    pub fn fixed(value: f64) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    /// Unbounded in both directions.
    pub fn free() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }

    /// `[0, +inf)`.
    pub fn nonnegative() -> Self {
        Self {
            lower: 0.0,
            upper: f64::INFINITY,
        }
    }
}

/// A decision variable with bounds and integrality restriction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub bounds: Bounds,
    pub is_integer: bool,
}

impl Variable {
    /// Create a continuous variable with specified bounds.
    pub fn continuous(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: false,
        }
    }

    /// Create an integer variable with specified bounds.
    pub fn integer(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: true,
        }
    }

    /// Create a binary variable with bounds [0, 1] and integer restriction.
    pub fn binary() -> Self {
        Self {
            bounds: Bounds::new(0.0, 1.0),
            is_integer: true,
        }
    }

    /// Create a continuous variable unbounded in both directions.
    pub fn free() -> Self {
        Self::continuous(Bounds::free())
    }

    /// Create a continuous variable on `[0, +inf)`.
    pub fn nonnegative() -> Self {
        Self::continuous(Bounds::nonnegative())
    }
}

/// A constraint with lower and upper bounds on its row activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub bounds: Bounds,
}

/// Objective function with a sense and linear terms
#[derive(Debug, Clone)]
pub struct Objective {
    pub sense: Option<Sense>,
    pub terms: Vec<(VariableId, f64)>,
}

impl Objective {
    /// Create a new empty objective
    pub fn new() -> Self {
        Self {
            sense: None,
            terms: Vec::new(),
        }
    }
}

impl Default for Objective {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn binary_variable_constructor() {
        let var = Variable::binary();
        assert_eq!(var.bounds.lower, 0.0);
        assert_eq!(var.bounds.upper, 1.0);
        assert!(var.is_integer);
    }

    #[test]
    fn free_variable_is_unbounded() {
        let var = Variable::free();
        assert!(var.bounds.lower.is_infinite() && var.bounds.lower < 0.0);
        assert!(var.bounds.upper.is_infinite() && var.bounds.upper > 0.0);
        assert!(!var.is_integer);
    }

    #[test]
    fn nonnegative_variable_lower_bound() {
        let var = Variable::nonnegative();
        assert_eq!(var.bounds.lower, 0.0);
        assert!(var.bounds.upper.is_infinite());
    }

    #[test]
    fn fixed_bounds_pin_both_sides() {
        let bounds = Bounds::fixed(0.0);
        assert_eq!(bounds.lower, 0.0);
        assert_eq!(bounds.upper, 0.0);
    }

    #[test]
    fn objective_default_is_empty() {
        let objective = Objective::default();
        assert!(objective.sense.is_none());
        assert!(objective.terms.is_empty());
    }
}
