use serde::{Deserialize, Serialize};

use crate::catalog::Capability;
use crate::plan::ImplementationPlan;

/// Coverage report for one declared resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReport {
    /// Logical name of the resource in its template.
    pub logical_name: String,

    /// Capabilities the declared configuration already implements, sorted
    /// by title.
    pub currently_implements: Vec<Capability>,

    /// Capabilities the resource type supports but this declaration does
    /// not implement, sorted by title.
    pub recommendations: Vec<Recommendation>,
}

impl ResourceReport {
    /// True when at least one known capability is unimplemented.
    pub fn has_gaps(&self) -> bool {
        !self.recommendations.is_empty()
    }
}

/// An unimplemented capability together with the ways to implement it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub capability: Capability,

    /// Alternative plans, one per known pattern, in catalogue order.
    pub implementations: Vec<ImplementationPlan>,
}
