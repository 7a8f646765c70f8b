//! Template scanning: declared resources matched against the catalogue.

use thiserror::Error;

use crate::catalog::{Capability, PatternCatalog};
use crate::plan::ImplementationPlan;
use crate::planner;
use crate::report::{Recommendation, ResourceReport};
use crate::template::{CfnTemplate, TemplateError};

/// Errors raised while scanning a template.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("No capability patterns registered for resource type {0}")]
    UnknownResourceType(String),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Matches declared resources against canonical capability patterns.
///
/// A scanner only reads its catalogue, so a single instance can serve any
/// number of threads once built.
#[derive(Debug, Clone)]
pub struct Scanner {
    catalog: PatternCatalog,
}

impl Scanner {
    pub fn new(catalog: PatternCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Scans one declared resource.
    ///
    /// Per catalogue pattern, the resource's configuration graph either
    /// covers it (capability implemented) or a remediation plan is
    /// rendered. A capability implemented through any one pattern never
    /// shows up among the recommendations, whatever its other patterns say.
    pub fn scan_resource(
        &self,
        template: &CfnTemplate,
        logical_name: &str,
    ) -> Result<ResourceReport, ScanError> {
        let entry = template
            .resource(logical_name)
            .ok_or_else(|| TemplateError::UnknownResource(logical_name.to_string()))?;
        let graph = template.resource_graph(logical_name)?;

        let patterns = self
            .catalog
            .patterns_for(&entry.resource_type)
            .ok_or_else(|| ScanError::UnknownResourceType(entry.resource_type.clone()))?;

        let mut implemented: Vec<Capability> = Vec::new();
        let mut gaps: Vec<(Capability, ImplementationPlan)> = Vec::new();
        for (capability, pattern) in patterns {
            if graph.covers(pattern) {
                if !implemented.iter().any(|c| c.id == capability.id) {
                    implemented.push(capability.clone());
                }
            } else {
                gaps.push((
                    capability.clone(),
                    planner::implementation_plan(&graph, pattern),
                ));
            }
        }
        implemented.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));

        let mut recommendations: Vec<Recommendation> = Vec::new();
        for (capability, plan) in gaps {
            if implemented.iter().any(|c| c.id == capability.id) {
                // Alternative patterns can disagree; implemented wins.
                continue;
            }
            match recommendations
                .iter_mut()
                .find(|r| r.capability.id == capability.id)
            {
                Some(recommendation) => recommendation.implementations.push(plan),
                None => recommendations.push(Recommendation {
                    capability,
                    implementations: vec![plan],
                }),
            }
        }
        recommendations.sort_by(|a, b| {
            a.capability
                .title
                .cmp(&b.capability.title)
                .then(a.capability.id.cmp(&b.capability.id))
        });

        Ok(ResourceReport {
            logical_name: logical_name.to_string(),
            currently_implements: implemented,
            recommendations,
        })
    }

    /// Scans every declared resource, in logical-name order.
    ///
    /// The first per-resource failure aborts the whole scan; callers that
    /// prefer to skip offending resources can drive [`scan_resource`]
    /// themselves.
    ///
    /// [`scan_resource`]: Scanner::scan_resource
    pub fn scan_template(
        &self,
        template: &CfnTemplate,
    ) -> Result<Vec<ResourceReport>, ScanError> {
        template
            .resource_names()
            .map(|name| self.scan_resource(template, name))
            .collect()
    }
}
