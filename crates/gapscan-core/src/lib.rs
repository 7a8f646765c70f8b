pub mod graph;
pub mod template;
pub mod catalog;
pub mod plan;
pub mod planner;
pub mod report;
pub mod scanner;
pub mod config;
pub mod discovery;

pub use graph::{Edge, EdgeKind, NodeId, NodeKind, PropertyGraph};
pub use template::{CfnTemplate, ResourceEntry, TemplateError};
pub use catalog::{
    Capability, CatalogEntry, CatalogError, FilePatternSource, PatternCatalog, PatternSource,
};
pub use plan::{ImplementationPlan, PlannedProperty, ResourceStep, StepAction};
pub use planner::{delta_graph, implementation_plan};
pub use report::{Recommendation, ResourceReport};
pub use scanner::{ScanError, Scanner};
pub use config::{Config, ConfigError};
pub use discovery::TemplateFinder;
