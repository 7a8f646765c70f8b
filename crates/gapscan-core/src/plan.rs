use serde::{Deserialize, Serialize};

/// Ordered remediation steps that close one capability gap.
///
/// Steps appear dependency-first: a step whose properties reference another
/// planned resource always comes after the step introducing that resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationPlan {
    pub resources: Vec<ResourceStep>,
}

impl ImplementationPlan {
    /// Converts the plan to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Parses a plan from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// True when the plan carries no resource steps.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// One resource to create or extend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStep {
    /// Node label of the resource: the declared type for the analyzed
    /// resource, the auxiliary resource's label otherwise.
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Whether the resource must be created or just extended.
    pub action: StepAction,

    /// Properties to configure, sorted by canonical label.
    pub properties: Vec<PlannedProperty>,
}

/// Whether a step creates a resource or adds to an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAction {
    /// The resource is not declared yet and must be created.
    #[serde(rename = "CREATE_NEW")]
    NewResource,

    /// The resource exists; only its configuration grows.
    #[serde(rename = "ADD_PROPERTIES")]
    AddProperties,
}

impl StepAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepAction::NewResource => "CREATE_NEW",
            StepAction::AddProperties => "ADD_PROPERTIES",
        }
    }
}

/// A property to configure, with a value hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedProperty {
    pub name: String,
    pub value: String,
}
