//! Ergonomic tool annotations for the Android tools

use rmcp::model::ToolAnnotations;
use strum::AsRefStr;

/// Tool categories for logical grouping and sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, AsRefStr)]
pub enum ToolCategory {
    #[strum(serialize = "App")]
    App,
    #[strum(serialize = "Device")]
    Device,
    #[strum(serialize = "Emulator")]
    Emulator,
    #[strum(serialize = "File")]
    File,
    #[strum(serialize = "Logging")]
    Logging,
    #[strum(serialize = "SDK")]
    Sdk,
}

/// Describes how a tool interacts with its environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentImpact {
    /// Tool only reads data, does not modify environment
    ReadOnly,
    /// Tool destroys/removes data, safe to repeat with same args
    DestructiveIdempotent,
    /// Tool destroys/removes data, may have side effects if repeated
    DestructiveNonIdempotent,
    /// Tool adds/updates data, safe to repeat with same args
    AdditiveIdempotent,
    /// Tool adds/creates new data, creates new things if repeated
    AdditiveNonIdempotent,
}

/// Describes the domain of interaction for a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainOfInteraction {
    /// Tool reaches outside the local machine and its attached devices
    OpenWorld,
    /// Tool operates on local SDK state and attached devices
    LocalOnly,
}

/// Annotations attached to every tool definition
#[derive(Debug, Clone)]
pub struct Annotation {
    pub title:                 String,
    pub category:              ToolCategory,
    pub environment_impact:    EnvironmentImpact,
    pub domain_of_interaction: DomainOfInteraction,
}

impl Annotation {
    pub fn new(
        title: impl Into<String>,
        category: ToolCategory,
        environment_impact: EnvironmentImpact,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            environment_impact,
            domain_of_interaction: DomainOfInteraction::LocalOnly,
        }
    }

    pub const fn with_domain(mut self, domain: DomainOfInteraction) -> Self {
        self.domain_of_interaction = domain;
        self
    }

    /// `Category: Title`
    pub fn full_title(&self) -> String {
        format!("{}: {}", self.category.as_ref(), self.title)
    }
}

impl From<Annotation> for ToolAnnotations {
    fn from(annotation: Annotation) -> Self {
        // (read only, destructive, idempotent); read-only tools leave the other two unset
        let (read_only, hints) = match annotation.environment_impact {
            EnvironmentImpact::ReadOnly => (true, None),
            EnvironmentImpact::DestructiveIdempotent | EnvironmentImpact::AdditiveIdempotent => {
                // MCP client requires destructive_hint: Some(true) to show annotations
                (false, Some((true, true)))
            }
            EnvironmentImpact::DestructiveNonIdempotent
            | EnvironmentImpact::AdditiveNonIdempotent => (false, Some((true, false))),
        };

        let open_world = match annotation.domain_of_interaction {
            DomainOfInteraction::OpenWorld => true,
            DomainOfInteraction::LocalOnly => false,
        };

        let annotations = Self::with_title(annotation.full_title())
            .read_only(read_only)
            .open_world(open_world);
        match hints {
            Some((destructive, idempotent)) => {
                annotations.destructive(destructive).idempotent(idempotent)
            }
            None => annotations,
        }
    }
}
