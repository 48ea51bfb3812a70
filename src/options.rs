use crate::error::AppError;
use crate::types::ApplyScope;

pub const NOTHING_ENABLED_MESSAGE: &str =
    "At least one feature must be enabled. Cannot disable all options.";

/// Selective application flags of the suggest commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectiveOptions {
    pub labels_only: bool,
    pub description_only: bool,
    pub no_labels: bool,
    pub no_description: bool,
}

impl From<ApplyScope> for SelectiveOptions {
    fn from(scope: ApplyScope) -> Self {
        match scope {
            ApplyScope::Both => SelectiveOptions::default(),
            ApplyScope::LabelsOnly => SelectiveOptions {
                labels_only: true,
                ..Default::default()
            },
            ApplyScope::DescriptionOnly => SelectiveOptions {
                description_only: true,
                ..Default::default()
            },
        }
    }
}

/// Which fields of the update payload are in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub apply_labels: bool,
    pub apply_description: bool,
}

impl Scope {
    pub fn features(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.apply_labels {
            out.push("labels");
        }
        if self.apply_description {
            out.push("description");
        }
        out
    }
}

/// Resolve flags into a scope. `labels_only` together with `description_only`
/// enables both; disabling both features is an error.
pub fn resolve(options: &SelectiveOptions) -> Result<Scope, AppError> {
    let apply_labels = !options.no_labels && (options.labels_only || !options.description_only);
    let apply_description =
        !options.no_description && (options.description_only || !options.labels_only);
    if !apply_labels && !apply_description {
        return Err(AppError::public(NOTHING_ENABLED_MESSAGE));
    }
    Ok(Scope {
        apply_labels,
        apply_description,
    })
}
