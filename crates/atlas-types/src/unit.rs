use serde::{Deserialize, Serialize};

/// Read-only projection of an entry in the external unit directory.
///
/// The directory itself is an external collaborator; Atlas only consults the
/// `area_code` attribute to count units per region label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRef {
    pub id: String,
    /// The region code this unit is assigned to; empty if unassigned.
    #[serde(default)]
    pub area_code: String,
}

impl UnitRef {
    pub fn new(id: impl Into<String>, area_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            area_code: area_code.into(),
        }
    }
}
