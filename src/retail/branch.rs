use serde::{Deserialize, Serialize};

use crate::entity::Timestamps;
use crate::Document;

/// A shop location. Short ID: `PAI007`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "branches")]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(default)]
    pub id: String,
    pub branch_location: String,
    pub branch_region: String,
    #[serde(default)]
    pub branch_mobile_number: String,
    #[serde(default)]
    #[document(unique)]
    pub branch_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[document(unique)]
    pub branch_short_id: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Branch {
    pub fn new(location: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            branch_location: location.into(),
            branch_region: region.into(),
            ..Self::default()
        }
    }
}

super::short_identified!(Branch, branch_short_id, "branchShortId", "branchCounter", BRANCH);
