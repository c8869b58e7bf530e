use serde::{Deserialize, Serialize};

use crate::entity::Timestamps;
use crate::Document;

/// A customer registered at one branch. Short ID: `2024CUST00001`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "customers")]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub id: String,
    pub customer_name: String,
    #[document(unique)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    pub branch_short_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[document(unique)]
    pub customer_short_id: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        branch_short_id: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: name.into(),
            customer_email: email.into(),
            branch_short_id: branch_short_id.into(),
            ..Self::default()
        }
    }
}

super::short_identified!(
    Customer,
    customer_short_id,
    "customerShortId",
    "customerCounter",
    CUSTOMER
);
