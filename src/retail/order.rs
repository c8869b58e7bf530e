use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{ShortIdentified, Timestamps};
use crate::short_id::ShortIdFormat;
use crate::Document;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// A sale of one product to one customer. Short ID: `ORD-0001`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "orders")]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: String,
    pub customer_short_id: String,
    #[serde(default)]
    pub branch_short_id: String,
    pub product_short_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub transaction_status: TransactionStatus,
    #[serde(
        rename = "orderShortID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    #[document(unique)]
    pub order_short_id: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Order {
    pub fn new(
        customer_short_id: impl Into<String>,
        product_short_id: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            customer_short_id: customer_short_id.into(),
            product_short_id: product_short_id.into(),
            quantity,
            ..Self::default()
        }
    }
}

impl ShortIdentified for Order {
    const SEQUENCE: &'static str = "orderCounter";
    const FORMAT: ShortIdFormat = ShortIdFormat::ORDER;
    const SHORT_ID_FIELD: &'static str = "orderShortID";
    const SHORT_ID_KEY: &'static str = "order_short_id";

    fn short_id(&self) -> Option<&str> {
        self.order_short_id.as_deref()
    }

    fn set_short_id(&mut self, short_id: String) {
        self.order_short_id = Some(short_id);
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }

    /// Orders are dated at first save unless the caller supplied a date.
    fn before_save(&mut self, now: DateTime<Utc>) {
        self.order_date.get_or_insert(now);
    }
}
