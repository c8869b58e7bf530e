use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{ShortIdentified, Timestamps};
use crate::short_id::ShortIdFormat;
use crate::Document;

fn default_threshold() -> u64 {
    10
}

fn default_restock_quantity() -> u64 {
    20
}

/// A stocked item, listed at one or more branches. Short ID: `PROD-0001`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "products")]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub product_name: String,
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub product_quantity: u64,
    #[serde(default = "default_threshold")]
    pub threshold: u64,
    #[serde(default = "default_restock_quantity")]
    pub restock_quantity: u64,
    /// Derived: `restock_requested || product_quantity <= threshold`.
    #[serde(default)]
    pub needs_restock: bool,
    /// Set by an explicit restock request, cleared by a restock.
    #[serde(default)]
    pub restock_requested: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub actual_price: f64,
    #[serde(default)]
    pub selling_price: f64,
    /// Derived: `selling_price - actual_price`.
    #[serde(default)]
    pub profit: f64,
    #[serde(default)]
    pub branch_short_id: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[document(unique)]
    pub product_short_id: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            product_name: name.into(),
            brand_name: String::new(),
            product_quantity: 0,
            threshold: default_threshold(),
            restock_quantity: default_restock_quantity(),
            needs_restock: false,
            restock_requested: false,
            description: String::new(),
            category: String::new(),
            actual_price: 0.0,
            selling_price: 0.0,
            profit: 0.0,
            branch_short_id: Vec::new(),
            product_short_id: None,
            timestamps: Timestamps::default(),
        }
    }

    pub fn at_branch(mut self, branch_short_id: impl Into<String>) -> Self {
        self.branch_short_id.push(branch_short_id.into());
        self
    }

    pub fn with_stock(mut self, quantity: u64) -> Self {
        self.product_quantity = quantity;
        self
    }

    pub fn priced(mut self, actual_price: f64, selling_price: f64) -> Self {
        self.actual_price = actual_price;
        self.selling_price = selling_price;
        self
    }

    pub fn is_listed_at(&self, branch_short_id: &str) -> bool {
        self.branch_short_id.iter().any(|branch| branch == branch_short_id)
    }
}

impl ShortIdentified for Product {
    const SEQUENCE: &'static str = "productCounter";
    const FORMAT: ShortIdFormat = ShortIdFormat::PRODUCT;
    const SHORT_ID_FIELD: &'static str = "productShortId";
    const SHORT_ID_KEY: &'static str = "product_short_id";

    fn short_id(&self) -> Option<&str> {
        self.product_short_id.as_deref()
    }

    fn set_short_id(&mut self, short_id: String) {
        self.product_short_id = Some(short_id);
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }

    fn before_save(&mut self, _now: DateTime<Utc>) {
        self.profit = self.selling_price - self.actual_price;
        self.needs_restock = self.restock_requested || self.product_quantity <= self.threshold;
    }
}
