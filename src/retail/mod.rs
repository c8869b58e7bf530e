//! Retail entities and their microservice commands.
//!
//! Four collections carry short IDs, each with its own counter:
//!
//! | Entity   | Collection  | Sequence          | Short-ID field    |
//! |----------|-------------|-------------------|-------------------|
//! | Branch   | `branches`  | `branchCounter`   | `branchShortId`   |
//! | Customer | `customers` | `customerCounter` | `customerShortId` |
//! | Order    | `orders`    | `orderCounter`    | `orderShortID`    |
//! | Product  | `products`  | `productCounter`  | `productShortId`  |

/// Implement `ShortIdentified` for an entity without extra save rules.
macro_rules! short_identified {
    ($ty:ty, $field:ident, $json:literal, $sequence:literal, $format:ident) => {
        impl $crate::entity::ShortIdentified for $ty {
            const SEQUENCE: &'static str = $sequence;
            const FORMAT: $crate::short_id::ShortIdFormat = $crate::short_id::ShortIdFormat::$format;
            const SHORT_ID_FIELD: &'static str = $json;
            const SHORT_ID_KEY: &'static str = stringify!($field);

            fn short_id(&self) -> Option<&str> {
                self.$field.as_deref()
            }

            fn set_short_id(&mut self, short_id: String) {
                self.$field = Some(short_id);
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn timestamps_mut(&mut self) -> &mut $crate::entity::Timestamps {
                &mut self.timestamps
            }
        }
    };
}

pub(crate) use short_identified;

mod branch;
mod commands;
mod customer;
pub mod handlers;
mod order;
mod product;

pub use branch::Branch;
pub use commands::register_entity;
pub use customer::Customer;
pub use order::{Order, TransactionStatus};
pub use product::Product;
