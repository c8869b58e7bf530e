//! Entity-specific command handlers.
//!
//! One file per command, each exporting `COMMAND`, `guard` and `handle`.
//! Registered with `register_handlers!` in `app::build_service`.

pub type Repo = crate::app::RetailRepository;

pub mod branch_by_location;
pub mod customer_by_email;
pub mod customer_count_by_branch;
pub mod order_by_branch;
pub mod order_by_customer;
pub mod order_set_status;
pub mod order_stats_by_branch;
pub mod product_by_branch;
pub mod product_count_by_branch;
pub mod product_request_restock;
pub mod product_restock;
pub mod product_sell;
