//! Counter allocation, startup synchronization and end-to-end short-ID scenarios.

mod support;
mod allocation;
mod sync;
mod scenarios;
