//! Retail command service integration tests.

mod support;
mod commands;
mod products;
