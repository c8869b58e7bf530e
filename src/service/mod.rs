//! Command-dispatch microservice layer.
//!
//! Build a service by registering command handlers on a `Service`. Each
//! handler receives a `Context<R>` with the input payload and the repository.
//!
//! ## Handler Convention
//!
//! Each handler file exports:
//!
//! ```ignore
//! pub const COMMAND: &str = "product.sell";
//!
//! pub fn guard(ctx: &Context<Repo>) -> bool {
//!     ctx.has_fields(&["shortId", "quantity"])
//! }
//!
//! pub fn handle(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
//!     // ...
//! }
//! ```

mod context;
mod error;
mod service;

pub use context::Context;
pub use error::HandlerError;
pub use service::{CommandRequest, CommandResponse, Service};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export `COMMAND`, `guard` and `handle`.
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
