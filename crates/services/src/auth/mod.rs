//! Sign-in, sign-out and protected-route checks.

mod guard;
mod resolver;

pub use guard::{Access, RouteGuard};
pub use resolver::{AuthOutcome, SessionResolver, parse_session_fragment};
