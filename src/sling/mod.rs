//! Minimal Sling client backing the console's `$s` and `$um` handles.
//!
//! - `Session` holds the server URL, the HTTP client and the credentials of
//!   the user requests are currently made as.
//! - `UserManager` drives the `/system/userManager` servlets through a shared
//!   session; it can only be built from one.

mod reply;
mod session;
mod transport;
mod users;

pub use reply::HttpReply;
pub use session::{Credentials, Session};
pub use users::{PrincipalKind, User, UserManager, DEFAULT_USER_PASSWORD};
