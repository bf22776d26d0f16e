//! Engine bindings for the webtop automation bridge
//!
//! Three concerns live here, each a thin delegation to an external engine:
//! - [`session`]: the automation-controlled browser showing the webtop page
//!   (Chrome via CDP), owned by an explicit [`session::SessionManager`]
//! - [`input`]: OS-level mouse and keyboard injection
//! - [`capture`]: desktop screen capture of the primary display
//!
//! Both bridge surfaces (MCP stdio and REST) build on this crate.

pub mod capture;
pub mod input;
pub mod session;

pub use capture::{CaptureError, Screenshot};
pub use input::{InputController, InputError};
pub use session::{SessionError, SessionManager, WebtopSession};
