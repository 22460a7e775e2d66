//! Auth-domain identifiers, scope sets, anti-forgery state, PKCE pairs, and credential payloads.

pub mod credential;
pub mod id;
pub mod owner;
pub mod pkce;
pub mod scope;
pub mod state;

pub use credential::*;
pub use id::*;
pub use owner::*;
pub use pkce::*;
pub use scope::*;
pub use state::*;
