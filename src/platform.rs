//! Platform-facing descriptors: the capability set a generic flow is parameterized by.
//!
//! `descriptor` exposes validated metadata (`PlatformDescriptor`) covering endpoints,
//! requested scopes, client authentication style, token-request body format, PKCE
//! requirement, fixed authorization parameters, and which item catalog the platform
//! serves. `catalog` ships presets for the three supported platforms.

pub mod catalog;
pub mod descriptor;

pub use descriptor::*;
