//! Flow ownership: the (tenant, caller) pair that namespaces every stored record.

// self
use crate::{
	_prelude::*,
	auth::{CallerId, TenantId},
};

/// Identifies who a pending flow belongs to.
///
/// Concurrent flows for different owners never share store keys; a second flow for the same
/// owner overwrites the first one's pending records.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowOwner {
	/// Organization that owns the flow.
	pub tenant: TenantId,
	/// End user that initiated the flow.
	pub caller: CallerId,
}
impl FlowOwner {
	/// Creates an owner for the provided tenant and caller.
	pub fn new(tenant: TenantId, caller: CallerId) -> Self {
		Self { tenant, caller }
	}
}
impl Display for FlowOwner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}:{}", self.tenant, self.caller)
	}
}
