use stockpulse_core::OwnerId;

/// Owner context for a request.
///
/// This is immutable and must be present for all owner-scoped routes. It
/// carries identity only; authentication happens upstream.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OwnerContext {
    owner_id: OwnerId,
}

impl OwnerContext {
    pub fn new(owner_id: OwnerId) -> Self {
        Self { owner_id }
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }
}
