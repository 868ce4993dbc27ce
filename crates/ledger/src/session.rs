use std::sync::{PoisonError, RwLock};

/// Read-only view of the active session principal.
///
/// The engine only ever asks "who is signed in right now"; token issuance
/// and session lifecycle stay with the identity provider.
pub trait SessionGate: Send + Sync {
    /// Returns the owner id of the active session, if any.
    fn owner_id(&self) -> Option<String>;
}

/// In-process session holder for binaries and tests.
#[derive(Debug, Default)]
pub struct SessionHandle {
    owner: RwLock<Option<String>>,
}

impl SessionHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, owner: impl Into<String>) {
        *self.owner.write().unwrap_or_else(PoisonError::into_inner) = Some(owner.into());
    }

    pub fn sign_out(&self) {
        *self.owner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl SessionGate for SessionHandle {
    fn owner_id(&self) -> Option<String> {
        self.owner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
