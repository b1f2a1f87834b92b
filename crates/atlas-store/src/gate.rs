use async_trait::async_trait;

/// A mutation that requires authorization before touching the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteAction {
    /// Replace an asset's chunk set.
    ReplaceAsset,
    /// Add a region annotation.
    AddRegion,
    /// Delete a region annotation.
    DeleteRegion,
}

impl std::fmt::Display for WriteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReplaceAsset => write!(f, "replace-asset"),
            Self::AddRegion => write!(f, "add-region"),
            Self::DeleteRegion => write!(f, "delete-region"),
        }
    }
}

/// Authorization boundary consulted before every store mutation.
///
/// The actual session/login flow is an external collaborator; Atlas only
/// needs the yes/no answer. When the answer is no, the operation fails with
/// a denied error and zero store mutation — redirecting the user to an
/// authentication flow is the caller's concern.
#[async_trait]
pub trait AccessGate: Send + Sync {
    async fn is_authorized(&self, action: WriteAction) -> bool;
}

/// Gate that authorizes every action. Suitable for single-user embedding
/// and tests.
pub struct AllowAll;

#[async_trait]
impl AccessGate for AllowAll {
    async fn is_authorized(&self, _action: WriteAction) -> bool {
        true
    }
}

/// Gate that refuses every action.
pub struct DenyAll;

#[async_trait]
impl AccessGate for DenyAll {
    async fn is_authorized(&self, _action: WriteAction) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allow_all_permits_everything() {
        let gate = AllowAll;
        assert!(gate.is_authorized(WriteAction::ReplaceAsset).await);
        assert!(gate.is_authorized(WriteAction::AddRegion).await);
        assert!(gate.is_authorized(WriteAction::DeleteRegion).await);
    }

    #[tokio::test]
    async fn deny_all_refuses_everything() {
        let gate = DenyAll;
        assert!(!gate.is_authorized(WriteAction::ReplaceAsset).await);
    }

    #[test]
    fn action_display() {
        assert_eq!(WriteAction::ReplaceAsset.to_string(), "replace-asset");
        assert_eq!(WriteAction::AddRegion.to_string(), "add-region");
        assert_eq!(WriteAction::DeleteRegion.to_string(), "delete-region");
    }
}
