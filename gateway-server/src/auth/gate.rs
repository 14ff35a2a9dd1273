use crate::auth::AuthError;
use crate::models::Identity;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Permission policy for a route: the set of permissions a caller must hold.
///
/// An empty set only requires the caller to be authenticated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionGate {
    required: Arc<BTreeSet<String>>,
}

impl PermissionGate {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: Arc::new(required.into_iter().map(Into::into).collect()),
        }
    }

    /// A gate that admits any authenticated identity
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    /// Required permissions the identity does not hold, in sorted order
    pub fn missing(&self, identity: &Identity) -> Vec<String> {
        self.required
            .iter()
            .filter(|permission| !identity.has_permission(permission))
            .cloned()
            .collect()
    }

    /// Admits the identity, handing it back unchanged, or rejects it with the
    /// list of missing permissions
    pub fn check(&self, identity: Identity) -> Result<Identity, AuthError> {
        debug!(
            "Checking permissions {:?} of '{}' against required {:?}",
            identity.permissions, identity.subject, self.required
        );

        let missing = self.missing(&identity);
        if !missing.is_empty() {
            warn!(
                "User '{}' is missing permissions {:?}",
                identity.subject, missing
            );
            return Err(AuthError::Authorization { missing });
        }
        Ok(identity)
    }
}
