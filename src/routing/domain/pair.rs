//! Two-host selection result.

use crate::host_url::HostUrl;
use serde::Serialize;

/// Two backends chosen for comparison or load splitting.
///
/// Both halves hold the same URL when only one candidate exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostPair {
    primary: HostUrl,
    secondary: HostUrl,
}

impl HostPair {
    /// Creates a pair from two hosts.
    #[must_use]
    pub const fn new(primary: HostUrl, secondary: HostUrl) -> Self {
        Self { primary, secondary }
    }

    /// Creates a pair that repeats one host.
    #[must_use]
    pub fn repeated(host: HostUrl) -> Self {
        Self::new(host.clone(), host)
    }

    /// Returns the first host.
    #[must_use]
    pub const fn primary(&self) -> &HostUrl {
        &self.primary
    }

    /// Returns the second host.
    #[must_use]
    pub const fn secondary(&self) -> &HostUrl {
        &self.secondary
    }

    /// Returns `true` when both halves are the same host.
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        self.primary == self.secondary
    }

    /// Consumes the pair, returning both hosts.
    #[must_use]
    pub fn into_parts(self) -> (HostUrl, HostUrl) {
        (self.primary, self.secondary)
    }
}
