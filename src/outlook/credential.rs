// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! In-memory holder for the Graph bearer token.
//!
//! One token is live at a time. It is never written to disk and never logged;
//! a process restart forgets it.
//!
//! The holder is shared by every front-end through an `Arc`. The `RwLock` only
//! makes the slot swap memory-safe: nothing orders a `set` against an
//! operation already in flight. An outbound call uses whichever token is
//! current at the instant it calls [`CredentialHolder::current`].

use std::fmt;
use std::sync::RwLock;

use super::error::OutlookError;

/// An opaque bearer token. `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Default)]
pub struct CredentialHolder {
    slot: RwLock<Option<Credential>>,
}

impl CredentialHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `token`, replacing any previous value.
    pub fn set(&self, token: impl Into<String>) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(Credential::new(token));
    }

    /// The token currently held, or `MissingCredential`.
    pub fn current(&self) -> Result<Credential, OutlookError> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or(OutlookError::MissingCredential)
    }

    pub fn is_set(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }
}

impl fmt::Debug for CredentialHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHolder")
            .field("is_set", &self.is_set())
            .finish()
    }
}
