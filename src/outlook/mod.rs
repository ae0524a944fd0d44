// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Publicly export key modules and types
pub mod client;
pub mod credential;
pub mod error;
pub mod types;

pub use client::{MailApi, OutlookClient, DEFAULT_GRAPH_BASE_URL};
pub use credential::{Credential, CredentialHolder};
pub use error::OutlookError;
pub use types::{ListQuery, Message, DEFAULT_ORDER_BY, DEFAULT_TOP};
