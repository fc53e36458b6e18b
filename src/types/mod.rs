// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Value types shared by the resolver, collector and executor.

pub mod outcome;
pub mod secret;
pub mod target;

pub use outcome::{SyncOutcome, SyncReport, SyncStatus};
pub use secret::{SecretEntry, SecretValue};
pub use target::Target;
