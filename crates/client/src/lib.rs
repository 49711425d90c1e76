// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! PayU Client - Client library for the PayU Latam API
//!
//! This crate builds well-formed requests for the PayU Latam payments and
//! reporting APIs (tokenization, transaction submission, transaction
//! query), computes the order integrity signature, and dispatches the
//! HTTP calls.
//!
//! The client is designed to be lightweight and embeddable:
//! - No background threads
//! - No retries, timeouts or response interpretation
//! - Validation failures surface before any network call
//!
//! Typical flow: configure, build an order, build a transaction around it,
//! submit. Each build step is a pure transformation.

pub mod card;
pub mod client;
pub mod config;
pub mod signing;
pub mod types;
pub mod validate;

pub use card::{CardType, card_type_from_number, clean_number, generate_reference_code, mask_number};
pub use client::{ClientError, PayuClient, SyncPayuClient};
pub use config::Config;
pub use signing::{build_signature, compute_signature};
pub use types::*;
pub use validate::ConfigurationError;
