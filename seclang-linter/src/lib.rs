// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Command line front end of the SecLang linter. Every sub command implements
//! [`command::Command`] and writes through a [`utils::writer::Writer`] so that it can be
//! driven from tests as well as from `main`.
//!

pub mod command;
pub mod commands;
pub mod config;
pub mod errors;
pub mod utils;

pub use errors::{Error, Result};
