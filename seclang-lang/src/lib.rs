// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Scanner, parser and diagnostics for SecLang rule files as understood by Coraza.
//!
//! ```
//! use seclang_lang::{parse, DirectiveKind, SourceBuffer};
//!
//! let source = SourceBuffer::new("rules.conf", r#"SecRule ARGS "@rx attack" "id:1,deny""#);
//! let root = parse(&source).unwrap();
//! assert_eq!(root.directives[0].keyword, DirectiveKind::SecRule);
//! assert_eq!(root.directives[0].options.len(), 3);
//! ```
//!

pub mod rules;

pub use rules::diagnostic::{Diagnostic, Severity, SourceBuffer};
pub use rules::errors::{Error, ErrorKind};
pub use rules::exprs::{Directive, DirectiveOption, ParseRoot};
pub use rules::file::{parse, parse_bytes, parse_with};
pub use rules::keywords::DirectiveKind;
pub use rules::parser::{Emission, ParserConfig};
