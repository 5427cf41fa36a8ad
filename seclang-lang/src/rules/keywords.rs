use std::fmt::Formatter;
use std::str::FromStr;

use indexmap::map::IndexMap;
use lazy_static::lazy_static;
use serde::Serialize;

use crate::rules::errors::Error;

///
/// The closed vocabulary of directive keywords understood by the linter, plus the two
/// sentinels used when every source line has to be accounted for. Keywords are matched
/// exactly and case-sensitively. Adding a keyword is backward compatible, removing one
/// is not.
///
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize)]
pub enum DirectiveKind {
    Include,
    SecAction,
    SecArgumentsLimit,
    SecAuditEngine,
    SecAuditLog,
    SecAuditLogDir,
    SecAuditLogDirMode,
    SecAuditLogFileMode,
    SecAuditLogFormat,
    SecAuditLogParts,
    SecAuditLogRelevantStatus,
    SecDebugLog,
    SecDebugLogLevel,
    SecDefaultAction,
    SecMarker,
    SecRequestBodyAccess,
    SecRequestBodyInMemoryLimit,
    SecRequestBodyLimit,
    SecRequestBodyLimitAction,
    SecRequestBodyNoFilesLimit,
    SecResponseBodyAccess,
    SecResponseBodyLimit,
    SecResponseBodyLimitAction,
    SecRule,
    SecRuleEngine,
    SecRuleRemoveByID,
    SecRuleRemoveByTag,
    SecRuleUpdateTargetByID,
    SecRuleUpdateTargetByTag,

    /// blank or whitespace-only line
    Empty,
    /// line whose first non-whitespace byte is `#`
    Comment,
}

impl DirectiveKind {
    pub const KEYWORDS: [DirectiveKind; 29] = [
        DirectiveKind::Include,
        DirectiveKind::SecAction,
        DirectiveKind::SecArgumentsLimit,
        DirectiveKind::SecAuditEngine,
        DirectiveKind::SecAuditLog,
        DirectiveKind::SecAuditLogDir,
        DirectiveKind::SecAuditLogDirMode,
        DirectiveKind::SecAuditLogFileMode,
        DirectiveKind::SecAuditLogFormat,
        DirectiveKind::SecAuditLogParts,
        DirectiveKind::SecAuditLogRelevantStatus,
        DirectiveKind::SecDebugLog,
        DirectiveKind::SecDebugLogLevel,
        DirectiveKind::SecDefaultAction,
        DirectiveKind::SecMarker,
        DirectiveKind::SecRequestBodyAccess,
        DirectiveKind::SecRequestBodyInMemoryLimit,
        DirectiveKind::SecRequestBodyLimit,
        DirectiveKind::SecRequestBodyLimitAction,
        DirectiveKind::SecRequestBodyNoFilesLimit,
        DirectiveKind::SecResponseBodyAccess,
        DirectiveKind::SecResponseBodyLimit,
        DirectiveKind::SecResponseBodyLimitAction,
        DirectiveKind::SecRule,
        DirectiveKind::SecRuleEngine,
        DirectiveKind::SecRuleRemoveByID,
        DirectiveKind::SecRuleRemoveByTag,
        DirectiveKind::SecRuleUpdateTargetByID,
        DirectiveKind::SecRuleUpdateTargetByTag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveKind::Include => "Include",
            DirectiveKind::SecAction => "SecAction",
            DirectiveKind::SecArgumentsLimit => "SecArgumentsLimit",
            DirectiveKind::SecAuditEngine => "SecAuditEngine",
            DirectiveKind::SecAuditLog => "SecAuditLog",
            DirectiveKind::SecAuditLogDir => "SecAuditLogDir",
            DirectiveKind::SecAuditLogDirMode => "SecAuditLogDirMode",
            DirectiveKind::SecAuditLogFileMode => "SecAuditLogFileMode",
            DirectiveKind::SecAuditLogFormat => "SecAuditLogFormat",
            DirectiveKind::SecAuditLogParts => "SecAuditLogParts",
            DirectiveKind::SecAuditLogRelevantStatus => "SecAuditLogRelevantStatus",
            DirectiveKind::SecDebugLog => "SecDebugLog",
            DirectiveKind::SecDebugLogLevel => "SecDebugLogLevel",
            DirectiveKind::SecDefaultAction => "SecDefaultAction",
            DirectiveKind::SecMarker => "SecMarker",
            DirectiveKind::SecRequestBodyAccess => "SecRequestBodyAccess",
            DirectiveKind::SecRequestBodyInMemoryLimit => "SecRequestBodyInMemoryLimit",
            DirectiveKind::SecRequestBodyLimit => "SecRequestBodyLimit",
            DirectiveKind::SecRequestBodyLimitAction => "SecRequestBodyLimitAction",
            DirectiveKind::SecRequestBodyNoFilesLimit => "SecRequestBodyNoFilesLimit",
            DirectiveKind::SecResponseBodyAccess => "SecResponseBodyAccess",
            DirectiveKind::SecResponseBodyLimit => "SecResponseBodyLimit",
            DirectiveKind::SecResponseBodyLimitAction => "SecResponseBodyLimitAction",
            DirectiveKind::SecRule => "SecRule",
            DirectiveKind::SecRuleEngine => "SecRuleEngine",
            DirectiveKind::SecRuleRemoveByID => "SecRuleRemoveByID",
            DirectiveKind::SecRuleRemoveByTag => "SecRuleRemoveByTag",
            DirectiveKind::SecRuleUpdateTargetByID => "SecRuleUpdateTargetByID",
            DirectiveKind::SecRuleUpdateTargetByTag => "SecRuleUpdateTargetByTag",
            DirectiveKind::Empty => "",
            DirectiveKind::Comment => "#",
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, DirectiveKind::Empty | DirectiveKind::Comment)
    }

    ///
    /// Exact, case-sensitive lookup of a keyword lexeme. Sentinels are never returned.
    ///
    pub fn lookup(lexeme: &str) -> Option<DirectiveKind> {
        KEYWORDS.get(lexeme).copied()
    }
}

lazy_static! {
    static ref KEYWORDS: IndexMap<&'static str, DirectiveKind> = DirectiveKind::KEYWORDS
        .iter()
        .map(|kind| (kind.as_str(), *kind))
        .collect();
}

impl std::fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectiveKind::Empty => f.write_str("<empty>"),
            DirectiveKind::Comment => f.write_str("<comment>"),
            keyword => f.write_str(keyword.as_str()),
        }
    }
}

impl FromStr for DirectiveKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DirectiveKind::lookup(s).ok_or_else(|| Error::UnknownKeyword(s.to_string()))
    }
}
