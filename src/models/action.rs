use crate::error::FileHandlerError;
use std::fmt;
use std::str::FromStr;

/// The fixed set of actions a configuration may name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Mkdir,
    /// Deprecated alias of [`Action::CopyReq`], kept for older configurations.
    /// Use `copy_req` or `copy_opt` instead.
    Copy,
    CopyReq,
    CopyOpt,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Mkdir, Action::Copy, Action::CopyReq, Action::CopyOpt];

    pub fn name(self) -> &'static str {
        match self {
            Action::Mkdir => "mkdir",
            Action::Copy => "copy",
            Action::CopyReq => "copy_req",
            Action::CopyOpt => "copy_opt",
        }
    }

    pub fn is_deprecated(self) -> bool {
        matches!(self, Action::Copy)
    }

    /// Whether a missing source aborts the batch
    pub fn requires_source(self) -> bool {
        matches!(self, Action::Copy | Action::CopyReq)
    }
}

impl FromStr for Action {
    type Err = FileHandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| FileHandlerError::UnknownAction {
                action: s.to_string(),
            })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_actions() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_parse_unknown_action() {
        let err = "link".parse::<Action>().unwrap_err();
        assert!(matches!(err, FileHandlerError::UnknownAction { ref action } if action == "link"));
    }

    #[test]
    fn test_copy_alias_is_required_and_deprecated() {
        assert!(Action::Copy.requires_source());
        assert!(Action::Copy.is_deprecated());
        assert!(Action::CopyReq.requires_source());
        assert!(!Action::CopyOpt.requires_source());
        assert!(!Action::CopyReq.is_deprecated());
    }
}
