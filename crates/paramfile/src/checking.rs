//! The two-digit checking control code.
//!
//! The ones digit selects type checking, the tens digit selects how much is
//! reported about each parameter. `11` (warn on mismatch, report defaulted
//! parameters) is the default.

use serde::{Deserialize, Serialize};

/// What to do when an override's kind differs from its declared kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeCheck {
    /// Accept the value silently.
    Off,
    /// Accept the value and emit a warning diagnostic.
    Warn,
    /// Abort the load with [`crate::ParamError::TypeMismatch`].
    Strict,
}

/// How much to report about the merged parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Report {
    Silent,
    /// Report the source and every parameter left at its default.
    Defaulted,
    /// Also report every parameter that obtained a value.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Checking {
    code: u32,
}

impl Checking {
    pub const DEFAULT_CODE: u32 = 11;

    pub const fn new(code: u32) -> Self {
        Self { code }
    }

    pub fn from_levels(type_check: TypeCheck, report: Report) -> Self {
        let ones = match type_check {
            TypeCheck::Off => 0,
            TypeCheck::Warn => 1,
            TypeCheck::Strict => 2,
        };
        let tens = match report {
            Report::Silent => 0,
            Report::Defaulted => 1,
            Report::All => 2,
        };
        Self::new(tens * 10 + ones)
    }

    pub fn code(self) -> u32 {
        self.code
    }

    pub fn type_check(self) -> TypeCheck {
        match self.code % 10 {
            0 => TypeCheck::Off,
            1 => TypeCheck::Warn,
            _ => TypeCheck::Strict,
        }
    }

    pub fn report(self) -> Report {
        match self.code / 10 {
            0 => Report::Silent,
            1 => Report::Defaulted,
            _ => Report::All,
        }
    }
}

impl Default for Checking {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CODE)
    }
}

impl From<u32> for Checking {
    fn from(code: u32) -> Self {
        Self::new(code)
    }
}

impl From<Checking> for u32 {
    fn from(checking: Checking) -> Self {
        checking.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_split_into_levels() {
        let c = Checking::default();
        assert_eq!(c.type_check(), TypeCheck::Warn);
        assert_eq!(c.report(), Report::Defaulted);

        assert_eq!(Checking::new(0).type_check(), TypeCheck::Off);
        assert_eq!(Checking::new(0).report(), Report::Silent);
        assert_eq!(Checking::new(12).type_check(), TypeCheck::Strict);
        assert_eq!(Checking::new(29).type_check(), TypeCheck::Strict);
        assert_eq!(Checking::new(29).report(), Report::All);
        assert_eq!(Checking::new(97).report(), Report::All);
    }

    #[test]
    fn levels_compose_back_into_a_code() {
        assert_eq!(Checking::from_levels(TypeCheck::Strict, Report::All).code(), 22);
        assert_eq!(Checking::from_levels(TypeCheck::Off, Report::Silent).code(), 0);
    }
}
