//! Tradable instrument symbols.
//!
//! The symbol set is a closed enumeration for now; adding a new
//! tradable instrument means adding a new variant here.

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Abc,
    Xyz,
    Def,
}

impl Symbol {
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Abc => "ABC",
            Symbol::Xyz => "XYZ",
            Symbol::Def => "DEF",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ABC" => Some(Symbol::Abc),
            "XYZ" => Some(Symbol::Xyz),
            "DEF" => Some(Symbol::Def),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
