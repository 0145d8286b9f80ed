// 👤 Person - Name value shared by directors, actors and users
//
// A person is only a pair of names. Two persons with the same names are
// interchangeable for display, nothing more.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Person {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Complete name: "First Last"
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match against the complete name
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name().to_lowercase().contains(&needle.to_lowercase())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
