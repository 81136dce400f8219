use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed set of post categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fiction,
    Nonfiction,
    Technology,
    Science,
    Travel,
    Food,
    Lifestyle,
    Opinion,
}

impl Category {
    /// Lower-case names accepted on input.
    pub const NAMES: &'static [&'static str] = &[
        "fiction",
        "nonfiction",
        "technology",
        "science",
        "travel",
        "food",
        "lifestyle",
        "opinion",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fiction => "fiction",
            Category::Nonfiction => "nonfiction",
            Category::Technology => "technology",
            Category::Science => "science",
            Category::Travel => "travel",
            Category::Food => "food",
            Category::Lifestyle => "lifestyle",
            Category::Opinion => "opinion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fiction" => Ok(Category::Fiction),
            "nonfiction" => Ok(Category::Nonfiction),
            "technology" => Ok(Category::Technology),
            "science" => Ok(Category::Science),
            "travel" => Ok(Category::Travel),
            "food" => Ok(Category::Food),
            "lifestyle" => Ok(Category::Lifestyle),
            "opinion" => Ok(Category::Opinion),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}
