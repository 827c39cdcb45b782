use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CircleError, CircleResult};

/// Inner-shape control value: `none`, `random`, `polygon_N` or `star_N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ShapeSelector {
    None,
    #[default]
    Random,
    Polygon(u32),
    Star(u32),
}

impl FromStr for ShapeSelector {
    type Err = CircleError;

    fn from_str(input: &str) -> CircleResult<Self> {
        let token = input.trim().to_ascii_lowercase();
        match token.as_str() {
            "none" => return Ok(Self::None),
            "random" => return Ok(Self::Random),
            _ => {}
        }

        let invalid = || CircleError::InvalidData(format!("invalid inner-shape selector `{input}`"));
        let (kind, count) = token.split_once('_').ok_or_else(invalid)?;
        let count: u32 = count.parse().map_err(|_| invalid())?;
        match kind {
            "polygon" => Ok(Self::Polygon(count)),
            "star" => Ok(Self::Star(count)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for ShapeSelector {
    type Error = CircleError;

    fn try_from(value: String) -> CircleResult<Self> {
        value.parse()
    }
}

impl From<ShapeSelector> for String {
    fn from(value: ShapeSelector) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ShapeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Random => f.write_str("random"),
            Self::Polygon(sides) => write!(f, "polygon_{sides}"),
            Self::Star(points) => write!(f, "star_{points}"),
        }
    }
}
