//! Typed forms of the small unions that worldgen documents embed. Documents
//! themselves stay as [`serde_json::Value`]; these types are for code that
//! wants to read one field with its invariants guaranteed.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::as_integer;

/// A Y coordinate relative to the world's absolute origin, its bottom or its
/// top. Serialized as an object with exactly one of the three keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAnchor {
    Absolute(i32),
    AboveBottom(i32),
    BelowTop(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorError {
    NotAnObject,
    NoKey,
    ManyKeys(Vec<String>),
    NotInteger(String),
    Unexpected(String),
}

const ANCHOR_KEYS: [&str; 3] = ["absolute", "above_bottom", "below_top"];

impl VerticalAnchor {
    /// Read an anchor, reporting exactly why a value is not one.
    pub fn from_value(value: &Value) -> Result<Self, AnchorError> {
        let map = value.as_object().ok_or(AnchorError::NotAnObject)?;

        if let Some(key) = map.keys().find(|k| !ANCHOR_KEYS.contains(&k.as_str())) {
            return Err(AnchorError::Unexpected(key.clone()));
        }

        let present: Vec<&String> = map.keys().collect();
        let key = match present.as_slice() {
            [] => return Err(AnchorError::NoKey),
            [key] => key.as_str(),
            many => {
                let mut keys: Vec<String> = many.iter().map(|k| k.to_string()).collect();
                keys.sort();
                return Err(AnchorError::ManyKeys(keys));
            }
        };

        let y = as_integer(&map[key])
            .and_then(|y| i32::try_from(y).ok())
            .ok_or_else(|| AnchorError::NotInteger(key.to_owned()))?;

        Ok(match key {
            "absolute" => VerticalAnchor::Absolute(y),
            "above_bottom" => VerticalAnchor::AboveBottom(y),
            _ => VerticalAnchor::BelowTop(y),
        })
    }
}

/// An integer that is either a literal or drawn from a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntProvider {
    Constant(i32),
    Distribution(IntDistribution),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IntDistribution {
    #[serde(rename = "minecraft:constant")]
    Constant { value: i32 },
    #[serde(rename = "minecraft:uniform")]
    Uniform { min_inclusive: i32, max_inclusive: i32 },
    #[serde(rename = "minecraft:biased_to_bottom")]
    BiasedToBottom { min_inclusive: i32, max_inclusive: i32 },
    #[serde(rename = "minecraft:clamped")]
    Clamped {
        source: Box<IntProvider>,
        min_inclusive: i32,
        max_inclusive: i32,
    },
    #[serde(rename = "minecraft:clamped_normal")]
    ClampedNormal {
        mean: f32,
        deviation: f32,
        min_inclusive: i32,
        max_inclusive: i32,
    },
    #[serde(rename = "minecraft:weighted_list")]
    WeightedList { distribution: Vec<Weighted> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weighted {
    pub data: IntProvider,
    pub weight: u32,
}

impl IntProvider {
    /// The smallest and largest value the provider can produce, or `None` if
    /// its bounds are inverted or it is an empty weighted list.
    pub fn range(&self) -> Option<(i32, i32)> {
        use IntDistribution::*;
        let (min, max) = match self {
            IntProvider::Constant(v) | IntProvider::Distribution(Constant { value: v }) => (*v, *v),
            IntProvider::Distribution(Uniform {
                min_inclusive,
                max_inclusive,
            })
            | IntProvider::Distribution(BiasedToBottom {
                min_inclusive,
                max_inclusive,
            })
            | IntProvider::Distribution(ClampedNormal {
                min_inclusive,
                max_inclusive,
                ..
            }) => (*min_inclusive, *max_inclusive),
            IntProvider::Distribution(Clamped {
                source,
                min_inclusive,
                max_inclusive,
            }) => {
                let (lo, hi) = source.range()?;
                (lo.max(*min_inclusive), hi.min(*max_inclusive))
            }
            IntProvider::Distribution(WeightedList { distribution }) => {
                let mut ranges = distribution.iter().map(|w| w.data.range());
                let first = ranges.next()??;
                ranges.try_fold(first, |(lo, hi), r| {
                    let (l, h) = r?;
                    Some((lo.min(l), hi.max(h)))
                })?
            }
        };
        (min <= max).then(|| (min, max))
    }
}
