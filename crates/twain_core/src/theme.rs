//! The two classification axes of a question group.

use serde::{Deserialize, Serialize};

/// Top-level prompt category.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use twain_core::Theme;
///
/// assert_eq!(Theme::from_str("memories").unwrap(), Theme::Memories);
/// assert_eq!(Theme::Playful.to_string(), "playful");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Talking, listening, handling conflict
    Communication,
    /// Closeness and affection
    Intimacy,
    /// Shared and personal history
    Memories,
    /// Plans and hopes for the future
    Dreams,
    /// Light-hearted hypotheticals
    Playful,
    /// Beliefs and priorities
    Values,
}

/// How personal the questions get.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Easy openers
    Light,
    /// Some vulnerability
    Medium,
    /// Vulnerable, reflective
    Deep,
}
