//! The fixed set of emotions the service can report.

mod catalog;

pub use catalog::{EmotionInfo, INFO_ANGRY, INFO_FEARFUL, INFO_HAPPY, INFO_SAD};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Emotion label. Serialized as the Indonesian tag used on the wire.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Emotion {
    #[default]
    #[serde(rename = "bahagia")]
    Happy,
    #[serde(rename = "sedih")]
    Sad,
    #[serde(rename = "marah")]
    Angry,
    #[serde(rename = "takut")]
    Fearful,
}

impl Emotion {
    /// Enumeration order. Also the classifier's class-index order and the
    /// tie-break order of the keyword scorer.
    pub const ALL: [Emotion; 4] = [Self::Happy, Self::Sad, Self::Angry, Self::Fearful];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Happy => "bahagia",
            Self::Sad => "sedih",
            Self::Angry => "marah",
            Self::Fearful => "takut",
        }
    }

    pub fn info(self) -> &'static EmotionInfo {
        match self {
            Self::Happy => &INFO_HAPPY,
            Self::Sad => &INFO_SAD,
            Self::Angry => &INFO_ANGRY,
            Self::Fearful => &INFO_FEARFUL,
        }
    }

    /// Map a model output class to an emotion
    pub fn from_class_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned when a string is not one of the emotion tags
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion: {0}")]
pub struct UnknownEmotion(pub String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.tag() == s)
            .ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}

/// The full emotion table keyed by tag, in sorted key order.
pub fn catalog() -> BTreeMap<&'static str, &'static EmotionInfo> {
    Emotion::ALL.iter().map(|e| (e.tag(), e.info())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for emotion in Emotion::ALL {
            assert_eq!(emotion.tag().parse::<Emotion>().unwrap(), emotion);
            assert_eq!(emotion.to_string(), emotion.tag());
        }
        assert!("happy".parse::<Emotion>().is_err());
        assert!("Bahagia".parse::<Emotion>().is_err());
    }

    #[test]
    fn test_class_index_mapping() {
        assert_eq!(Emotion::from_class_index(0), Some(Emotion::Happy));
        assert_eq!(Emotion::from_class_index(1), Some(Emotion::Sad));
        assert_eq!(Emotion::from_class_index(2), Some(Emotion::Angry));
        assert_eq!(Emotion::from_class_index(3), Some(Emotion::Fearful));
        assert_eq!(Emotion::from_class_index(4), None);
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_class_index(emotion.index()), Some(emotion));
        }
    }

    #[test]
    fn test_serde_uses_tags() {
        let json = serde_json::to_string(&Emotion::Fearful).unwrap();
        assert_eq!(json, "\"takut\"");
        let decoded: Emotion = serde_json::from_str("\"sedih\"").unwrap();
        assert_eq!(decoded, Emotion::Sad);
    }

    #[test]
    fn test_catalog_has_every_emotion() {
        let table = catalog();
        assert_eq!(table.len(), 4);
        assert_eq!(table["bahagia"].name, "Bahagia");
        assert_eq!(table["takut"].icon, "fas fa-dizzy");

        let keys: Vec<_> = table.keys().copied().collect();
        assert_eq!(keys, vec!["bahagia", "marah", "sedih", "takut"]);
    }
}
