use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    SelectList,
    MasonryGallery,
    Buttons,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub img: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonItem {
    pub id: String,
    pub label: String,
}

/// Kind-specific configuration of one visual element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    SelectList {
        values: Vec<OptionItem>,
    },
    MasonryGallery {
        values: Vec<GalleryItem>,
        /// Column count.
        size: u32,
    },
    Buttons {
        values: Vec<ButtonItem>,
    },
}

/// Fresh opaque id for a list entry.
pub fn new_item_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl ElementKind {
    /// The single-entry payload an element starts with on first mount.
    pub fn default_payload(self) -> Payload {
        match self {
            ElementKind::SelectList => Payload::SelectList {
                values: vec![OptionItem {
                    id: new_item_id(),
                    value: "Text".to_string(),
                }],
            },
            ElementKind::MasonryGallery => Payload::MasonryGallery {
                values: vec![GalleryItem {
                    id: new_item_id(),
                    img: String::new(),
                    title: String::new(),
                }],
                size: 1,
            },
            ElementKind::Buttons => Payload::Buttons {
                values: vec![ButtonItem {
                    id: new_item_id(),
                    label: String::new(),
                }],
            },
        }
    }
}

impl Payload {
    pub fn kind(&self) -> ElementKind {
        match self {
            Payload::SelectList { .. } => ElementKind::SelectList,
            Payload::MasonryGallery { .. } => ElementKind::MasonryGallery,
            Payload::Buttons { .. } => ElementKind::Buttons,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Payload::SelectList { values } => values.len(),
            Payload::MasonryGallery { values, .. } => values.len(),
            Payload::Buttons { values } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values that must be pairwise distinct, or `None` for kinds without
    /// that constraint.
    fn unique_values(&self) -> Option<Vec<&str>> {
        match self {
            Payload::SelectList { values } => Some(values.iter().map(|v| v.value.trim()).collect()),
            Payload::Buttons { values } => Some(values.iter().map(|v| v.label.trim()).collect()),
            Payload::MasonryGallery { .. } => None,
        }
    }

    /// Every value that appears more than once, in first-repeat order.
    pub fn duplicates(&self) -> Vec<String> {
        let Some(values) = self.unique_values() else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut repeated = Vec::new();
        for value in values {
            if !seen.insert(value) && !repeated.iter().any(|r: &String| r.as_str() == value) {
                repeated.push(value.to_string());
            }
        }
        repeated
    }
}
