use serde::{Deserialize, Serialize};

use crate::schema::resume::{
    EDUCATION_LIST, EXPERIENCE_LIST, HOBBY_LIST, PERSONAL_FIELDS, SOCIAL_LIST,
};

/// Where a step sits relative to the current one. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Done,
    Active,
    Next,
}

/// Pure function of the two indices; call it on every render.
pub fn status_of(index: usize, current: usize) -> StepStatus {
    use std::cmp::Ordering;
    match index.cmp(&current) {
        Ordering::Less => StepStatus::Done,
        Ordering::Equal => StepStatus::Active,
        Ordering::Greater => StepStatus::Next,
    }
}

/// One wizard page and the top-level form names it gates.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub title: &'static str,
    pub fields: Vec<&'static str>,
}

/// Personal info, education, experience, social, hobbies, photo.
/// The photo step gates nothing, so it always passes.
pub fn resume_steps() -> Vec<Step> {
    vec![
        Step {
            title: "Personal Info",
            fields: PERSONAL_FIELDS.to_vec(),
        },
        Step {
            title: "Education",
            fields: vec![EDUCATION_LIST],
        },
        Step {
            title: "Experience",
            fields: vec![EXPERIENCE_LIST],
        },
        Step {
            title: "Social",
            fields: vec![SOCIAL_LIST],
        },
        Step {
            title: "Hobbies",
            fields: vec![HOBBY_LIST],
        },
        Step {
            title: "Photo",
            fields: vec![],
        },
    ]
}
