//! Raw wizard input, keyed the way the browser form names its fields.
//!
//! Values are kept exactly as typed (dates and phone included) so the schema
//! can report shape errors; nothing here is trusted until it has been validated.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormState {
    pub full_name: String,
    pub position: String,
    pub address: String,
    pub website: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    pub email: String,
    pub bio: String,
    pub education_data: Vec<EducationInput>,
    pub experience_data: Vec<ExperienceInput>,
    pub social_data: Vec<SocialInput>,
    pub hobby_data: Vec<HobbyInput>,
}

impl Default for FormState {
    /// A fresh form carries one blank entry per list section.
    fn default() -> Self {
        Self {
            full_name: String::new(),
            position: String::new(),
            address: String::new(),
            website: String::new(),
            phone: String::new(),
            email: String::new(),
            bio: String::new(),
            education_data: vec![EducationInput::default()],
            experience_data: vec![ExperienceInput::default()],
            social_data: vec![SocialInput::default()],
            hobby_data: vec![HobbyInput::default()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationInput {
    pub study: String,
    pub degree: String,
    pub school: String,
    #[serde(rename = "educationFromYear", alias = "education-from-year")]
    #[serde(deserialize_with = "lenient_string")]
    pub from_date: String,
    #[serde(rename = "education-to-year", alias = "educationToYear")]
    #[serde(deserialize_with = "lenient_string")]
    pub to_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceInput {
    #[serde(rename = "work-title", alias = "workTitle")]
    pub work_title: String,
    pub company: String,
    #[serde(rename = "experience-from-year", alias = "experienceFromYear")]
    #[serde(deserialize_with = "lenient_string")]
    pub from_date: String,
    #[serde(rename = "experience-to-year", alias = "experienceToYear")]
    #[serde(deserialize_with = "lenient_string")]
    pub to_date: String,
    #[serde(rename = "company-info", alias = "companyInfo")]
    pub company_info: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialInput {
    #[serde(rename = "social-name", alias = "socialName")]
    pub name: String,
    #[serde(rename = "social-link", alias = "socialLink")]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HobbyInput {
    pub label: String,
}

/// Accepts a string, a number or null. Browsers send numeric inputs either way.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
