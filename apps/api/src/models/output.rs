use serde::{Deserialize, Serialize};
use serde_json::Number;

/// The normalized resume record produced once the wizard is finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOutput {
    pub personal_data: PersonalData,
    pub education_data: Vec<Institution>,
    pub experience_data: Vec<Institution>,
    pub social_data: Vec<SocialLink>,
    pub hobby_data: Vec<Hobby>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    pub full_name: String,
    pub address: String,
    pub bio: String,
    pub position: String,
    /// `None` when the raw input was not numeric. Whole numbers are kept as
    /// integers.
    pub phone: Option<Number>,
    pub website: String,
    pub email: String,
}

/// A school or an employer. Education and experience share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub description: String,
    pub position: String,
    pub name: String,
    /// `None` is an invalid year: the source date was absent or unparseable.
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub link: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hobby {
    pub hobby: String,
}
