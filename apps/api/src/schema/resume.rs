use super::{FieldSpec, FormSchema, Rule, REQUIRED_MESSAGE};

pub const PERSONAL_FIELDS: &[&str] = &[
    "fullName", "position", "address", "website", "phone", "email", "bio",
];
pub const EDUCATION_LIST: &str = "educationData";
pub const EXPERIENCE_LIST: &str = "experienceData";
pub const SOCIAL_LIST: &str = "socialData";
pub const HOBBY_LIST: &str = "hobbyData";

fn required(name: &str) -> FieldSpec {
    FieldSpec::new(name).required(REQUIRED_MESSAGE)
}

fn short_text(name: &str) -> FieldSpec {
    required(name).rule(Rule::MinLength(3)).rule(Rule::MaxLength(20))
}

fn date(name: &str) -> FieldSpec {
    required(name).rule(Rule::Date)
}

/// The resume wizard's schema, keyed by the form's own field names.
pub fn resume_schema() -> FormSchema {
    FormSchema::default()
        .field(short_text("fullName"))
        .field(short_text("position"))
        .field(short_text("address"))
        .field(required("website").rule(Rule::Url))
        .field(
            required("phone")
                .rule(Rule::Number)
                .message("Amount must be a number")
                .rule(Rule::Min(0.0))
                .message("Too little"),
        )
        .field(required("email").rule(Rule::Email))
        .field(required("bio"))
        .list(
            EDUCATION_LIST,
            true,
            vec![
                required("study"),
                required("degree"),
                required("school"),
                date("educationFromYear"),
                date("education-to-year"),
            ],
        )
        .list(
            EXPERIENCE_LIST,
            true,
            vec![
                required("work-title"),
                required("company"),
                date("experience-from-year"),
                date("experience-to-year"),
                required("company-info"),
            ],
        )
        .list(
            SOCIAL_LIST,
            false,
            vec![required("social-name"), required("social-link")],
        )
        .list(HOBBY_LIST, false, vec![required("label")])
}
