use chrono::Datelike;
use serde_json::Number;

use crate::models::form::{EducationInput, ExperienceInput, FormState};
use crate::models::output::{Hobby, Institution, NormalizedOutput, PersonalData, SocialLink};
use crate::schema::rules::{parse_date, parse_number};

/// Maps a validated form into the normalized resume record.
///
/// Pure: no I/O, no clock, same input gives a structurally equal output.
/// Dates collapse to their calendar year; an unparseable date becomes a
/// `None` year instead of failing, so callers should validate first.
pub fn transform(form: &FormState) -> NormalizedOutput {
    NormalizedOutput {
        personal_data: PersonalData {
            full_name: form.full_name.clone(),
            address: form.address.clone(),
            bio: form.bio.clone(),
            position: form.position.clone(),
            phone: phone_number(&form.phone),
            website: form.website.clone(),
            email: form.email.clone(),
        },
        education_data: form.education_data.iter().map(education).collect(),
        experience_data: form.experience_data.iter().map(experience).collect(),
        social_data: form
            .social_data
            .iter()
            .map(|s| SocialLink {
                link: s.link.clone(),
                name: s.name.clone(),
            })
            .collect(),
        hobby_data: form
            .hobby_data
            .iter()
            .map(|h| Hobby {
                hobby: h.label.clone(),
            })
            .collect(),
    }
}

fn education(input: &EducationInput) -> Institution {
    Institution {
        description: input.study.clone(),
        position: input.degree.clone(),
        name: input.school.clone(),
        from_year: year_of(&input.from_date),
        to_year: year_of(&input.to_date),
    }
}

fn experience(input: &ExperienceInput) -> Institution {
    Institution {
        description: input.company_info.clone(),
        position: input.work_title.clone(),
        name: input.company.clone(),
        from_year: year_of(&input.from_date),
        to_year: year_of(&input.to_date),
    }
}

/// Whole numbers stay integers so they serialize without a trailing `.0`.
fn phone_number(raw: &str) -> Option<Number> {
    let n = parse_number(raw)?;
    if n.fract() == 0.0 && n.abs() <= i64::MAX as f64 {
        Some(Number::from(n as i64))
    } else {
        Number::from_f64(n)
    }
}

fn year_of(raw: &str) -> Option<i32> {
    parse_date(raw).map(|d| d.year())
}
