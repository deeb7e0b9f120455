use crate::models::output::{Institution, NormalizedOutput};

/// Renders a finished resume as a markdown document for the preview pane.
pub fn render_preview_md(output: &NormalizedOutput) -> String {
    let p = &output.personal_data;
    let mut md = format!("# {}\n\n", p.full_name);
    if !p.position.is_empty() {
        md.push_str(&format!("**{}**\n\n", p.position));
    }

    md.push_str(&format!("- **Address:** {}\n", p.address));
    md.push_str(&format!("- **Email:** {}\n", p.email));
    if let Some(phone) = &p.phone {
        md.push_str(&format!("- **Phone:** {phone}\n"));
    }
    md.push_str(&format!("- **Website:** {}\n\n", p.website));

    if !p.bio.is_empty() {
        md.push_str(&format!("{}\n\n", p.bio));
    }

    push_institutions(&mut md, "Education", &output.education_data);
    push_institutions(&mut md, "Experience", &output.experience_data);

    if !output.social_data.is_empty() {
        md.push_str("## Social\n\n");
        for social in &output.social_data {
            md.push_str(&format!("- [{}]({})\n", social.name, social.link));
        }
        md.push('\n');
    }

    if !output.hobby_data.is_empty() {
        md.push_str("## Hobbies\n\n");
        let hobbies: Vec<&str> = output.hobby_data.iter().map(|h| h.hobby.as_str()).collect();
        md.push_str(&hobbies.join(", "));
        md.push_str("\n\n");
    }

    md
}

fn push_institutions(md: &mut String, title: &str, entries: &[Institution]) {
    if entries.is_empty() {
        return;
    }
    md.push_str(&format!("## {title}\n\n"));
    for entry in entries {
        md.push_str(&format!(
            "### {} - {} ({})\n",
            entry.position,
            entry.name,
            year_span(entry.from_year, entry.to_year)
        ));
        if !entry.description.is_empty() {
            md.push_str(&format!("{}\n", entry.description));
        }
        md.push('\n');
    }
}

fn year_span(from: Option<i32>, to: Option<i32>) -> String {
    let show = |y: Option<i32>| y.map_or_else(|| "?".to_string(), |y| y.to_string());
    format!("{}-{}", show(from), show(to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::output::{Hobby, PersonalData, SocialLink};
    use serde_json::Number;

    fn output() -> NormalizedOutput {
        NormalizedOutput {
            personal_data: PersonalData {
                full_name: "Ada Lovelace".to_string(),
                address: "London".to_string(),
                bio: "Wrote the first program.".to_string(),
                position: "Engineer".to_string(),
                phone: Some(Number::from(5551234_i64)),
                website: "https://ada.dev".to_string(),
                email: "ada@example.com".to_string(),
            },
            education_data: vec![Institution {
                description: "CS".to_string(),
                position: "BSc".to_string(),
                name: "MIT".to_string(),
                from_year: Some(2019),
                to_year: Some(2021),
            }],
            experience_data: vec![],
            social_data: vec![SocialLink {
                link: "https://github.com/ada".to_string(),
                name: "GitHub".to_string(),
            }],
            hobby_data: vec![
                Hobby {
                    hobby: "Poetry".to_string(),
                },
                Hobby {
                    hobby: "Chess".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_preview_sections() {
        let md = render_preview_md(&output());
        assert!(md.starts_with("# Ada Lovelace\n"));
        assert!(md.contains("## Education"));
        assert!(md.contains("### BSc - MIT (2019-2021)"));
        assert!(md.contains("- [GitHub](https://github.com/ada)"));
        assert!(md.contains("Poetry, Chess"));
        assert!(md.contains("- **Phone:** 5551234\n"));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let md = render_preview_md(&output());
        assert!(!md.contains("## Experience"));
    }

    #[test]
    fn test_unknown_year_marked() {
        assert_eq!(year_span(None, Some(2020)), "?-2020");
    }
}
