//! Résumé Document Builder — maps a `Profile` onto an ordered list of blocks.
//!
//! Layout order is fixed: title, contact line, summary, skills table,
//! education, work experience, languages, additional information.
//! Every section after the contact line is skipped when its data is absent;
//! an empty string counts as absent.

use crate::document::{DocumentBlock, HeadingLevel, TableBlock, TableStyle, INCH};
use crate::models::profile::{non_empty, Profile};

/// Gap after the contact line.
const HEADER_GAP: f32 = 0.3 * INCH;
/// Gap after each body section.
const SECTION_GAP: f32 = 0.2 * INCH;

const CONTACT_SEPARATOR: &str = " | ";
const CURRENCY_SYMBOL: &str = "₹";

pub const SKILLS_TABLE_HEADER: [&str; 3] = ["Skill", "Proficiency", "Experience"];

/// Builds the résumé block sequence for a profile.
///
/// Never fails. The result always starts with the title heading followed by
/// the contact line, even when the contact line is empty.
pub fn build_resume(profile: &Profile) -> Vec<DocumentBlock> {
    let mut blocks = vec![
        DocumentBlock::Heading {
            text: profile.full_name.clone(),
            level: HeadingLevel::Title,
        },
        DocumentBlock::BodyText(contact_line(profile)),
        DocumentBlock::Spacer(HEADER_GAP),
    ];

    if let Some(bio) = non_empty(&profile.bio) {
        push_text_section(&mut blocks, "Professional Summary", bio);
    }

    if !profile.skills.is_empty() {
        blocks.push(section_heading("Skills"));
        blocks.push(DocumentBlock::Table(skills_table(profile)));
        blocks.push(DocumentBlock::Spacer(SECTION_GAP));
    }

    if let Some(education) = non_empty(&profile.education) {
        push_text_section(&mut blocks, "Education", education);
    }

    if let Some(work) = non_empty(&profile.work_experience) {
        push_text_section(&mut blocks, "Work Experience", work);
    }

    if !profile.languages.is_empty() {
        let text = profile
            .languages
            .iter()
            .map(|lang| format!("{} ({})", lang.name, lang.proficiency_level))
            .collect::<Vec<_>>()
            .join(", ");
        push_text_section(&mut blocks, "Languages", &text);
    }

    let details = additional_details(profile);
    if !details.is_empty() {
        blocks.push(section_heading("Additional Information"));
        blocks.extend(details.into_iter().map(DocumentBlock::BodyText));
    }

    blocks
}

/// `Mobile: … | Email: … | Location: …`, skipping absent or empty fields.
fn contact_line(profile: &Profile) -> String {
    let mobile = Some(profile.mobile.as_str()).filter(|m| !m.is_empty());
    let parts = [
        mobile.map(|m| format!("Mobile: {m}")),
        non_empty(&profile.email).map(|e| format!("Email: {e}")),
        non_empty(&profile.current_location).map(|l| format!("Location: {l}")),
    ];
    parts
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

fn skills_table(profile: &Profile) -> TableBlock {
    let rows = profile
        .skills
        .iter()
        .map(|skill| {
            vec![
                skill.name.clone(),
                capitalize_first(&skill.proficiency_level),
                format!("{} years", skill.years_of_experience),
            ]
        })
        .collect();

    TableBlock {
        header: SKILLS_TABLE_HEADER.iter().map(|h| h.to_string()).collect(),
        rows,
        column_widths: vec![3.0 * INCH, 1.5 * INCH, 1.5 * INCH],
        style: TableStyle::skills(),
    }
}

fn additional_details(profile: &Profile) -> Vec<String> {
    let mut details = Vec::new();
    if let Some((min, max)) = profile.salary_range() {
        details.push(format!(
            "Expected Salary: {CURRENCY_SYMBOL}{} - {CURRENCY_SYMBOL}{}",
            group_thousands(min),
            group_thousands(max)
        ));
    }
    if let Some(preference) = non_empty(&profile.location_preference) {
        details.push(format!("Preferred Location: {preference}"));
    }
    details
}

fn section_heading(text: &str) -> DocumentBlock {
    DocumentBlock::Heading {
        text: text.to_string(),
        level: HeadingLevel::Section,
    }
}

fn push_text_section(blocks: &mut Vec<DocumentBlock>, heading: &str, body: &str) {
    blocks.push(section_heading(heading));
    blocks.push(DocumentBlock::BodyText(body.to_string()));
    blocks.push(DocumentBlock::Spacer(SECTION_GAP));
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats an integer with comma thousands separators: `1234567` → `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
