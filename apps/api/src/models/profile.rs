use serde::Deserialize;

/// A single skill line. Rendered as one row of the skills table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub proficiency_level: String,
    pub years_of_experience: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageSkill {
    pub name: String,
    pub proficiency_level: String,
}

/// Personal profile submitted for résumé generation.
///
/// `full_name` and `mobile` are required; everything else is optional.
/// `skills` and `languages` default to empty when omitted, so a missing list
/// and an empty list are the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub full_name: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub work_experience: Option<String>,
    #[serde(default)]
    pub current_location: Option<String>,
    #[serde(default)]
    pub location_preference: Option<String>,
    #[serde(default)]
    pub expected_salary_min: Option<i64>,
    #[serde(default)]
    pub expected_salary_max: Option<i64>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub languages: Vec<LanguageSkill>,
}

impl Profile {
    /// Salary bounds, only when both ends are set and non-zero. A half-open
    /// range, or one with a zero bound, is treated as absent.
    pub fn salary_range(&self) -> Option<(i64, i64)> {
        match (self.expected_salary_min, self.expected_salary_max) {
            (Some(min), Some(max)) if min != 0 && max != 0 => Some((min, max)),
            _ => None,
        }
    }
}

/// Request body for `POST /generate-resume`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeRequest {
    pub profile: Profile,
}

/// Returns the value only if it is present and non-empty.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_profile_defaults_collections_to_empty() {
        let json = serde_json::json!({
            "full_name": "Jane Doe",
            "mobile": "9999999999"
        });
        let profile: Profile = serde_json::from_value(json).unwrap();
        assert!(profile.skills.is_empty());
        assert!(profile.languages.is_empty());
        assert!(profile.email.is_none());
        assert!(profile.salary_range().is_none());
    }

    #[test]
    fn test_profile_requires_full_name_and_mobile() {
        let missing_mobile = serde_json::json!({ "full_name": "Jane Doe" });
        assert!(serde_json::from_value::<Profile>(missing_mobile).is_err());

        let missing_name = serde_json::json!({ "mobile": "9999999999" });
        assert!(serde_json::from_value::<Profile>(missing_name).is_err());
    }

    #[test]
    fn test_null_optional_fields_deserialize_as_none() {
        let json = serde_json::json!({
            "full_name": "Jane Doe",
            "mobile": "1",
            "bio": null,
            "expected_salary_min": null
        });
        let profile: Profile = serde_json::from_value(json).unwrap();
        assert!(profile.bio.is_none());
        assert!(profile.expected_salary_min.is_none());
    }

    #[test]
    fn test_skill_rejects_non_integer_years() {
        let json = serde_json::json!({
            "name": "Rust",
            "proficiency_level": "expert",
            "years_of_experience": "five"
        });
        assert!(serde_json::from_value::<Skill>(json).is_err());
    }

    #[test]
    fn test_salary_range_requires_both_bounds() {
        let mut profile = Profile {
            expected_salary_min: Some(50_000),
            ..Default::default()
        };
        assert!(profile.salary_range().is_none());

        profile.expected_salary_max = Some(80_000);
        assert_eq!(profile.salary_range(), Some((50_000, 80_000)));
    }

    #[test]
    fn test_salary_range_treats_zero_bound_as_absent() {
        let zero_min = Profile {
            expected_salary_min: Some(0),
            expected_salary_max: Some(50_000),
            ..Default::default()
        };
        assert!(zero_min.salary_range().is_none());

        let zero_max = Profile {
            expected_salary_min: Some(50_000),
            expected_salary_max: Some(0),
            ..Default::default()
        };
        assert!(zero_max.salary_range().is_none());
    }

    #[test]
    fn test_non_empty_treats_empty_string_as_absent() {
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&Some("x".to_string())), Some("x"));
    }
}
