// API request models
// Body of `POST /api/submit-assessment`: one flat object, snake_case keys.

use serde::{Serialize, Serializer};

/// Skills offered as toggles on the technical step.
pub const COMMON_SKILLS: [&str; 10] = [
    "Python",
    "C++",
    "MATLAB",
    "CAD",
    "FEA",
    "Machine Learning",
    "Data Analysis",
    "Project Management",
    "System Design",
    "Testing/QA",
];

// =========================
// Scalar field types
// =========================

/// A 1-10 self-assessment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Clamps into 1..=10.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self::new(self.0 as i64 + 1)
    }

    pub fn decrement(self) -> Self {
        Self::new(self.0 as i64 - 1)
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EducationLevel {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "Bachelor's")]
    Bachelors,
    #[serde(rename = "Master's")]
    Masters,
    #[serde(rename = "PhD")]
    Phd,
    #[serde(rename = "Other")]
    Other,
}

impl EducationLevel {
    /// Label shown in the selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Unset => "Select...",
            EducationLevel::Bachelors => "Bachelor's Degree",
            EducationLevel::Masters => "Master's Degree",
            EducationLevel::Phd => "PhD",
            EducationLevel::Other => "Other Advanced Degree",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            EducationLevel::Unset => EducationLevel::Bachelors,
            EducationLevel::Bachelors => EducationLevel::Masters,
            EducationLevel::Masters => EducationLevel::Phd,
            EducationLevel::Phd => EducationLevel::Other,
            EducationLevel::Other => EducationLevel::Unset,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            EducationLevel::Unset => EducationLevel::Other,
            EducationLevel::Bachelors => EducationLevel::Unset,
            EducationLevel::Masters => EducationLevel::Bachelors,
            EducationLevel::Phd => EducationLevel::Masters,
            EducationLevel::Other => EducationLevel::Phd,
        }
    }
}

/// Free-text inputs of the form, addressable by the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Email,
    CurrentSalary,
    YearsExperience,
    LastRaisePercent,
    Role,
    Industry,
    Location,
    Certifications,
    RoleDescription,
    ValueArticulation,
    NegotiationExperience,
}

impl TextField {
    pub fn label(&self) -> &'static str {
        match self {
            TextField::Name => "Full Name *",
            TextField::Email => "Email Address *",
            TextField::CurrentSalary => "Current Annual Salary (Total Comp) *",
            TextField::YearsExperience => "Years of Experience *",
            TextField::LastRaisePercent => "Last Raise Percentage",
            TextField::Role => "Current Role/Title *",
            TextField::Industry => "Industry *",
            TextField::Location => "Location *",
            TextField::Certifications => "Certifications & Licenses",
            TextField::RoleDescription => "How do you typically describe what you do? *",
            TextField::ValueArticulation => {
                "How did you articulate your value in your last review? *"
            }
            TextField::NegotiationExperience => {
                "Your most recent salary negotiation or raise conversation *"
            }
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            TextField::Name => "John Smith",
            TextField::Email => "john@example.com",
            TextField::CurrentSalary => "e.g., 95000",
            TextField::YearsExperience => "e.g., 7",
            TextField::LastRaisePercent => "e.g., 3.5",
            TextField::Role => "e.g., Senior Mechanical Engineer",
            TextField::Industry => "e.g., Aerospace",
            TextField::Location => "e.g., Seattle, WA",
            TextField::Certifications => "e.g., PE License, PMP, AWS Certified Solutions Architect...",
            TextField::RoleDescription => {
                "e.g., I'm a mechanical engineer. I design components and run simulations."
            }
            TextField::ValueArticulation => {
                "e.g., I completed my projects on time and helped with cross-functional work."
            }
            TextField::NegotiationExperience => {
                "What happened? How did you approach it? What was the outcome?"
            }
        }
    }
}

/// Slider inputs (1-10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingField {
    VisibilityRating,
    ValuesClarity,
    PurposeAlignment,
    LifestyleFit,
    EnergyLevel,
}

impl RatingField {
    pub const ALIGNMENT: [RatingField; 4] = [
        RatingField::ValuesClarity,
        RatingField::PurposeAlignment,
        RatingField::LifestyleFit,
        RatingField::EnergyLevel,
    ];

    pub fn prompt(&self) -> &'static str {
        match self {
            RatingField::VisibilityRating => {
                "How visible is your work to decision-makers? (1 = invisible, 10 = highly visible)"
            }
            RatingField::ValuesClarity => {
                "How clear are you on your core values and what matters most in your career?"
            }
            RatingField::PurposeAlignment => {
                "How aligned is your current work with your sense of purpose?"
            }
            RatingField::LifestyleFit => "How well does your current role fit your desired lifestyle?",
            RatingField::EnergyLevel => "How energized do you feel about your work?",
        }
    }

    /// Low/high anchors shown at the ends of the slider.
    pub fn anchors(&self) -> (&'static str, &'static str) {
        match self {
            RatingField::VisibilityRating => ("Invisible", "Highly visible"),
            RatingField::ValuesClarity => ("Very unclear", "Crystal clear"),
            RatingField::PurposeAlignment => ("Not aligned", "Perfectly aligned"),
            RatingField::LifestyleFit => ("Poor fit", "Perfect fit"),
            RatingField::EnergyLevel => ("Drained", "Energized"),
        }
    }
}

// =========================
// Assessment
// =========================

/// The wizard's form state. One instance per session; every field always exists and is only
/// ever overwritten through [`AssessmentInput::merge`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AssessmentInput {
    // Contact
    pub name: String,
    pub email: String,
    // Compensation
    #[serde(serialize_with = "numeric_text")]
    pub current_salary: String,
    #[serde(serialize_with = "numeric_text")]
    pub years_experience: String,
    pub role: String,
    pub industry: String,
    pub location: String,
    #[serde(serialize_with = "optional_numeric_text")]
    pub last_raise_percent: String,
    // Technical
    pub technical_skills: Vec<String>,
    pub certifications: String,
    pub education_level: EducationLevel,
    // Positioning
    pub role_description: String,
    pub value_articulation: String,
    pub negotiation_experience: String,
    pub visibility_rating: Rating,
    // Alignment
    pub values_clarity: Rating,
    pub purpose_alignment: Rating,
    pub lifestyle_fit: Rating,
    pub energy_level: Rating,
}

/// A partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssessmentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub current_salary: Option<String>,
    pub years_experience: Option<String>,
    pub role: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub last_raise_percent: Option<String>,
    pub technical_skills: Option<Vec<String>>,
    pub certifications: Option<String>,
    pub education_level: Option<EducationLevel>,
    pub role_description: Option<String>,
    pub value_articulation: Option<String>,
    pub negotiation_experience: Option<String>,
    pub visibility_rating: Option<Rating>,
    pub values_clarity: Option<Rating>,
    pub purpose_alignment: Option<Rating>,
    pub lifestyle_fit: Option<Rating>,
    pub energy_level: Option<Rating>,
}

impl AssessmentPatch {
    /// Patch setting a single text field.
    pub fn text(field: TextField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        let mut patch = Self::default();
        match field {
            TextField::Name => patch.name = value,
            TextField::Email => patch.email = value,
            TextField::CurrentSalary => patch.current_salary = value,
            TextField::YearsExperience => patch.years_experience = value,
            TextField::LastRaisePercent => patch.last_raise_percent = value,
            TextField::Role => patch.role = value,
            TextField::Industry => patch.industry = value,
            TextField::Location => patch.location = value,
            TextField::Certifications => patch.certifications = value,
            TextField::RoleDescription => patch.role_description = value,
            TextField::ValueArticulation => patch.value_articulation = value,
            TextField::NegotiationExperience => patch.negotiation_experience = value,
        }
        patch
    }

    /// Patch setting a single slider.
    pub fn rating(field: RatingField, value: Rating) -> Self {
        let value = Some(value);
        let mut patch = Self::default();
        match field {
            RatingField::VisibilityRating => patch.visibility_rating = value,
            RatingField::ValuesClarity => patch.values_clarity = value,
            RatingField::PurposeAlignment => patch.purpose_alignment = value,
            RatingField::LifestyleFit => patch.lifestyle_fit = value,
            RatingField::EnergyLevel => patch.energy_level = value,
        }
        patch
    }
}

fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl AssessmentInput {
    /// Shallow merge, last write wins per field.
    pub fn merge(&mut self, patch: AssessmentPatch) {
        overwrite(&mut self.name, patch.name);
        overwrite(&mut self.email, patch.email);
        overwrite(&mut self.current_salary, patch.current_salary);
        overwrite(&mut self.years_experience, patch.years_experience);
        overwrite(&mut self.role, patch.role);
        overwrite(&mut self.industry, patch.industry);
        overwrite(&mut self.location, patch.location);
        overwrite(&mut self.last_raise_percent, patch.last_raise_percent);
        overwrite(&mut self.technical_skills, patch.technical_skills);
        overwrite(&mut self.certifications, patch.certifications);
        overwrite(&mut self.education_level, patch.education_level);
        overwrite(&mut self.role_description, patch.role_description);
        overwrite(&mut self.value_articulation, patch.value_articulation);
        overwrite(&mut self.negotiation_experience, patch.negotiation_experience);
        overwrite(&mut self.visibility_rating, patch.visibility_rating);
        overwrite(&mut self.values_clarity, patch.values_clarity);
        overwrite(&mut self.purpose_alignment, patch.purpose_alignment);
        overwrite(&mut self.lifestyle_fit, patch.lifestyle_fit);
        overwrite(&mut self.energy_level, patch.energy_level);
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Email => &self.email,
            TextField::CurrentSalary => &self.current_salary,
            TextField::YearsExperience => &self.years_experience,
            TextField::LastRaisePercent => &self.last_raise_percent,
            TextField::Role => &self.role,
            TextField::Industry => &self.industry,
            TextField::Location => &self.location,
            TextField::Certifications => &self.certifications,
            TextField::RoleDescription => &self.role_description,
            TextField::ValueArticulation => &self.value_articulation,
            TextField::NegotiationExperience => &self.negotiation_experience,
        }
    }

    pub fn rating(&self, field: RatingField) -> Rating {
        match field {
            RatingField::VisibilityRating => self.visibility_rating,
            RatingField::ValuesClarity => self.values_clarity,
            RatingField::PurposeAlignment => self.purpose_alignment,
            RatingField::LifestyleFit => self.lifestyle_fit,
            RatingField::EnergyLevel => self.energy_level,
        }
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.technical_skills.iter().any(|s| s == skill)
    }

    /// Patch that removes `skill` when selected, or appends it otherwise.
    pub fn toggle_skill(&self, skill: &str) -> AssessmentPatch {
        let skills = if self.has_skill(skill) {
            self.technical_skills
                .iter()
                .filter(|s| s.as_str() != skill)
                .cloned()
                .collect()
        } else {
            let mut skills = self.technical_skills.clone();
            skills.push(skill.to_string());
            skills
        };
        AssessmentPatch {
            technical_skills: Some(skills),
            ..Default::default()
        }
    }

    /// Patch appending a free-form skill; `None` when blank or already present.
    pub fn add_custom_skill(&self, skill: &str) -> Option<AssessmentPatch> {
        let skill = skill.trim();
        if skill.is_empty() || self.has_skill(skill) {
            return None;
        }
        let mut skills = self.technical_skills.clone();
        skills.push(skill.to_string());
        Some(AssessmentPatch {
            technical_skills: Some(skills),
            ..Default::default()
        })
    }

    /// Skills selected beyond [`COMMON_SKILLS`], in the order they were added.
    pub fn custom_skills(&self) -> impl Iterator<Item = &str> {
        self.technical_skills
            .iter()
            .map(String::as_str)
            .filter(|s| !COMMON_SKILLS.contains(s))
    }
}

// Numeric inputs are kept as typed text; they go over the wire as numbers when they parse.
#[allow(clippy::ptr_arg)]
fn numeric_text<S: Serializer>(value: &String, serializer: S) -> Result<S::Ok, S::Error> {
    let t = value.trim();
    if let Ok(n) = t.parse::<i64>() {
        return serializer.serialize_i64(n);
    }
    if let Ok(f) = t.parse::<f64>() {
        if f.is_finite() {
            return serializer.serialize_f64(f);
        }
    }
    serializer.serialize_str(value)
}

#[allow(clippy::ptr_arg)]
fn optional_numeric_text<S: Serializer>(value: &String, serializer: S) -> Result<S::Ok, S::Error> {
    if value.trim().is_empty() {
        return serializer.serialize_none();
    }
    numeric_text(value, serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_previously_set_fields() {
        let mut input = AssessmentInput::default();
        input.merge(AssessmentPatch::text(TextField::Role, "Engineer"));
        input.merge(AssessmentPatch::text(TextField::Industry, "Aerospace"));

        assert_eq!(input.role, "Engineer");
        assert_eq!(input.industry, "Aerospace");
    }

    #[test]
    fn merge_is_idempotent() {
        let patch = AssessmentPatch {
            name: Some("Ada".to_string()),
            visibility_rating: Some(Rating::new(8)),
            ..Default::default()
        };
        let mut once = AssessmentInput::default();
        once.merge(patch.clone());
        let mut twice = once.clone();
        twice.merge(patch);

        assert_eq!(once, twice);
    }

    #[test]
    fn merge_last_write_wins() {
        let mut input = AssessmentInput::default();
        input.merge(AssessmentPatch::text(TextField::Email, "old@example.com"));
        input.merge(AssessmentPatch::text(TextField::Email, "new@example.com"));
        assert_eq!(input.email, "new@example.com");
    }

    #[test]
    fn ratings_default_to_five_and_clamp() {
        let input = AssessmentInput::default();
        assert_eq!(input.visibility_rating.value(), 5);
        assert_eq!(input.energy_level.value(), 5);

        assert_eq!(Rating::new(0).value(), 1);
        assert_eq!(Rating::new(42).value(), 10);
        assert_eq!(Rating::new(10).increment().value(), 10);
        assert_eq!(Rating::new(1).decrement().value(), 1);
    }

    #[test]
    fn toggle_skill_adds_then_removes() {
        let mut input = AssessmentInput::default();
        input.merge(input.toggle_skill("Python"));
        input.merge(input.toggle_skill("CAD"));
        assert_eq!(input.technical_skills, vec!["Python", "CAD"]);

        input.merge(input.toggle_skill("Python"));
        assert_eq!(input.technical_skills, vec!["CAD"]);
    }

    #[test]
    fn custom_skill_ignores_blank_and_duplicates() {
        let mut input = AssessmentInput::default();
        assert!(input.add_custom_skill("   ").is_none());

        let patch = input.add_custom_skill(" Rust ").expect("new skill");
        input.merge(patch);
        assert_eq!(input.technical_skills, vec!["Rust"]);
        assert!(input.add_custom_skill("Rust").is_none());
        assert_eq!(input.custom_skills().collect::<Vec<_>>(), vec!["Rust"]);
    }

    #[test]
    fn serializes_as_flat_object_with_snake_case_keys() {
        let mut input = AssessmentInput::default();
        input.merge(AssessmentPatch {
            name: Some("Ada Lovelace".to_string()),
            current_salary: Some("95000".to_string()),
            years_experience: Some("7".to_string()),
            last_raise_percent: Some("3.5".to_string()),
            education_level: Some(EducationLevel::Masters),
            technical_skills: Some(vec!["Python".to_string()]),
            ..Default::default()
        });

        let v = serde_json::to_value(&input).expect("serialize");
        assert_eq!(v["name"], "Ada Lovelace");
        assert_eq!(v["current_salary"], 95000);
        assert_eq!(v["years_experience"], 7);
        assert_eq!(v["last_raise_percent"], 3.5);
        assert_eq!(v["education_level"], "Master's");
        assert_eq!(v["technical_skills"][0], "Python");
        assert_eq!(v["visibility_rating"], 5);
        assert_eq!(v["energy_level"], 5);
        assert_eq!(v.as_object().map(|o| o.len()), Some(19));
    }

    #[test]
    fn blank_optional_numbers_serialize_as_null_and_junk_stays_text() {
        let mut input = AssessmentInput::default();
        input.merge(AssessmentPatch::text(TextField::CurrentSalary, "about 90k"));

        let v = serde_json::to_value(&input).expect("serialize");
        assert!(v["last_raise_percent"].is_null());
        assert_eq!(v["current_salary"], "about 90k");
        assert_eq!(v["education_level"], "");
    }

    #[test]
    fn education_level_cycles_through_all_options() {
        let mut level = EducationLevel::Unset;
        for _ in 0..5 {
            level = level.next();
        }
        assert_eq!(level, EducationLevel::Unset);
        assert_eq!(EducationLevel::Bachelors.prev(), EducationLevel::Unset);
    }
}
