use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

const FIELD_PREFIX: &str = "sociodemographic_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LivingWith {
    Alone,
    Mother,
    Father,
    BothParents,
    ParentsSiblings,
    ParentsSiblingsGrandparents,
    ExtendedFamily,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MaritalStatus {
    Single,
    Married,
    FreeUnion,
    Divorced,
    Widowed,
    Separated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EducationLevel {
    #[serde(rename = "none")]
    NoFormalEducation,
    Primary,
    Secondary,
    College,
    Postgraduate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ResidenceSector {
    Urban,
    Rural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SocioeconomicLevel {
    High,
    Medium,
    Low,
}

/// Optional sociodemographic attributes of a participant.
///
/// Every field is independently nullable. In a submission, `None` means
/// "not provided" and leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Sociodemographic {
    pub country: Option<String>,
    pub age: Option<u16>,
    pub gender: Option<Gender>,
    pub gender_other: Option<String>,
    pub living_with: Option<LivingWith>,
    pub living_with_other: Option<String>,
    pub university: Option<String>,
    pub career: Option<String>,
    /// Semester number, "1" through "12".
    pub current_semester: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub mother_education_level: Option<EducationLevel>,
    pub father_education_level: Option<EducationLevel>,
    pub mother_age: Option<u16>,
    pub father_age: Option<u16>,
    /// 0–100 with at most two decimals.
    pub gpa_last_semester: Option<f64>,
    pub repeated_cycles: Option<bool>,
    pub repeated_cycles_count: Option<u32>,
    pub residence_sector: Option<ResidenceSector>,
    pub socioeconomic_level: Option<SocioeconomicLevel>,
    pub income_sources: Option<String>,
}

macro_rules! overwrite_provided {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = Some(value);
            }
        )+
    };
}

impl Sociodemographic {
    /// Overwrite every field that `patch` provides; keep the rest.
    pub fn merge(&mut self, patch: Sociodemographic) {
        overwrite_provided!(
            self,
            patch,
            country,
            age,
            gender,
            gender_other,
            living_with,
            living_with_other,
            university,
            career,
            current_semester,
            marital_status,
            mother_education_level,
            father_education_level,
            mother_age,
            father_age,
            gpa_last_semester,
            repeated_cycles,
            repeated_cycles_count,
            residence_sector,
            socioeconomic_level,
            income_sources,
        );
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("country", &self.country, 100)?;
        check_length("gender_other", &self.gender_other, 100)?;
        check_length("living_with_other", &self.living_with_other, 200)?;
        check_length("university", &self.university, 200)?;
        check_length("career", &self.career, 200)?;
        check_length("income_sources", &self.income_sources, 500)?;

        check_age("age", self.age)?;
        check_age("mother_age", self.mother_age)?;
        check_age("father_age", self.father_age)?;

        if let Some(semester) = &self.current_semester {
            let valid = semester
                .parse::<u8>()
                .is_ok_and(|n| (1..=12).contains(&n));
            if !valid {
                return Err(invalid(
                    "current_semester",
                    format!("'{semester}' is not a semester between 1 and 12"),
                ));
            }
        }

        if let Some(gpa) = self.gpa_last_semester {
            if !(0.0..=100.0).contains(&gpa) {
                return Err(invalid("gpa_last_semester", "must be between 0 and 100"));
            }
            let hundredths = gpa * 100.0;
            if (hundredths - hundredths.round()).abs() > 1e-6 {
                return Err(invalid(
                    "gpa_last_semester",
                    "must have at most two decimal places",
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::new(format!("{FIELD_PREFIX}.{field}"), message)
}

fn check_length(field: &str, value: &Option<String>, max: usize) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => {
            Err(invalid(field, format!("must be at most {max} characters")))
        }
        _ => Ok(()),
    }
}

fn check_age(field: &str, value: Option<u16>) -> Result<(), ValidationError> {
    match value {
        Some(age) if !(1..=150).contains(&age) => {
            Err(invalid(field, format!("{age} is outside [1, 150]")))
        }
        _ => Ok(()),
    }
}
