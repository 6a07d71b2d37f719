//! Guided book-recommendation form.
//!
//! A small collecting state machine the chat view opens in place of a
//! free-text question: the user picks year, affiliation and semester, and
//! submission turns the picks into one natural-language question for the
//! assistant. Validation never reaches the transport; a rejected
//! submission only sets the inline `error` field.

use once_cell::sync::Lazy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Year {
    First,
    Second,
    Third,
    Fourth,
}

impl Year {
    pub const ALL: [Year; 4] = [Year::First, Year::Second, Year::Third, Year::Fourth];

    pub fn label(self) -> &'static str {
        match self {
            Year::First => "1st-year",
            Year::Second => "2nd-year",
            Year::Third => "3rd-year",
            Year::Fourth => "4th-year",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Semester {
    First,
    Second,
}

impl Semester {
    pub const ALL: [Semester; 2] = [Semester::First, Semester::Second];

    pub fn label(self) -> &'static str {
        match self {
            Semester::First => "1st semester",
            Semester::Second => "2nd semester",
        }
    }
}

pub struct College {
    pub name: &'static str,
    pub departments: Vec<&'static str>,
}

/// The departmental recommendation model only covers one department so
/// far; everything else is listed but not selectable.
pub const PILOT_DEPARTMENT: &str = "Computer Science";

pub static CATALOG: Lazy<Vec<College>> = Lazy::new(|| {
    vec![
        College {
            name: "College of Humanities & Arts",
            departments: vec!["Liberal Humanities", "Fine Arts"],
        },
        College {
            name: "College of Social Sciences",
            departments: vec!["Social Sciences"],
        },
        College {
            name: "College of Design",
            departments: vec![
                "Global Fashion Industry",
                "ICT Design",
                "Beauty Design Management",
                "Interior Design",
            ],
        },
        College {
            name: "College of Engineering & IT",
            departments: vec![
                "Computer Science",
                "Mechanical & Electronic Engineering",
                "Industrial Systems Engineering",
            ],
        },
        College {
            name: "College of Convergence",
            departments: vec![
                "Creative Talent",
                "Literary Contents",
                "Applied AI",
                "Convergence Security",
                "Future Mobility",
            ],
        },
        College {
            name: "College of Continuing Education",
            departments: vec![
                "Convergence Administration",
                "Hotel & Restaurant Management",
                "Business Consulting",
            ],
        },
        College {
            name: "College of Global Studies",
            departments: vec![
                "Korean Language & Culture",
                "Global Business",
                "Media Entertainment",
                "Venture Startup",
            ],
        },
    ]
});

pub fn departments_of(college: &str) -> &'static [&'static str] {
    CATALOG
        .iter()
        .find(|c| c.name == college)
        .map(|c| c.departments.as_slice())
        .unwrap_or(&[])
}

/// Collecting state for the guided flow. `open == false` is the closed
/// state; submission closes the form again.
#[derive(Default)]
pub struct RecommendForm {
    pub open: bool,
    pub year: Option<Year>,
    pub college: Option<String>,
    pub department: Option<String>,
    /// Library classification code, collected instead of an affiliation
    /// for 1st-years.
    pub classification: String,
    pub semester: Option<Semester>,
    pub error: Option<String>,
}

impl RecommendForm {
    pub fn open(&mut self) {
        *self = Self::default();
        self.open = true;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Picking a college invalidates any earlier department pick.
    pub fn set_college(&mut self, college: &str) {
        if self.college.as_deref() != Some(college) {
            self.college = Some(college.to_string());
            self.department = None;
        }
    }

    fn validate(&self) -> Result<(), String> {
        let year = self.year.ok_or("Select a year.")?;
        if year == Year::First {
            if self.classification.trim().is_empty() {
                return Err("Enter a classification code.".to_string());
            }
        } else {
            let _college = self.college.as_deref().ok_or("Select a college.")?;
            let department = self.department.as_deref().ok_or("Select a department.")?;
            if department != PILOT_DEPARTMENT {
                return Err(format!(
                    "Recommendations are only available for {} so far.",
                    PILOT_DEPARTMENT
                ));
            }
        }
        if self.semester.is_none() {
            return Err("Select a semester.".to_string());
        }
        Ok(())
    }

    /// Turn the collected fields into the assistant question. Fails (and
    /// reports inline) when a required field is unset or the year and
    /// department combination is not offered.
    pub fn build_question(&self) -> Result<String, String> {
        self.validate()?;
        let year = self.year.expect("validated");
        let semester = self.semester.expect("validated");
        if year == Year::First {
            Ok(format!(
                "Recommend books for a 1st-year student (classification {}) to read during the {}.",
                self.classification.trim(),
                semester.label()
            ))
        } else {
            Ok(format!(
                "Recommend books for a {} {} student in the {} to read during the {}.",
                year.label(),
                self.department.as_deref().expect("validated"),
                self.college.as_deref().expect("validated"),
                semester.label()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_standard() -> RecommendForm {
        let mut form = RecommendForm::default();
        form.open = true;
        form.year = Some(Year::Second);
        form.set_college("College of Engineering & IT");
        form.department = Some(PILOT_DEPARTMENT.to_string());
        form.semester = Some(Semester::First);
        form
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let mut form = RecommendForm::default();
        form.open = true;
        assert!(form.build_question().is_err());

        form.year = Some(Year::Second);
        assert!(form.build_question().is_err());

        form.set_college("College of Engineering & IT");
        assert!(form.build_question().is_err());

        form.department = Some(PILOT_DEPARTMENT.to_string());
        assert!(form.build_question().is_err());

        form.semester = Some(Semester::First);
        assert!(form.build_question().is_ok());
    }

    #[test]
    fn test_non_pilot_department_is_rejected() {
        let mut form = filled_standard();
        form.department = Some("Fine Arts".to_string());
        let err = form.build_question().unwrap_err();
        assert!(err.contains(PILOT_DEPARTMENT));
    }

    #[test]
    fn test_standard_template() {
        let question = filled_standard().build_question().unwrap();
        assert_eq!(
            question,
            "Recommend books for a 2nd-year Computer Science student in the \
             College of Engineering & IT to read during the 1st semester."
        );
    }

    #[test]
    fn test_first_year_uses_classification_branch() {
        let mut form = RecommendForm::default();
        form.open = true;
        form.year = Some(Year::First);
        form.semester = Some(Semester::Second);

        // Classification replaces the college/department requirement.
        assert!(form.build_question().is_err());
        form.classification = " 813.7 ".to_string();

        let question = form.build_question().unwrap();
        assert_eq!(
            question,
            "Recommend books for a 1st-year student (classification 813.7) \
             to read during the 2nd semester."
        );
    }

    #[test]
    fn test_college_change_resets_department() {
        let mut form = filled_standard();
        form.set_college("College of Design");
        assert!(form.department.is_none());
        // Re-setting the same college keeps the pick.
        form.department = Some("ICT Design".to_string());
        form.set_college("College of Design");
        assert_eq!(form.department.as_deref(), Some("ICT Design"));
    }

    #[test]
    fn test_departments_of_unknown_college_is_empty() {
        assert!(departments_of("College of Nowhere").is_empty());
        assert!(departments_of("College of Engineering & IT").contains(&PILOT_DEPARTMENT));
    }
}
