//! Mentor profile records.

use super::{AccountStatus, MentorId};

/// A mentor offering paid, slot-based sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct Mentor {
    /// Backend identifier.
    pub id: MentorId,
    /// Display name.
    pub name: String,
    /// Contact address, when public.
    pub email: Option<String>,
    /// Profile image URL.
    pub avatar: Option<String>,
    /// Years of professional experience.
    pub experience_years: u32,
    /// Current employer.
    pub company: Option<String>,
    /// Current role.
    pub job_title: Option<String>,
    /// Advertised skills.
    pub skills: Vec<String>,
    /// Average session rating.
    pub rating: Option<f32>,
    /// Session price per hour.
    pub hourly_rate: Option<f64>,
    /// Moderation status.
    pub status: AccountStatus,
}

impl Mentor {
    /// One-line headline combining job title and company when known.
    pub fn headline(&self) -> String {
        match (self.job_title.as_deref(), self.company.as_deref()) {
            (Some(title), Some(company)) => format!("{title} at {company}"),
            (Some(title), None) => title.to_owned(),
            (None, Some(company)) => company.to_owned(),
            (None, None) => format!("{} years of experience", self.experience_years),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn mentor(job_title: Option<&str>, company: Option<&str>) -> Mentor {
        Mentor {
            id: MentorId::new("m-1").expect("mentor id"),
            name: "Grace".to_owned(),
            email: None,
            avatar: None,
            experience_years: 7,
            company: company.map(str::to_owned),
            job_title: job_title.map(str::to_owned),
            skills: Vec::new(),
            rating: None,
            hourly_rate: None,
            status: AccountStatus::Active,
        }
    }

    #[rstest]
    #[case(Some("Staff Engineer"), Some("Acme"), "Staff Engineer at Acme")]
    #[case(Some("Staff Engineer"), None, "Staff Engineer")]
    #[case(None, Some("Acme"), "Acme")]
    #[case(None, None, "7 years of experience")]
    fn headline_prefers_title_and_company(
        #[case] title: Option<&str>,
        #[case] company: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(mentor(title, company).headline(), expected);
    }
}
