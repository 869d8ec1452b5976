//! Learner dashboard summary.

use std::fmt;
use std::str::FromStr;

/// Reporting window for dashboard statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardPeriod {
    /// Past week.
    #[default]
    Week,
    /// Past month.
    Month,
    /// Past year.
    Year,
}

impl DashboardPeriod {
    /// Query value sent as `?period=`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for DashboardPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardPeriod {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown dashboard period '{other}'")),
        }
    }
}

/// Aggregate learning statistics for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Window the figures cover.
    pub period: DashboardPeriod,
    /// Courses enrolled in.
    pub enrolled_courses: u32,
    /// Courses finished.
    pub completed_courses: u32,
    /// Hours spent on lessons.
    pub hours_learned: f64,
    /// Mentor sessions booked.
    pub sessions_booked: u32,
}
