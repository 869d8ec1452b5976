//! DTOs for Codefolio API payloads.
//!
//! Adapters decode into these transport records first, then map into domain
//! records in one pass. The backend serialises MongoDB documents, so every
//! identifier accepts `_id`, `id`, or both at once.

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::domain::{
    AccountStatus, ApplicationDecision, ApplicationId, ApplicationStatus, Availability,
    AvailabilitySlot, Booking, BookingId, BookingRequest, BookingStatus, CheckoutSession, Course,
    CourseId, DashboardPeriod, DashboardSummary, EnrolledCourse, Mentor, MentorApplication,
    MentorId, Notification, NotificationId, ProfileUpdate, Purchase, User, UserId, UserRole,
    Wishlist,
};

fn status_from_label(label: Option<&str>) -> Result<AccountStatus, String> {
    match label {
        None => Ok(AccountStatus::Active),
        Some(raw) => {
            AccountStatus::from_label(raw).ok_or_else(|| format!("unknown account status '{raw}'"))
        }
    }
}

/// Instructors arrive either as a display name or as a populated user record.
fn display_name(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(name) => Some(name),
        Value::Object(record) => record.get("name")?.as_str().map(str::to_owned),
        _ => None,
    }
}

/// Document identifier read from `_id`, falling back to `id`.
///
/// Mongoose emits both when the `id` virtual is enabled; `_id` wins.
#[derive(Debug)]
pub(super) struct DocumentKey<T>(T);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for DocumentKey<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Keys<K> {
            #[serde(rename = "_id")]
            mongo: Option<K>,
            id: Option<K>,
        }

        let keys = Keys::deserialize(deserializer)?;
        keys.mongo
            .or(keys.id)
            .map(Self)
            .ok_or_else(|| de::Error::missing_field("_id"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    #[serde(flatten)]
    id: DocumentKey<UserId>,
    name: String,
    #[serde(default)]
    email: String,
    role: Option<String>,
    status: Option<String>,
    #[serde(alias = "profileImage")]
    avatar: Option<String>,
    #[serde(default)]
    skills: Vec<String>,
    bio: Option<String>,
}

impl UserDto {
    pub(super) fn into_domain(self) -> Result<User, String> {
        Ok(User {
            status: status_from_label(self.status.as_deref())?,
            role: self
                .role
                .as_deref()
                .map_or(UserRole::Student, UserRole::from_label),
            id: self.id.0,
            name: self.name,
            email: self.email,
            avatar: self.avatar,
            skills: self.skills,
            bio: self.bio,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProfileUpdateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skills: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<&'a str>,
}

impl<'a> From<&'a ProfileUpdate> for ProfileUpdateBody<'a> {
    fn from(update: &'a ProfileUpdate) -> Self {
        Self {
            name: update.name.as_deref(),
            bio: update.bio.as_deref(),
            skills: update.skills.as_deref(),
            avatar: update.avatar.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct DashboardDto {
    enrolled_courses: u32,
    completed_courses: u32,
    hours_learned: f64,
    sessions_booked: u32,
}

impl DashboardDto {
    pub(super) fn into_domain(self, period: DashboardPeriod) -> Result<DashboardSummary, String> {
        if !self.hours_learned.is_finite() || self.hours_learned < 0.0 {
            return Err(format!("invalid hours learned {}", self.hours_learned));
        }
        Ok(DashboardSummary {
            period,
            enrolled_courses: self.enrolled_courses,
            completed_courses: self.completed_courses,
            hours_learned: self.hours_learned,
            sessions_booked: self.sessions_booked,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CourseDto {
    #[serde(flatten)]
    id: DocumentKey<CourseId>,
    title: String,
    description: Option<String>,
    instructor: Option<Value>,
    #[serde(default)]
    price: f64,
    rating: Option<f32>,
    #[serde(default, alias = "enrolledStudents")]
    enrolled_count: u64,
    #[serde(alias = "image")]
    thumbnail: Option<String>,
}

impl CourseDto {
    pub(super) fn into_domain(self) -> Result<Course, String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("course {} has invalid price {}", self.id.0, self.price));
        }
        Ok(Course {
            instructor: display_name(self.instructor),
            id: self.id.0,
            title: self.title,
            description: self.description,
            price: self.price,
            rating: self.rating,
            enrolled_count: self.enrolled_count,
            thumbnail: self.thumbnail,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EnrolledCourseDto {
    course: CourseDto,
    #[serde(default)]
    progress: f64,
    #[serde(default)]
    completed_lessons: u32,
    #[serde(default)]
    total_lessons: u32,
}

impl EnrolledCourseDto {
    pub(super) fn into_domain(self) -> Result<EnrolledCourse, String> {
        let progress = if self.progress.is_finite() {
            self.progress.clamp(0.0, 100.0).round() as u8
        } else {
            0
        };
        Ok(EnrolledCourse {
            course: self.course.into_domain()?,
            progress_percent: progress,
            completed_lessons: self.completed_lessons,
            total_lessons: self.total_lessons,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum CourseRefDto {
    Id(CourseId),
    Record {
        #[serde(flatten)]
        id: DocumentKey<CourseId>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum WishlistDto {
    Items(Vec<CourseRefDto>),
    Document {
        #[serde(default, alias = "courseIds")]
        courses: Vec<CourseRefDto>,
    },
}

impl WishlistDto {
    pub(super) fn into_domain(self) -> Wishlist {
        let items = match self {
            Self::Items(items) | Self::Document { courses: items } => items,
        };
        Wishlist {
            course_ids: items
                .into_iter()
                .map(|item| match item {
                    CourseRefDto::Id(id) | CourseRefDto::Record { id: DocumentKey(id) } => id,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CourseRefBody<'a> {
    pub(super) course_id: &'a CourseId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MentorDto {
    #[serde(flatten)]
    id: DocumentKey<MentorId>,
    name: String,
    email: Option<String>,
    #[serde(alias = "profileImage")]
    avatar: Option<String>,
    #[serde(default, alias = "experience")]
    experience_years: u32,
    company: Option<String>,
    job_title: Option<String>,
    #[serde(default)]
    skills: Vec<String>,
    rating: Option<f32>,
    hourly_rate: Option<f64>,
    status: Option<String>,
}

impl MentorDto {
    pub(super) fn into_domain(self) -> Result<Mentor, String> {
        Ok(Mentor {
            status: status_from_label(self.status.as_deref())?,
            id: self.id.0,
            name: self.name,
            email: self.email,
            avatar: self.avatar,
            experience_years: self.experience_years,
            company: self.company,
            job_title: self.job_title,
            skills: self.skills,
            rating: self.rating,
            hourly_rate: self.hourly_rate,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct SlotDto {
    day: String,
    start: String,
    end: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct AvailabilityDto {
    #[serde(default = "default_timezone")]
    timezone: String,
    #[serde(default)]
    slots: Vec<SlotDto>,
}

fn default_timezone() -> String {
    "UTC".to_owned()
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

impl SlotDto {
    fn into_domain(self) -> Result<AvailabilitySlot, String> {
        let day = self
            .day
            .parse::<Weekday>()
            .map_err(|_| format!("unknown weekday '{}'", self.day))?;
        let start = NaiveTime::parse_from_str(&self.start, "%H:%M")
            .map_err(|error| format!("invalid slot start '{}': {error}", self.start))?;
        let end = NaiveTime::parse_from_str(&self.end, "%H:%M")
            .map_err(|error| format!("invalid slot end '{}': {error}", self.end))?;
        AvailabilitySlot::new(day, start, end).map_err(|error| error.to_string())
    }
}

impl AvailabilityDto {
    pub(super) fn into_domain(self) -> Result<Availability, String> {
        let slots = self
            .slots
            .into_iter()
            .map(SlotDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Availability::new(self.timezone, slots).map_err(|error| error.to_string())
    }
}

impl From<&Availability> for AvailabilityDto {
    fn from(availability: &Availability) -> Self {
        Self {
            timezone: availability.timezone.clone(),
            slots: availability
                .slots()
                .iter()
                .map(|slot| SlotDto {
                    day: weekday_label(slot.day).to_owned(),
                    start: slot.start.format("%H:%M").to_string(),
                    end: slot.end.format("%H:%M").to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BookingBody<'a> {
    mentor_id: &'a MentorId,
    start_time: DateTime<Utc>,
    duration: u32,
}

impl<'a> From<&'a BookingRequest> for BookingBody<'a> {
    fn from(request: &'a BookingRequest) -> Self {
        Self {
            mentor_id: &request.mentor_id,
            start_time: request.start,
            duration: request.duration_minutes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BookingDto {
    #[serde(flatten)]
    id: DocumentKey<BookingId>,
    mentor_id: MentorId,
    #[serde(default)]
    mentor_name: String,
    #[serde(alias = "startTime")]
    start: DateTime<Utc>,
    #[serde(default = "default_duration", alias = "duration")]
    duration_minutes: u32,
    status: Option<String>,
}

fn default_duration() -> u32 {
    60
}

impl BookingDto {
    pub(super) fn into_domain(self) -> Booking {
        Booking {
            status: self
                .status
                .as_deref()
                .map_or(BookingStatus::Pending, BookingStatus::from_label),
            id: self.id.0,
            mentor_id: self.mentor_id,
            mentor_name: self.mentor_name,
            start: self.start,
            duration_minutes: self.duration_minutes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CheckoutSessionDto {
    #[serde(alias = "id")]
    session_id: String,
    url: String,
}

impl CheckoutSessionDto {
    pub(super) fn into_domain(self) -> Result<CheckoutSession, String> {
        if url::Url::parse(&self.url).is_err() {
            return Err(format!("checkout url '{}' is not absolute", self.url));
        }
        Ok(CheckoutSession {
            session_id: self.session_id,
            url: self.url,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PurchaseDto {
    course_id: CourseId,
    #[serde(default)]
    course_title: String,
    amount: f64,
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(alias = "createdAt")]
    purchased_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "usd".to_owned()
}

impl PurchaseDto {
    pub(super) fn into_domain(self) -> Purchase {
        Purchase {
            course_id: self.course_id,
            course_title: self.course_title,
            amount: self.amount,
            currency: self.currency,
            purchased_at: self.purchased_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserStatusBody<'a> {
    pub(super) user_id: &'a UserId,
    pub(super) status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MentorStatusBody<'a> {
    pub(super) mentor_id: &'a MentorId,
    pub(super) status: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct ReviewBody {
    status: &'static str,
}

impl From<ApplicationDecision> for ReviewBody {
    fn from(decision: ApplicationDecision) -> Self {
        Self {
            status: decision.resulting_status().as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MentorApplicationDto {
    #[serde(flatten)]
    id: DocumentKey<ApplicationId>,
    #[serde(alias = "name")]
    applicant_name: String,
    #[serde(default)]
    email: String,
    #[serde(default, alias = "skills")]
    expertise: Vec<String>,
    #[serde(default, alias = "experience")]
    experience_years: u32,
    status: Option<String>,
    #[serde(alias = "createdAt")]
    submitted_at: Option<DateTime<Utc>>,
}

impl MentorApplicationDto {
    pub(super) fn into_domain(self) -> MentorApplication {
        MentorApplication {
            status: self
                .status
                .as_deref()
                .map_or(ApplicationStatus::Pending, ApplicationStatus::from_label),
            id: self.id.0,
            applicant_name: self.applicant_name,
            email: self.email,
            expertise: self.expertise,
            experience_years: self.experience_years,
            submitted_at: self.submitted_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NotificationDto {
    #[serde(flatten)]
    id: DocumentKey<NotificationId>,
    message: String,
    #[serde(alias = "createdAt")]
    timestamp: DateTime<Utc>,
    #[serde(default, alias = "isRead")]
    read: bool,
}

impl NotificationDto {
    pub(super) fn into_domain(self) -> Notification {
        Notification {
            id: self.id.0,
            message: self.message,
            timestamp: self.timestamp,
            read: self.read,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn decodes_mongo_style_users() {
        let dto: UserDto = serde_json::from_str(
            r#"{"_id":"u1","name":"Ada","email":"ada@example.com",
                "role":"admin","status":"blocked"}"#,
        )
        .expect("user decodes");
        let user = dto.into_domain().expect("user maps");
        assert_eq!(user.id.as_ref(), "u1");
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.status, AccountStatus::Inactive);
        assert!(user.skills.is_empty());
    }

    #[rstest]
    #[case::mongo_only(r#""_id":"n1""#)]
    #[case::virtual_only(r#""id":"n1""#)]
    #[case::both(r#""_id":"n1","id":"n1""#)]
    fn reads_identifier_from_either_key(#[case] keys: &str) {
        let body = format!(r#"{{{keys},"message":"hi","timestamp":"2026-05-01T12:00:00Z"}}"#);
        let notification = serde_json::from_str::<NotificationDto>(&body)
            .expect("notification decodes")
            .into_domain();
        assert_eq!(notification.id.as_ref(), "n1");
    }

    #[test]
    fn mongo_key_wins_when_both_differ() {
        let dto: MentorDto =
            serde_json::from_str(r#"{"_id":"m1","id":"m2","name":"Lin"}"#).expect("decodes");
        assert_eq!(dto.into_domain().expect("maps").id.as_ref(), "m1");
    }

    #[test]
    fn rejects_records_without_identifier() {
        let result = serde_json::from_str::<CourseDto>(r#"{"title":"Rust"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_account_status() {
        let dto: MentorDto =
            serde_json::from_str(r#"{"id":"m1","name":"Lin","status":"frozen"}"#).expect("decodes");
        let error = dto.into_domain().expect_err("unknown status must fail");
        assert!(error.contains("frozen"));
    }

    #[test]
    fn rejects_blank_identifiers() {
        let result = serde_json::from_str::<CourseDto>(r#"{"_id":"","title":"Rust"}"#);
        assert!(result.is_err());
    }

    #[rstest]
    #[case::name(r#""Grace""#, Some("Grace"))]
    #[case::record(r#"{"_id":"u9","name":"Grace"}"#, Some("Grace"))]
    #[case::number("7", None)]
    fn reads_instructor_names(#[case] raw: &str, #[case] expected: Option<&str>) {
        let body = format!(r#"{{"_id":"c1","title":"Rust","instructor":{raw}}}"#);
        let course = serde_json::from_str::<CourseDto>(&body)
            .expect("course decodes")
            .into_domain()
            .expect("course maps");
        assert_eq!(course.instructor.as_deref(), expected);
    }

    #[test]
    fn clamps_enrolment_progress() {
        let dto: EnrolledCourseDto = serde_json::from_str(
            r#"{"course":{"_id":"c1","title":"Rust"},"progress":140.2,"totalLessons":10}"#,
        )
        .expect("enrolment decodes");
        assert_eq!(dto.into_domain().expect("maps").progress_percent, 100);
    }

    #[rstest]
    #[case::ids(r#"["c1","c2"]"#)]
    #[case::records(r#"[{"_id":"c1"},{"_id":"c2"}]"#)]
    #[case::document(r#"{"courses":["c1",{"_id":"c2"}]}"#)]
    fn accepts_wishlist_shapes(#[case] body: &str) {
        let wishlist = serde_json::from_str::<WishlistDto>(body)
            .expect("wishlist decodes")
            .into_domain();
        let ids: Vec<&str> = wishlist.course_ids.iter().map(AsRef::as_ref).collect();
        assert_eq!(ids, ["c1", "c2"]);
    }

    #[test]
    fn availability_serialises_lowercase_days() {
        let slot: AvailabilitySlot = "tue 09:00-10:30".parse().expect("slot parses");
        let availability = Availability::new("Europe/London", vec![slot]).expect("valid");
        let json = serde_json::to_value(AvailabilityDto::from(&availability)).expect("serialises");
        assert_eq!(
            json,
            serde_json::json!({
                "timezone": "Europe/London",
                "slots": [{ "day": "tue", "start": "09:00", "end": "10:30" }]
            })
        );
    }

    #[test]
    fn rejects_overlapping_server_slots() {
        let dto: AvailabilityDto = serde_json::from_str(
            r#"{"slots":[
                {"day":"mon","start":"09:00","end":"11:00"},
                {"day":"mon","start":"10:00","end":"12:00"}
            ]}"#,
        )
        .expect("availability decodes");
        assert!(dto.into_domain().is_err());
    }

    #[test]
    fn profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            bio: Some("Rustacean".to_owned()),
            ..ProfileUpdate::default()
        };
        let json = serde_json::to_value(ProfileUpdateBody::from(&update)).expect("serialises");
        assert_eq!(json, serde_json::json!({ "bio": "Rustacean" }));
    }

    #[test]
    fn review_body_carries_resulting_status() {
        let json = serde_json::to_value(ReviewBody::from(ApplicationDecision::Reject))
            .expect("serialises");
        assert_eq!(json, serde_json::json!({ "status": "rejected" }));
    }

    #[test]
    fn notifications_accept_created_at_and_is_read() {
        let dto: NotificationDto = serde_json::from_str(
            r#"{"_id":"n1","message":"Welcome","createdAt":"2026-01-02T03:04:05Z","isRead":true}"#,
        )
        .expect("notification decodes");
        let notification = dto.into_domain();
        assert!(notification.read);
        assert_eq!(notification.timestamp.to_rfc3339(), "2026-01-02T03:04:05+00:00");
    }

    #[test]
    fn rejects_relative_checkout_urls() {
        let dto: CheckoutSessionDto =
            serde_json::from_str(r#"{"id":"cs_1","url":"/checkout"}"#).expect("decodes");
        assert!(dto.into_domain().is_err());
    }
}
