//! In-memory port doubles shared by the behaviour suites.
//!
//! The `Mock*` types generated by `mockall` only exist inside the library's
//! own unit tests, so integration tests drive the views through these.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use frontend::domain::ports::{
    BookingService, CourseService, DashboardService, NotificationService, PaymentService,
    ServiceError, UserService, WishlistService,
};
use frontend::domain::{
    AccountStatus, Booking, BookingId, BookingRequest, BookingStatus, Course, CourseId,
    DashboardPeriod, DashboardSummary, EnrolledCourse, MentorId, Notification, NotificationId,
    ProfileUpdate, Purchase, User, UserId, UserRole, Wishlist,
};

fn locked<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn notification(id: &str, message: &str, read: bool) -> Notification {
    Notification {
        id: NotificationId::new(id).expect("valid notification id"),
        message: message.to_owned(),
        timestamp: Utc
            .with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
        read,
    }
}

pub fn course_id(raw: &str) -> CourseId {
    CourseId::new(raw).expect("valid course id")
}

/// Notification port answering from a queue of scripted results.
#[derive(Default)]
pub struct ScriptedNotifications {
    responses: Mutex<VecDeque<Result<Vec<Notification>, ServiceError>>>,
}

impl ScriptedNotifications {
    pub fn push(&self, response: Result<Vec<Notification>, ServiceError>) {
        locked(&self.responses).push_back(response);
    }
}

#[async_trait]
impl NotificationService for ScriptedNotifications {
    async fn notifications(&self) -> Result<Vec<Notification>, ServiceError> {
        locked(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::transport("no scripted response")))
    }
}

/// Wishlist port backed by a vector.
///
/// `None` models a user with no wishlist document, which the API reports as
/// 404. A pending failure is returned once by the next `wishlist` call.
#[derive(Default)]
pub struct InMemoryWishlist {
    courses: Mutex<Option<Vec<CourseId>>>,
    next_failure: Mutex<Option<ServiceError>>,
}

impl InMemoryWishlist {
    pub fn with_courses(ids: &[&str]) -> Self {
        Self {
            courses: Mutex::new(Some(ids.iter().map(|id| course_id(id)).collect())),
            next_failure: Mutex::new(None),
        }
    }

    pub fn fail_next_fetch(&self, error: ServiceError) {
        *locked(&self.next_failure) = Some(error);
    }
}

#[async_trait]
impl WishlistService for InMemoryWishlist {
    async fn wishlist(&self) -> Result<Wishlist, ServiceError> {
        if let Some(error) = locked(&self.next_failure).take() {
            return Err(error);
        }
        locked(&self.courses)
            .clone()
            .map(|course_ids| Wishlist { course_ids })
            .ok_or_else(|| ServiceError::not_found("wishlist not found"))
    }

    async fn add(&self, course_id: &CourseId) -> Result<(), ServiceError> {
        let mut courses = locked(&self.courses);
        let list = courses.get_or_insert_with(Vec::new);
        if !list.contains(course_id) {
            list.push(course_id.clone());
        }
        Ok(())
    }

    async fn remove(&self, course_id: &CourseId) -> Result<(), ServiceError> {
        match locked(&self.courses).as_mut() {
            Some(list) => {
                list.retain(|id| id != course_id);
                Ok(())
            }
            None => Err(ServiceError::not_found("wishlist not found")),
        }
    }
}

/// One backend answering every profile port, recording which were called.
#[derive(Default)]
pub struct ProfileBackend {
    calls: Mutex<Vec<&'static str>>,
}

impl ProfileBackend {
    pub fn calls(&self) -> Vec<&'static str> {
        locked(&self.calls).clone()
    }

    fn record(&self, call: &'static str) {
        locked(&self.calls).push(call);
    }

    fn user() -> User {
        User {
            id: UserId::new("u1").expect("valid user id"),
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            role: UserRole::Student,
            status: AccountStatus::Active,
            avatar: None,
            skills: vec!["rust".to_owned()],
            bio: None,
        }
    }

    fn course() -> Course {
        Course {
            id: course_id("c1"),
            title: "Rust from scratch".to_owned(),
            description: None,
            instructor: Some("Grace".to_owned()),
            price: 0.0,
            rating: None,
            enrolled_count: 3,
            thumbnail: None,
        }
    }
}

#[async_trait]
impl UserService for ProfileBackend {
    async fn current_profile(&self) -> Result<User, ServiceError> {
        self.record("current_profile");
        Ok(Self::user())
    }

    async fn update_profile(&self, _update: &ProfileUpdate) -> Result<User, ServiceError> {
        self.record("update_profile");
        Ok(Self::user())
    }
}

#[async_trait]
impl DashboardService for ProfileBackend {
    async fn summary(&self, period: DashboardPeriod) -> Result<DashboardSummary, ServiceError> {
        self.record("dashboard");
        Ok(DashboardSummary {
            period,
            enrolled_courses: 2,
            completed_courses: 1,
            hours_learned: 4.5,
            sessions_booked: 1,
        })
    }
}

#[async_trait]
impl CourseService for ProfileBackend {
    async fn top_courses(&self) -> Result<Vec<Course>, ServiceError> {
        self.record("top_courses");
        Ok(vec![Self::course()])
    }

    async fn enrolled_courses(&self) -> Result<Vec<EnrolledCourse>, ServiceError> {
        self.record("enrolled_courses");
        Ok(vec![EnrolledCourse {
            course: Self::course(),
            progress_percent: 40,
            completed_lessons: 2,
            total_lessons: 5,
        }])
    }

    async fn course(&self, _course_id: &CourseId) -> Result<Course, ServiceError> {
        self.record("course");
        Ok(Self::course())
    }

    async fn enroll(&self, _course_id: &CourseId) -> Result<(), ServiceError> {
        self.record("enroll");
        Ok(())
    }
}

#[async_trait]
impl BookingService for ProfileBackend {
    async fn book(&self, _request: &BookingRequest) -> Result<Booking, ServiceError> {
        self.record("book");
        Err(ServiceError::rejected(409_u16, "slot taken"))
    }

    async fn my_bookings(&self) -> Result<Vec<Booking>, ServiceError> {
        self.record("my_bookings");
        Ok(vec![Booking {
            id: BookingId::new("b1").expect("valid booking id"),
            mentor_id: MentorId::new("m1").expect("valid mentor id"),
            mentor_name: "Grace Hopper".to_owned(),
            start: Utc
                .with_ymd_and_hms(2026, 4, 1, 10, 0, 0)
                .single()
                .expect("valid timestamp"),
            duration_minutes: 60,
            status: BookingStatus::Confirmed,
        }])
    }
}

#[async_trait]
impl WishlistService for ProfileBackend {
    async fn wishlist(&self) -> Result<Wishlist, ServiceError> {
        self.record("wishlist");
        Err(ServiceError::not_found("wishlist not found"))
    }

    async fn add(&self, _course_id: &CourseId) -> Result<(), ServiceError> {
        self.record("wishlist_add");
        Ok(())
    }

    async fn remove(&self, _course_id: &CourseId) -> Result<(), ServiceError> {
        self.record("wishlist_remove");
        Ok(())
    }
}

#[async_trait]
impl PaymentService for ProfileBackend {
    async fn create_checkout_session(
        &self,
        _course_id: &CourseId,
    ) -> Result<frontend::domain::CheckoutSession, ServiceError> {
        self.record("checkout");
        Err(ServiceError::server(500_u16, "payments offline"))
    }

    async fn purchase_history(&self) -> Result<Vec<Purchase>, ServiceError> {
        self.record("purchase_history");
        Ok(Vec::new())
    }
}
