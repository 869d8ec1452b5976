//! Mentor discovery, availability, and booking adapters.

use async_trait::async_trait;
use reqwest::Method;

use super::dto::{AvailabilityDto, BookingBody, BookingDto, MentorDto};
use super::{ApiClient, encode_segment, map_all};
use crate::domain::ports::{BookingService, MentorService, ServiceError};
use crate::domain::{Availability, Booking, BookingRequest, Mentor, MentorId};

const AVAILABILITY_PATH: &str = "/api/mentor/availability";

/// `MentorService` over `/api/mentor`.
#[derive(Debug, Clone)]
pub struct HttpMentorService {
    api: ApiClient,
}

impl HttpMentorService {
    /// Wrap a shared API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MentorService for HttpMentorService {
    async fn top_mentors(&self) -> Result<Vec<Mentor>, ServiceError> {
        let dtos: Vec<MentorDto> = self.api.get_json("/api/mentor/top-mentors", &[]).await?;
        map_all(dtos, MentorDto::into_domain)
    }

    async fn mentor(&self, mentor_id: &MentorId) -> Result<Mentor, ServiceError> {
        let path = format!("/api/mentor/{}", encode_segment(mentor_id.as_ref()));
        let dto: MentorDto = self.api.get_json(&path, &[]).await?;
        dto.into_domain().map_err(ServiceError::decode)
    }

    async fn availability(&self) -> Result<Availability, ServiceError> {
        let dto: AvailabilityDto = self.api.get_json(AVAILABILITY_PATH, &[]).await?;
        dto.into_domain().map_err(ServiceError::decode)
    }

    async fn update_availability(
        &self,
        availability: &Availability,
    ) -> Result<Availability, ServiceError> {
        let dto: AvailabilityDto = self
            .api
            .send_json(
                Method::PUT,
                AVAILABILITY_PATH,
                &AvailabilityDto::from(availability),
            )
            .await?;
        dto.into_domain().map_err(ServiceError::decode)
    }
}

/// `BookingService` over `/api/booking`.
#[derive(Debug, Clone)]
pub struct HttpBookingService {
    api: ApiClient,
}

impl HttpBookingService {
    /// Wrap a shared API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl BookingService for HttpBookingService {
    async fn book(&self, request: &BookingRequest) -> Result<Booking, ServiceError> {
        let dto: BookingDto = self
            .api
            .send_json(Method::POST, "/api/booking", &BookingBody::from(request))
            .await?;
        Ok(dto.into_domain())
    }

    async fn my_bookings(&self) -> Result<Vec<Booking>, ServiceError> {
        let dtos: Vec<BookingDto> = self.api.get_json("/api/booking/my-bookings", &[]).await?;
        Ok(dtos.into_iter().map(BookingDto::into_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::BookingStatus;
    use crate::outbound::http::test_server::{Canned, serve};

    #[tokio::test]
    async fn update_availability_puts_slots_and_returns_echo() {
        let (api, server) = serve(vec![Canned::json(
            200,
            r#"{"timezone":"UTC","slots":[{"day":"mon","start":"09:00","end":"10:00"}]}"#,
        )])
        .await;
        let slot = "mon 09:00-10:00".parse().expect("slot parses");
        let availability = Availability::new("UTC", vec![slot]).expect("valid availability");

        let saved = HttpMentorService::new(api)
            .update_availability(&availability)
            .await
            .expect("save succeeds");

        assert_eq!(saved, availability);
        let requests = server.await.expect("server task");
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].target, AVAILABILITY_PATH);
        assert_eq!(requests[0].json()["slots"][0]["day"], "mon");
    }

    #[tokio::test]
    async fn booking_posts_mentor_and_start() {
        let (api, server) = serve(vec![Canned::json(
            201,
            r#"{"_id":"b1","mentorId":"m1","mentorName":"Lin",
                "startTime":"2026-03-01T10:00:00Z","status":"confirmed"}"#,
        )])
        .await;
        let request = BookingRequest {
            mentor_id: MentorId::new("m1").expect("valid mentor id"),
            start: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).single().expect("valid time"),
            duration_minutes: 60,
        };

        let booking = HttpBookingService::new(api)
            .book(&request)
            .await
            .expect("booking succeeds");

        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.duration_minutes, 60);
        let requests = server.await.expect("server task");
        assert_eq!(
            requests[0].json(),
            serde_json::json!({
                "mentorId": "m1",
                "startTime": "2026-03-01T10:00:00Z",
                "duration": 60
            })
        );
    }

    #[tokio::test]
    async fn unknown_mentor_maps_to_not_found() {
        let (api, _server) = serve(vec![Canned::json(404, "")]).await;

        let error = HttpMentorService::new(api)
            .mentor(&MentorId::new("missing").expect("valid mentor id"))
            .await
            .expect_err("404 must fail");

        assert_eq!(error, ServiceError::not_found("status 404"));
    }
}
