//! Catalogue, enrolment, and wishlist adapters.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use super::dto::{CourseDto, CourseRefBody, EnrolledCourseDto, WishlistDto};
use super::{ApiClient, encode_segment, map_all};
use crate::domain::ports::{CourseService, ServiceError, WishlistService};
use crate::domain::{Course, CourseId, EnrolledCourse, Wishlist};

const WISHLIST_PATH: &str = "/api/wishlist";

fn course_path(course_id: &CourseId) -> String {
    format!("/api/course/{}", encode_segment(course_id.as_ref()))
}

/// `CourseService` over `/api/course`.
#[derive(Debug, Clone)]
pub struct HttpCourseService {
    api: ApiClient,
}

impl HttpCourseService {
    /// Wrap a shared API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CourseService for HttpCourseService {
    async fn top_courses(&self) -> Result<Vec<Course>, ServiceError> {
        let dtos: Vec<CourseDto> = self.api.get_json("/api/course/top-courses", &[]).await?;
        map_all(dtos, CourseDto::into_domain)
    }

    async fn enrolled_courses(&self) -> Result<Vec<EnrolledCourse>, ServiceError> {
        let dtos: Vec<EnrolledCourseDto> = self
            .api
            .get_json("/api/course/enrolled-courses", &[])
            .await?;
        map_all(dtos, EnrolledCourseDto::into_domain)
    }

    async fn course(&self, course_id: &CourseId) -> Result<Course, ServiceError> {
        let dto: CourseDto = self.api.get_json(&course_path(course_id), &[]).await?;
        dto.into_domain().map_err(ServiceError::decode)
    }

    async fn enroll(&self, course_id: &CourseId) -> Result<(), ServiceError> {
        let path = format!("{}/enroll", course_path(course_id));
        self.api.send_unit(Method::POST, &path, &json!({})).await
    }
}

/// `WishlistService` over `/api/wishlist`.
///
/// A 404 is passed through as [`ServiceError::NotFound`]; the wishlist view
/// decides that it means "empty".
#[derive(Debug, Clone)]
pub struct HttpWishlistService {
    api: ApiClient,
}

impl HttpWishlistService {
    /// Wrap a shared API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl WishlistService for HttpWishlistService {
    async fn wishlist(&self) -> Result<Wishlist, ServiceError> {
        let dto: WishlistDto = self.api.get_json(WISHLIST_PATH, &[]).await?;
        Ok(dto.into_domain())
    }

    async fn add(&self, course_id: &CourseId) -> Result<(), ServiceError> {
        self.api
            .send_unit(Method::POST, WISHLIST_PATH, &CourseRefBody { course_id })
            .await
    }

    async fn remove(&self, course_id: &CourseId) -> Result<(), ServiceError> {
        let path = format!("{WISHLIST_PATH}/{}", encode_segment(course_id.as_ref()));
        self.api.delete(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::http::test_server::{Canned, serve};

    fn course_id(raw: &str) -> CourseId {
        CourseId::new(raw).expect("valid course id")
    }

    #[tokio::test]
    async fn top_courses_decode_enveloped_lists() {
        let (api, server) = serve(vec![Canned::json(
            200,
            r#"{"data":[
                {"_id":"c1","title":"Rust","price":0},
                {"_id":"c2","title":"Go","price":19.5}
            ]}"#,
        )])
        .await;

        let courses = HttpCourseService::new(api)
            .top_courses()
            .await
            .expect("courses load");

        assert_eq!(courses.len(), 2);
        assert!(courses[0].is_free());
        let requests = server.await.expect("server task");
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].target, "/api/course/top-courses");
        assert_eq!(requests[0].header("accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn enroll_posts_to_course_path() {
        let (api, server) = serve(vec![Canned::json(200, r#"{"message":"enrolled"}"#)]).await;

        HttpCourseService::new(api)
            .enroll(&course_id("c1"))
            .await
            .expect("enrolment succeeds");

        let requests = server.await.expect("server task");
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].target, "/api/course/c1/enroll");
    }

    #[tokio::test]
    async fn missing_wishlist_surfaces_not_found() {
        let (api, _server) =
            serve(vec![Canned::json(404, r#"{"message":"Wishlist not found"}"#)]).await;

        let error = HttpWishlistService::new(api)
            .wishlist()
            .await
            .expect_err("404 must fail at the adapter");

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn add_posts_course_id_body() {
        let (api, server) = serve(vec![Canned::json(201, "{}")]).await;

        HttpWishlistService::new(api)
            .add(&course_id("c7"))
            .await
            .expect("add succeeds");

        let requests = server.await.expect("server task");
        assert_eq!(requests[0].target, WISHLIST_PATH);
        assert_eq!(requests[0].json(), serde_json::json!({ "courseId": "c7" }));
    }

    #[tokio::test]
    async fn remove_deletes_encoded_course_path() {
        let (api, server) = serve(vec![Canned::json(200, "{}")]).await;

        HttpWishlistService::new(api)
            .remove(&course_id("c/7"))
            .await
            .expect("remove succeeds");

        let requests = server.await.expect("server task");
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].target, "/api/wishlist/c%2F7");
    }
}
