//! Admin moderation adapter.

use async_trait::async_trait;
use reqwest::Method;

use super::dto::{
    MentorApplicationDto, MentorDto, MentorStatusBody, ReviewBody, UserDto, UserStatusBody,
};
use super::{ApiClient, encode_segment, map_all};
use crate::domain::ports::{AdminService, ServiceError};
use crate::domain::{
    AccountStatus, ApplicationDecision, ApplicationId, Mentor, MentorApplication, MentorId, User,
    UserId,
};

const USERS_PATH: &str = "/api/admin/allUsers";
const MENTORS_PATH: &str = "/api/admin/allMentors";

/// `AdminService` over `/api/admin`. Requires an admin session.
#[derive(Debug, Clone)]
pub struct HttpAdminService {
    api: ApiClient,
}

impl HttpAdminService {
    /// Build the adapter over a shared API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AdminService for HttpAdminService {
    async fn all_users(&self) -> Result<Vec<User>, ServiceError> {
        let dtos: Vec<UserDto> = self.api.get_json(USERS_PATH, &[]).await?;
        map_all(dtos, UserDto::into_domain)
    }

    async fn set_user_status(
        &self,
        user_id: &UserId,
        status: AccountStatus,
    ) -> Result<User, ServiceError> {
        let body = UserStatusBody {
            user_id,
            status: status.as_str(),
        };
        let dto: UserDto = self.api.send_json(Method::PATCH, USERS_PATH, &body).await?;
        dto.into_domain().map_err(ServiceError::decode)
    }

    async fn all_mentors(&self) -> Result<Vec<Mentor>, ServiceError> {
        let dtos: Vec<MentorDto> = self.api.get_json(MENTORS_PATH, &[]).await?;
        map_all(dtos, MentorDto::into_domain)
    }

    async fn set_mentor_status(
        &self,
        mentor_id: &MentorId,
        status: AccountStatus,
    ) -> Result<Mentor, ServiceError> {
        let body = MentorStatusBody {
            mentor_id,
            status: status.as_str(),
        };
        let dto: MentorDto = self.api.send_json(Method::PATCH, MENTORS_PATH, &body).await?;
        dto.into_domain().map_err(ServiceError::decode)
    }

    async fn mentor_applications(&self) -> Result<Vec<MentorApplication>, ServiceError> {
        let dtos: Vec<MentorApplicationDto> = self
            .api
            .get_json("/api/admin/mentor-applications", &[])
            .await?;
        Ok(dtos
            .into_iter()
            .map(MentorApplicationDto::into_domain)
            .collect())
    }

    async fn review_application(
        &self,
        application_id: &ApplicationId,
        decision: ApplicationDecision,
    ) -> Result<MentorApplication, ServiceError> {
        let path = format!(
            "/api/admin/mentor-application/{}",
            encode_segment(application_id.as_ref())
        );
        let dto: MentorApplicationDto = self
            .api
            .send_json(Method::PATCH, &path, &ReviewBody::from(decision))
            .await?;
        Ok(dto.into_domain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApplicationStatus;
    use crate::outbound::http::test_server::{Canned, serve};

    #[tokio::test]
    async fn user_toggle_patches_id_and_status() {
        let (api, server) = serve(vec![Canned::json(
            200,
            r#"{"data":{"_id":"u1","name":"Ada","email":"a@example.com","status":"inactive"}}"#,
        )])
        .await;

        let user = HttpAdminService::new(api)
            .set_user_status(&UserId::new("u1").expect("valid id"), AccountStatus::Inactive)
            .await
            .expect("toggle succeeds");

        assert_eq!(user.status, AccountStatus::Inactive);
        let requests = server.await.expect("server task");
        assert_eq!(requests[0].method, "PATCH");
        assert_eq!(requests[0].target, USERS_PATH);
        assert_eq!(
            requests[0].json(),
            serde_json::json!({ "userId": "u1", "status": "inactive" })
        );
    }

    #[tokio::test]
    async fn review_patches_application_path() {
        let (api, server) = serve(vec![Canned::json(
            200,
            r#"{"_id":"a1","name":"Lin","status":"approved"}"#,
        )])
        .await;

        let application = HttpAdminService::new(api)
            .review_application(
                &ApplicationId::new("a1").expect("valid id"),
                ApplicationDecision::Approve,
            )
            .await
            .expect("review succeeds");

        assert_eq!(application.status, ApplicationStatus::Approved);
        let requests = server.await.expect("server task");
        assert_eq!(requests[0].target, "/api/admin/mentor-application/a1");
        assert_eq!(requests[0].json(), serde_json::json!({ "status": "approved" }));
    }

    #[tokio::test]
    async fn non_admin_sessions_are_forbidden() {
        let (api, _server) = serve(vec![Canned::json(403, r#"{"message":"Admins only"}"#)]).await;

        let error = HttpAdminService::new(api)
            .all_mentors()
            .await
            .expect_err("403 must fail");

        assert_eq!(error, ServiceError::forbidden("Admins only"));
    }
}
