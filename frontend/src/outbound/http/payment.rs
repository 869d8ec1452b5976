//! Checkout and purchase history adapter.

use async_trait::async_trait;
use reqwest::Method;

use super::dto::{CheckoutSessionDto, CourseRefBody, PurchaseDto};
use super::ApiClient;
use crate::domain::ports::{PaymentService, ServiceError};
use crate::domain::{CheckoutSession, CourseId, Purchase};

/// `PaymentService` over `/api/payment`.
#[derive(Debug, Clone)]
pub struct HttpPaymentService {
    api: ApiClient,
}

impl HttpPaymentService {
    /// Wrap a shared API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PaymentService for HttpPaymentService {
    async fn create_checkout_session(
        &self,
        course_id: &CourseId,
    ) -> Result<CheckoutSession, ServiceError> {
        let dto: CheckoutSessionDto = self
            .api
            .send_json(
                Method::POST,
                "/api/payment/create-checkout-session",
                &CourseRefBody { course_id },
            )
            .await?;
        dto.into_domain().map_err(ServiceError::decode)
    }

    async fn purchase_history(&self) -> Result<Vec<Purchase>, ServiceError> {
        let dtos: Vec<PurchaseDto> = self.api.get_json("/api/payment/history", &[]).await?;
        Ok(dtos.into_iter().map(PurchaseDto::into_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::http::test_server::{Canned, serve};

    #[tokio::test]
    async fn checkout_returns_redirect_url() {
        let (api, server) = serve(vec![Canned::json(
            200,
            r#"{"id":"cs_test_1","url":"https://checkout.stripe.com/c/pay/cs_test_1"}"#,
        )])
        .await;

        let session = HttpPaymentService::new(api)
            .create_checkout_session(&CourseId::new("c1").expect("valid course id"))
            .await
            .expect("checkout succeeds");

        assert_eq!(session.session_id, "cs_test_1");
        assert!(session.url.starts_with("https://checkout.stripe.com/"));
        let requests = server.await.expect("server task");
        assert_eq!(requests[0].target, "/api/payment/create-checkout-session");
        assert_eq!(requests[0].json(), serde_json::json!({ "courseId": "c1" }));
    }

    #[tokio::test]
    async fn server_errors_keep_status() {
        let (api, _server) = serve(vec![Canned::json(503, "upstream down")]).await;

        let error = HttpPaymentService::new(api)
            .purchase_history()
            .await
            .expect_err("503 must fail");

        assert_eq!(error, ServiceError::server(503_u16, "upstream down"));
    }
}
