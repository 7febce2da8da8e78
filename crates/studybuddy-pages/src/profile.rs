//! Profile page

use serde::Serialize;
use serde_json::{json, Value};

use studybuddy_session::models::{CheckoutSession, Payment, SubscriptionPlan, SubscriptionStatus};
use studybuddy_session::{RequestOptions, SessionManager, User};

use crate::dashboard::format_study_time;
use crate::error::PageError;
use crate::loadable::Loadable;
use crate::{surface, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub display_name: String,
    pub initials: String,
    pub username: String,
    pub email: String,
    pub is_premium: bool,
    pub premium_expires: Option<String>,
    pub streak_count: u32,
    pub study_time_label: String,
}

impl From<&User> for ProfileView {
    fn from(user: &User) -> Self {
        Self {
            display_name: user.display_name(),
            initials: user.initials(),
            username: user.username.clone(),
            email: user.email.clone(),
            is_premium: user.is_premium,
            premium_expires: user.premium_expires.clone(),
            streak_count: user.streak_count,
            study_time_label: format_study_time(user.total_study_time),
        }
    }
}

pub struct ProfilePage {
    session: SessionManager,
    subscription: Loadable<Option<SubscriptionStatus>>,
    plans: Vec<SubscriptionPlan>,
}

impl ProfilePage {
    pub fn new(session: SessionManager) -> Self {
        Self {
            session,
            subscription: Loadable::new(),
            plans: Vec::new(),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn view(&self) -> Result<ProfileView> {
        let user = self.session.user().ok_or(PageError::NotAuthenticated)?;
        Ok(ProfileView::from(&user))
    }

    /// Apply `partial` to the signed-in user. Changes are local to this
    /// client.
    pub fn edit(&self, partial: Value) -> Result<User> {
        let updated = surface(&self.session, self.session.update_user(partial))?;
        let user = surface(&self.session, updated.ok_or(PageError::NotAuthenticated))?;

        tracing::info!(user_id = user.id, "Profile updated");
        self.session.notifier().success("Profile updated");

        Ok(user)
    }

    /// Fetch the subscription status along with the plans on offer
    pub async fn load_subscription(&mut self) -> Result<&SubscriptionStatus> {
        self.subscription.begin();

        let result = self
            .session
            .request_as::<SubscriptionStatus>(
                "/payment/subscription-status",
                RequestOptions::get(),
            )
            .await;
        let status = match surface(&self.session, result) {
            Ok(status) => status,
            Err(e) => {
                self.subscription.fail();
                return Err(e);
            }
        };

        let result = self
            .session
            .request_field::<Vec<SubscriptionPlan>>(
                "/payment/subscription-plans",
                RequestOptions::get(),
                "plans",
            )
            .await;
        match result {
            Ok(plans) => self.plans = plans,
            Err(e) => tracing::error!(error = %e, "Failed to fetch subscription plans"),
        }

        tracing::debug!(
            is_premium = status.is_premium,
            days_remaining = status.days_remaining,
            "Loaded subscription"
        );

        self.subscription.finish(None);
        let status: &SubscriptionStatus = self.subscription.data_mut().insert(status);
        Ok(status)
    }

    pub async fn payment_history(&self) -> Result<Vec<Payment>> {
        let result = self
            .session
            .request_field::<Vec<Payment>>(
                "/payment/payment-history",
                RequestOptions::get(),
                "payments",
            )
            .await;
        surface(&self.session, result)
    }

    /// Start a payment for `plan_id`. Premium is granted by the backend
    /// once the checkout completes, so the local user is left unchanged.
    pub async fn upgrade(&self, plan_id: &str) -> Result<CheckoutSession> {
        let plan_id = plan_id.trim();
        if plan_id.is_empty() {
            return surface(
                &self.session,
                Err(PageError::InvalidInput("Plan ID is required".to_string())),
            );
        }

        let result = self
            .session
            .request_as::<CheckoutSession>(
                "/payment/create-payment",
                RequestOptions::post(json!({ "plan_id": plan_id })),
            )
            .await;
        let checkout = surface(&self.session, result)?;

        tracing::info!(
            payment_id = %checkout.payment_id,
            plan_id,
            "Payment created"
        );
        self.session.notifier().success(format!(
            "Payment created. Complete checkout at {}",
            checkout.checkout_url
        ));

        Ok(checkout)
    }

    pub async fn cancel_subscription(&mut self) -> Result<()> {
        let result = self
            .session
            .request("/payment/cancel-subscription", RequestOptions::post_empty())
            .await;
        surface(&self.session, result)?;

        surface(
            &self.session,
            self.session
                .update_user(json!({ "is_premium": false, "premium_expires": null })),
        )?;
        if let Some(status) = self.subscription.data_mut() {
            status.is_premium = false;
            status.is_active = false;
            status.premium_expires = None;
            status.days_remaining = 0;
        }

        tracing::info!("Subscription cancelled");
        self.session
            .notifier()
            .success("Subscription cancelled successfully");

        Ok(())
    }

    pub fn subscription(&self) -> Option<&SubscriptionStatus> {
        self.subscription.data().as_ref()
    }

    pub fn plans(&self) -> &[SubscriptionPlan] {
        &self.plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{signed_in, user_json};
    use studybuddy_session::NoticeLevel;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_view_and_edit() {
        let server = MockServer::start().await;
        let session = signed_in(&server).await;
        let page = ProfilePage::new(session.clone());

        let view = page.view().unwrap();
        assert_eq!(view.display_name, "Ada Lovelace");
        assert_eq!(view.initials, "AL");
        assert_eq!(view.study_time_label, "2h 5m");

        let user = page.edit(json!({"first_name": "Augusta"})).unwrap();
        assert_eq!(user.first_name, "Augusta");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(page.view().unwrap().display_name, "Augusta Lovelace");

        let notices = session.notifier().drain();
        assert_eq!(notices.last().unwrap().level, NoticeLevel::Success);
    }

    #[tokio::test]
    async fn test_edit_rejects_non_object() {
        let server = MockServer::start().await;
        let page = ProfilePage::new(signed_in(&server).await);
        assert!(page.edit(json!("nope")).is_err());
    }

    #[tokio::test]
    async fn test_load_subscription_and_cancel() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/verify-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {
                    "id": 1,
                    "first_name": "Ada",
                    "is_premium": true,
                    "premium_expires": "2030-01-01T00:00:00"
                }
            })))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/payment/subscription-status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "is_premium": true,
                "premium_expires": "2030-01-01T00:00:00",
                "is_active": true,
                "days_remaining": 30
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/payment/subscription-plans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "plans": [
                    {"id": "monthly", "name": "Monthly", "price": 9.99, "currency": "USD",
                     "duration": 30, "features": ["Unlimited AI"]}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/payment/cancel-subscription"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Subscription cancelled successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = signed_in(&server).await;
        assert!(session.user().unwrap().is_premium);

        let mut page = ProfilePage::new(session.clone());
        let status = page.load_subscription().await.unwrap();
        assert!(status.is_active);
        assert_eq!(status.days_remaining, 30);
        assert_eq!(page.plans()[0].features, vec!["Unlimited AI".to_string()]);

        page.cancel_subscription().await.unwrap();
        let user = session.user().unwrap();
        assert!(!user.is_premium);
        assert_eq!(user.premium_expires, None);
        assert!(!page.subscription().unwrap().is_premium);
    }

    #[tokio::test]
    async fn test_cancel_without_subscription_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payment/cancel-subscription"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "No active subscription to cancel"
            })))
            .mount(&server)
            .await;

        let session = signed_in(&server).await;
        let mut page = ProfilePage::new(session.clone());

        let err = page.cancel_subscription().await.unwrap_err();
        assert_eq!(err.to_string(), "No active subscription to cancel");
        let unchanged: User = serde_json::from_value(user_json()).unwrap();
        assert_eq!(session.user().unwrap(), unchanged);
    }

    #[tokio::test]
    async fn test_payment_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/payment/payment-history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payments": [{"id": "p1", "amount": 9.99, "currency": "USD", "status": "completed"}]
            })))
            .mount(&server)
            .await;

        let page = ProfilePage::new(signed_in(&server).await);
        let payments = page.payment_history().await.unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].status, "completed");
    }

    #[tokio::test]
    async fn test_upgrade_returns_checkout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payment/create-payment"))
            .and(body_json(json!({"plan_id": "premium_yearly"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Payment created successfully",
                "payment_id": "pay-42",
                "checkout_url": "https://checkout.example.com/pay-42",
                "amount": 2500,
                "currency": "KES"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = signed_in(&server).await;
        let page = ProfilePage::new(session.clone());

        let checkout = page.upgrade("premium_yearly").await.unwrap();
        assert_eq!(checkout.payment_id, "pay-42");
        assert_eq!(checkout.checkout_url, "https://checkout.example.com/pay-42");
        assert_eq!(checkout.amount, 2500.0);
        assert_eq!(checkout.currency, "KES");
        assert!(!session.user().unwrap().is_premium);

        let notices = session.notifier().drain();
        let last = notices.last().unwrap();
        assert_eq!(last.level, NoticeLevel::Success);
        assert!(last.message.contains("https://checkout.example.com/pay-42"));
    }

    #[tokio::test]
    async fn test_upgrade_invalid_plan_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payment/create-payment"))
            .and(body_json(json!({"plan_id": "premium_monthly"})))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Invalid plan selected"
            })))
            .mount(&server)
            .await;

        let session = signed_in(&server).await;
        let page = ProfilePage::new(session.clone());

        let err = page.upgrade("premium_monthly").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid plan selected");

        let notices = session.notifier().drain();
        let last = notices.last().unwrap();
        assert_eq!(last.level, NoticeLevel::Error);
        assert_eq!(last.message, "Invalid plan selected");

        assert!(matches!(
            page.upgrade("  ").await,
            Err(PageError::InvalidInput(_))
        ));
    }
}
