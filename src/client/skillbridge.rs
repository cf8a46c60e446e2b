//! SkillBridge API client implementation

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::api::{AuthApi, ChatApi, DashboardApi, JobApi, ProjectApi, ResumeApi, SubmissionApi};
use super::gateway::Gateway;
use super::models::{
    ApplicationStatus, AuthResponse, ChatMessage, ConnectionAction, ConnectionRequest,
    Conversation, GoogleOAuthRequest, Guide, JobApplication, JobApplicationRequest, JobListing,
    JobPosting, LoginRequest, NewProject, NewSubmission, ProfileUpdate, Project,
    ProjectApplication, ResumeRequest, ResumeResponse, Role, SendMessageRequest,
    SignupRequest, StartConversationResponse, Submission, SubmissionReview, UserProfile,
};
use crate::error::{ApiError, Error, Result};
use crate::events::{AppEvent, EventBus};
use crate::session::{RefreshGate, SessionStore, token};

/// Take `key` out of a response envelope, or use the whole body when the
/// backend sent the payload bare. A JSON `null` becomes `T::default()`.
fn envelope<T: DeserializeOwned + Default>(mut body: Value, key: &str) -> Result<T> {
    let inner = if body.get(key).is_some() {
        body[key].take()
    } else {
        body
    };

    if inner.is_null() {
        return Ok(T::default());
    }

    serde_json::from_value(inner).map_err(|e| {
        ApiError::InvalidResponse(format!("Unexpected `{}` payload: {}", key, e)).into()
    })
}

/// Like [`envelope`], but a missing or `null` payload is an error.
fn required_envelope<T: DeserializeOwned>(mut body: Value, key: &str) -> Result<T> {
    let inner = if body.get(key).is_some() {
        body[key].take()
    } else {
        body
    };

    if inner.is_null() {
        return Err(ApiError::InvalidResponse(format!("Response has no `{}` payload", key)).into());
    }

    serde_json::from_value(inner).map_err(|e| {
        ApiError::InvalidResponse(format!("Unexpected `{}` payload: {}", key, e)).into()
    })
}

fn is_unauthorized(err: &Error) -> bool {
    matches!(err.as_api(), Some(ApiError::Unauthorized(_)))
}

fn token_from(body: Value) -> Result<String> {
    let auth: AuthResponse = serde_json::from_value(body)
        .map_err(|e| ApiError::InvalidResponse(format!("Unexpected auth payload: {}", e)))?;
    auth.token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::InvalidResponse("Response did not include a token".into()).into())
}

/// SkillBridge API client
///
/// Reads the bearer token from the session for every protected call and
/// writes the token and cached profile back after sign-in.
pub struct SkillBridgeClient {
    gateway: Gateway,
    session: SessionStore,
    events: EventBus,
    refresh: RefreshGate,
}

impl SkillBridgeClient {
    pub fn new(gateway: Gateway, session: SessionStore, events: EventBus) -> Self {
        Self {
            gateway,
            session,
            events,
            refresh: RefreshGate::new(),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }

    /// Stored token for a protected call.
    ///
    /// The client-side check is advisory: a token that fails it is still
    /// sent and the server has the final say.
    fn bearer(&self) -> Result<String> {
        let token = self.session.get_token().ok_or(ApiError::NotLoggedIn)?;
        if !token::is_valid(&token) {
            log::warn!("Stored token looks expired or malformed, sending it anyway");
        }
        Ok(token)
    }

    async fn get(&self, endpoint: &str) -> Result<Value> {
        let token = self.bearer()?;
        self.gateway
            .call(Method::GET, endpoint, None, Some(&token))
            .await
    }

    async fn get_public(&self, endpoint: &str) -> Result<Value> {
        self.gateway.call(Method::GET, endpoint, None, None).await
    }

    async fn send<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<Value> {
        let token = self.bearer()?;
        let body = serde_json::to_value(body)?;
        self.gateway
            .call(method, endpoint, Some(&body), Some(&token))
            .await
    }

    async fn delete(&self, endpoint: &str) -> Result<()> {
        let token = self.bearer()?;
        self.gateway
            .call(Method::DELETE, endpoint, None, Some(&token))
            .await?;
        Ok(())
    }

    /// Persist a fresh token plus the profile that came with it, or fetch it.
    async fn establish_session(&self, token: &str, user: Option<UserProfile>) -> Result<UserProfile> {
        self.session.save_token(token)?;
        match user {
            Some(user) => {
                self.session.save_user(&user)?;
                Ok(user)
            }
            None => self.get_profile().await,
        }
    }

    async fn fetch_refreshed_token(&self, stale: String) -> Result<String> {
        let body = self
            .gateway
            .call_recoverable(Method::POST, "/refresh-token", None, Some(&stale))
            .await?;
        token_from(body)
    }

    async fn refresh_and_retry_profile(&self, stale: &str, body: &Value) -> Result<Value> {
        let fresh = self
            .refresh
            .refresh(&self.session, stale, |stale| self.fetch_refreshed_token(stale))
            .await?;
        self.gateway
            .call_recoverable(Method::PUT, "/profile", Some(body), Some(&fresh))
            .await
    }

    fn force_logout(&self) {
        if let Err(e) = self.session.logout() {
            log::warn!("Failed to clear session: {}", e);
        }
        self.events.publish(AppEvent::SessionEnded);
    }
}

#[async_trait]
impl AuthApi for SkillBridgeClient {
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let request = serde_json::to_value(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let body = self
            .gateway
            .call(Method::POST, "/login", Some(&request), None)
            .await?;
        let token = token_from(body)?;
        log::debug!("Signed in as {}", email);
        self.establish_session(&token, None).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<Option<UserProfile>> {
        let request = serde_json::to_value(request)?;
        let body = self
            .gateway
            .call(Method::POST, "/signup", Some(&request), None)
            .await?;
        let auth: AuthResponse = serde_json::from_value(body).unwrap_or_default();

        match auth.token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(Some(self.establish_session(&token, auth.user).await?)),
            None => Ok(None),
        }
    }

    async fn google_oauth(&self, google_token: &str, role: Role) -> Result<UserProfile> {
        let request = serde_json::to_value(GoogleOAuthRequest {
            google_token: google_token.to_string(),
            role,
        })?;
        let body = self
            .gateway
            .call(Method::POST, "/google-oauth", Some(&request), None)
            .await?;
        let auth: AuthResponse = serde_json::from_value(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Unexpected auth payload: {}", e)))?;
        let token = auth
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("Response did not include a token".into()))?;
        self.establish_session(&token, auth.user).await
    }

    async fn get_profile(&self) -> Result<UserProfile> {
        let body = self.get("/profile").await?;
        let user: UserProfile = required_envelope(body, "user")?;
        self.session.save_user(&user)?;
        Ok(user)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let body = serde_json::to_value(update)?;
        // Captured up front: a 401 clears the store before we can read it again
        let token = self.bearer()?;

        // A 401 leaves the session alone here; it only ends if recovery fails
        let response = match self
            .gateway
            .call_recoverable(Method::PUT, "/profile", Some(&body), Some(&token))
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_expiration() => {
                log::info!("Token expired during profile update, refreshing once");
                match self.refresh_and_retry_profile(&token, &body).await {
                    Ok(response) => response,
                    Err(e) => {
                        self.force_logout();
                        return Err(e);
                    }
                }
            }
            Err(e) => {
                if is_unauthorized(&e) {
                    self.force_logout();
                }
                return Err(e);
            }
        };

        let user: UserProfile = required_envelope(response, "user")?;
        self.session.save_user(&user)?;
        Ok(user)
    }

    async fn refresh_token(&self) -> Result<String> {
        let stale = self.bearer()?;
        let refreshed = self
            .refresh
            .refresh(&self.session, &stale, |stale| self.fetch_refreshed_token(stale))
            .await;
        if let Err(e) = &refreshed {
            if is_unauthorized(e) {
                self.force_logout();
            }
        }
        refreshed
    }
}

#[async_trait]
impl ProjectApi for SkillBridgeClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        envelope(self.get_public("/projects").await?, "projects")
    }

    async fn get_project(&self, id: u64) -> Result<Project> {
        let body = self.get_public(&format!("/projects/{}", id)).await?;
        let key = if body.get("data").is_some() { "data" } else { "project" };
        envelope(body, key)
    }

    async fn post_project(&self, project: &NewProject) -> Result<Project> {
        envelope(self.send(Method::POST, "/projects", project).await?, "project")
    }

    async fn delete_project(&self, id: u64) -> Result<()> {
        self.delete(&format!("/projects/{}", id)).await
    }

    async fn apply_to_project(&self, id: u64) -> Result<ProjectApplication> {
        let body = self
            .send(Method::POST, "/projects/apply", &json!({ "project_id": id }))
            .await?;
        envelope(body, "application")
    }

    async fn withdraw_application(&self, project_id: u64) -> Result<()> {
        self.delete(&format!("/projects/{}/apply", project_id))
            .await
    }

    async fn project_applicants(&self, id: u64) -> Result<Vec<ProjectApplication>> {
        envelope(
            self.get(&format!("/projects/{}/applicants", id)).await?,
            "applicants",
        )
    }

    async fn company_projects(&self) -> Result<Vec<Project>> {
        envelope(self.get("/company/projects").await?, "projects")
    }

    async fn submit_github_repo(&self, project_id: u64, repo_url: &str) -> Result<()> {
        self.send(
            Method::POST,
            "/projects/submit-github",
            &json!({ "project_id": project_id, "github_repo_url": repo_url }),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SubmissionApi for SkillBridgeClient {
    async fn submit_project(
        &self,
        project_id: u64,
        submission: &NewSubmission,
    ) -> Result<Submission> {
        let body = self
            .send(
                Method::POST,
                &format!("/projects/{}/submit", project_id),
                submission,
            )
            .await?;
        envelope(body, "submission")
    }

    async fn my_submissions(&self) -> Result<Vec<Submission>> {
        envelope(self.get("/my-submissions").await?, "submissions")
    }

    async fn project_submissions(&self, project_id: u64) -> Result<Vec<Submission>> {
        envelope(
            self.get(&format!("/projects/{}/submissions", project_id))
                .await?,
            "submissions",
        )
    }

    async fn review_submission(&self, id: u64, review: &SubmissionReview) -> Result<Submission> {
        let body = self
            .send(Method::POST, &format!("/submissions/{}/review", id), review)
            .await?;
        envelope(body, "submission")
    }

    async fn update_review(&self, id: u64, review: &SubmissionReview) -> Result<Submission> {
        let body = self
            .send(Method::PUT, &format!("/submissions/{}/review", id), review)
            .await?;
        envelope(body, "submission")
    }

    async fn guide_submissions(&self) -> Result<Vec<Submission>> {
        envelope(self.get("/guide/submissions").await?, "submissions")
    }
}

#[async_trait]
impl DashboardApi for SkillBridgeClient {
    async fn student_dashboard(&self) -> Result<Value> {
        self.get("/dashboard/student").await
    }

    async fn company_dashboard(&self) -> Result<Value> {
        self.get("/dashboard/company").await
    }

    async fn guide_dashboard(&self) -> Result<Value> {
        self.get("/dashboard/guide").await
    }

    async fn my_applications(&self) -> Result<Vec<ProjectApplication>> {
        envelope(self.get("/my-applications").await?, "applications")
    }

    async fn company_applications(&self) -> Result<Vec<ProjectApplication>> {
        envelope(self.get("/company/applications").await?, "applications")
    }
}

#[async_trait]
impl ChatApi for SkillBridgeClient {
    async fn list_guides(&self) -> Result<Vec<Guide>> {
        envelope(self.get_public("/guides").await?, "guides")
    }

    async fn connected_guides(&self) -> Result<Vec<u64>> {
        envelope(
            self.get("/chat/connected-guides").await?,
            "connected_guide_ids",
        )
    }

    async fn start_conversation(&self, guide_id: u64) -> Result<StartConversationResponse> {
        let body = self
            .send(Method::POST, "/chat/start", &json!({ "guide_id": guide_id }))
            .await?;
        Ok(serde_json::from_value(body).unwrap_or_default())
    }

    async fn send_message(&self, message: &SendMessageRequest) -> Result<ChatMessage> {
        envelope(self.send(Method::POST, "/chat/send", message).await?, "chat")
    }

    async fn chat_history(&self, student_id: u64, guide_id: u64) -> Result<Vec<ChatMessage>> {
        envelope(
            self.get(&format!("/chat/history/{}/{}", student_id, guide_id))
                .await?,
            "chats",
        )
    }

    async fn conversations(&self) -> Result<Vec<Conversation>> {
        envelope(self.get("/chat/conversations").await?, "conversations")
    }

    async fn pending_confirmations(&self) -> Result<Vec<ConnectionRequest>> {
        envelope(
            self.get("/guide/pending-confirmations").await?,
            "pending_requests",
        )
    }

    async fn confirm_connection(
        &self,
        request_id: u64,
        action: ConnectionAction,
    ) -> Result<String> {
        let body = self
            .send(
                Method::POST,
                "/guide/confirm-connection",
                &json!({ "request_id": request_id, "action": action }),
            )
            .await?;

        let message = ["message", "status"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| match action {
                ConnectionAction::Accept => "Connection accepted".to_string(),
                ConnectionAction::Reject => "Connection rejected".to_string(),
            });
        Ok(message)
    }
}

#[async_trait]
impl JobApi for SkillBridgeClient {
    async fn list_jobs(&self) -> Result<Vec<JobListing>> {
        envelope(self.get("/jobs").await?, "jobs")
    }

    async fn get_job(&self, id: u64) -> Result<JobListing> {
        envelope(self.get(&format!("/jobs/{}", id)).await?, "job")
    }

    async fn create_job(&self, job: &JobPosting) -> Result<JobListing> {
        envelope(self.send(Method::POST, "/jobs", job).await?, "job")
    }

    async fn update_job(&self, id: u64, job: &JobPosting) -> Result<JobListing> {
        envelope(
            self.send(Method::PUT, &format!("/jobs/{}", id), job).await?,
            "job",
        )
    }

    async fn delete_job(&self, id: u64) -> Result<()> {
        self.delete(&format!("/jobs/{}", id)).await
    }

    async fn company_jobs(&self) -> Result<Vec<JobListing>> {
        envelope(self.get("/company/jobs").await?, "jobs")
    }

    async fn job_applications(
        &self,
        job_id: u64,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<JobApplication>> {
        let endpoint = match status {
            Some(status) => format!("/jobs/{}/applications?status={}", job_id, status.as_str()),
            None => format!("/jobs/{}/applications", job_id),
        };
        envelope(self.get(&endpoint).await?, "applicants")
    }

    async fn update_application_status(
        &self,
        application_id: u64,
        status: ApplicationStatus,
    ) -> Result<()> {
        self.send(
            Method::PATCH,
            &format!("/applications/{}/status", application_id),
            &json!({ "status": status }),
        )
        .await?;
        Ok(())
    }

    async fn apply_to_job(&self, id: u64, application: &JobApplicationRequest) -> Result<u64> {
        let body = self
            .send(Method::POST, &format!("/jobs/{}/apply", id), application)
            .await?;
        body.get("application_id")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                ApiError::InvalidResponse("Response did not include an application id".into())
                    .into()
            })
    }

    async fn my_job_applications(&self) -> Result<Vec<u64>> {
        envelope(self.get("/my-job-applications").await?, "job_ids")
    }

    async fn application_stats(&self) -> Result<Value> {
        self.get("/company/application-stats").await
    }
}

#[async_trait]
impl ResumeApi for SkillBridgeClient {
    async fn generate_resume(&self, request: &ResumeRequest) -> Result<ResumeResponse> {
        let request = request.clone().compact();
        let body = self
            .send(Method::POST, "/resume/generate", &request)
            .await?;
        let response = ResumeResponse::from_value(body);
        if response.url.is_none() {
            log::warn!("Resume generated but no download link found");
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::token::tests::make_token;
    use chrono::Utc;
    use mockito::Matcher;

    fn fresh_token(user_id: u64) -> String {
        make_token(&json!({ "user_id": user_id, "exp": Utc::now().timestamp() + 3600 }))
    }

    fn client(server: &mockito::Server) -> SkillBridgeClient {
        let session = SessionStore::in_memory();
        let events = EventBus::new();
        let gateway = Gateway::new(&server.url(), None, session.clone(), events.clone()).unwrap();
        SkillBridgeClient::new(gateway, session, events)
    }

    fn signed_in(server: &mockito::Server, token: &str) -> SkillBridgeClient {
        let client = client(server);
        client.session().save_token(token).unwrap();
        client
            .session()
            .save_user(&UserProfile {
                id: 3,
                name: "Asha".into(),
                email: "asha@example.com".into(),
                role: Role::Student,
                extra: Default::default(),
            })
            .unwrap();
        client
    }

    #[test]
    fn test_envelope_extraction() {
        let projects: Vec<Project> =
            envelope(json!({ "projects": [{ "id": 1, "title": "A" }] }), "projects").unwrap();
        assert_eq!(projects.len(), 1);

        // Go encodes empty slices as null
        let projects: Vec<Project> = envelope(json!({ "projects": null }), "projects").unwrap();
        assert!(projects.is_empty());

        // Bare payloads are accepted too
        let job: JobListing = envelope(json!({ "id": 4, "title": "SRE" }), "job").unwrap();
        assert_eq!(job.id, 4);

        let err = envelope::<Vec<Project>>(json!({ "projects": "nope" }), "projects").unwrap_err();
        assert!(matches!(err.as_api(), Some(ApiError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_login_saves_token_and_profile() {
        let mut server = mockito::Server::new_async().await;
        let token = fresh_token(3);
        let login = server
            .mock("POST", "/login")
            .match_header("authorization", Matcher::Missing)
            .match_body(Matcher::Json(json!({ "email": "asha@example.com", "password": "pw" })))
            .with_status(200)
            .with_body(json!({ "token": token }).to_string())
            .create_async()
            .await;
        let profile = server
            .mock("GET", "/profile")
            .match_header("authorization", format!("Bearer {}", token).as_str())
            .with_status(200)
            .with_body(r#"{"id": 3, "name": "Asha", "email": "asha@example.com", "role": "student", "university": "IIT"}"#)
            .create_async()
            .await;

        let client = client(&server);
        let user = client.login("asha@example.com", "pw").await.unwrap();

        assert_eq!(user.role, Role::Student);
        assert_eq!(client.session().get_token(), Some(token));
        assert_eq!(client.session().get_user().unwrap().field("university"), Some("IIT"));
        login.assert_async().await;
        profile.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(400)
            .with_body(r#"{"error": "Invalid credentials"}"#)
            .create_async()
            .await;

        let client = client(&server);
        let err = client.login("x@y.z", "bad").await.unwrap_err();
        assert_eq!(
            err.as_api(),
            Some(&ApiError::BadRequest("Invalid credentials".into()))
        );
        assert!(client.session().get_token().is_none());
    }

    #[tokio::test]
    async fn test_signup_without_token_returns_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/signup")
            .match_body(Matcher::PartialJson(json!({ "role": "company", "company_name": "Acme" })))
            .with_status(200)
            .with_body(r#"{"message": "User created successfully"}"#)
            .create_async()
            .await;

        let client = client(&server);
        let created = client
            .signup(&SignupRequest {
                name: "HR".into(),
                email: "hr@acme.io".into(),
                password: "pw".into(),
                role: Role::Company,
                company_name: Some("Acme".into()),
                university: None,
            })
            .await
            .unwrap();

        assert!(created.is_none());
        assert!(client.session().get_token().is_none());
    }

    #[tokio::test]
    async fn test_google_oauth_uses_returned_user() {
        let mut server = mockito::Server::new_async().await;
        let token = fresh_token(8);
        server
            .mock("POST", "/google-oauth")
            .match_body(Matcher::Json(json!({ "google_token": "g-cred", "role": "guide" })))
            .with_status(200)
            .with_body(
                json!({
                    "message": "ok",
                    "token": token,
                    "user": { "id": 8, "name": "Ravi", "role": "guide" }
                })
                .to_string(),
            )
            .create_async()
            .await;
        let profile = server.mock("GET", "/profile").expect(0).create_async().await;

        let client = client(&server);
        let user = client.google_oauth("g-cred", Role::Guide).await.unwrap();

        assert_eq!(user.id, 8);
        assert_eq!(client.session().get_user().unwrap().name, "Ravi");
        profile.assert_async().await;
    }

    #[tokio::test]
    async fn test_protected_call_without_token_skips_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/my-applications")
            .expect(0)
            .create_async()
            .await;

        let client = client(&server);
        let err = client.my_applications().await.unwrap_err();
        assert_eq!(err.as_api(), Some(&ApiError::NotLoggedIn));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_apply_posts_project_id_with_bearer() {
        let mut server = mockito::Server::new_async().await;
        let token = fresh_token(3);
        let mock = server
            .mock("POST", "/projects/apply")
            .match_header("authorization", format!("Bearer {}", token).as_str())
            .match_body(Matcher::Json(json!({ "project_id": 42 })))
            .with_status(200)
            .with_body(
                r#"{"message": "Project applied successfully", "application": {"ID": 7, "project_id": 42, "student_id": 3, "status": "pending"}}"#,
            )
            .create_async()
            .await;

        let client = signed_in(&server, &token);
        let application = client.apply_to_project(42).await.unwrap();

        assert_eq!(application.id, 7);
        assert_eq!(application.project_id, 42);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_expired_token_still_sent() {
        let mut server = mockito::Server::new_async().await;
        let expired = make_token(&json!({ "exp": Utc::now().timestamp() - 60 }));
        let mock = server
            .mock("GET", "/my-submissions")
            .match_header("authorization", format!("Bearer {}", expired).as_str())
            .with_status(200)
            .with_body(r#"{"submissions": []}"#)
            .create_async()
            .await;

        let client = signed_in(&server, &expired);
        assert!(client.my_submissions().await.unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_profile_refreshes_once_and_retries() {
        let mut server = mockito::Server::new_async().await;
        let old = fresh_token(3);
        let new = make_token(&json!({ "user_id": 3, "exp": Utc::now().timestamp() + 7200 }));

        let first = server
            .mock("PUT", "/profile")
            .match_header("authorization", format!("Bearer {}", old).as_str())
            .with_status(401)
            .with_body(r#"{"error": "Token has expired"}"#)
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/refresh-token")
            .match_header("authorization", format!("Bearer {}", old).as_str())
            .with_status(200)
            .with_body(json!({ "message": "Token refreshed", "token": new }).to_string())
            .expect(1)
            .create_async()
            .await;
        let retry = server
            .mock("PUT", "/profile")
            .match_header("authorization", format!("Bearer {}", new).as_str())
            .match_body(Matcher::Json(json!({ "bio": "Rustacean" })))
            .with_status(200)
            .with_body(
                r#"{"message": "Profile updated", "user": {"id": 3, "name": "Asha", "role": "student", "bio": "Rustacean"}}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = signed_in(&server, &old);
        let mut events = client.events().subscribe();
        let update = ProfileUpdate {
            bio: Some("Rustacean".into()),
            ..Default::default()
        };
        let user = client.update_profile(&update).await.unwrap();

        // Recovered sessions never announce a sign-out
        assert!(!events.drain_contains(AppEvent::SessionEnded));
        assert_eq!(user.field("bio"), Some("Rustacean"));
        assert_eq!(client.session().get_token(), Some(new));
        assert_eq!(client.session().get_user().unwrap().field("bio"), Some("Rustacean"));
        first.assert_async().await;
        refresh.assert_async().await;
        retry.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_profile_second_failure_logs_out() {
        let mut server = mockito::Server::new_async().await;
        let old = fresh_token(3);
        let new = make_token(&json!({ "user_id": 3, "exp": Utc::now().timestamp() + 7200 }));

        server
            .mock("PUT", "/profile")
            .match_header("authorization", format!("Bearer {}", old).as_str())
            .with_status(401)
            .with_body(r#"{"error": "token expired"}"#)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/refresh-token")
            .with_status(200)
            .with_body(json!({ "token": new }).to_string())
            .expect(1)
            .create_async()
            .await;
        let retry = server
            .mock("PUT", "/profile")
            .match_header("authorization", format!("Bearer {}", new).as_str())
            .with_status(500)
            .with_body(r#"{"error": "database unavailable"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = signed_in(&server, &old);
        let mut events = client.events().subscribe();
        let update = ProfileUpdate {
            name: Some("A".into()),
            ..Default::default()
        };
        let err = client.update_profile(&update).await.unwrap_err();

        assert_eq!(
            err.as_api(),
            Some(&ApiError::ServerError("database unavailable".into()))
        );
        assert!(client.session().get_token().is_none());
        assert!(client.session().get_user().is_none());
        assert!(events.drain_contains(AppEvent::SessionEnded));
        refresh.assert_async().await;
        retry.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_profile_unauthorized_without_expiry_logs_out() {
        let mut server = mockito::Server::new_async().await;
        let token = fresh_token(3);
        server
            .mock("PUT", "/profile")
            .with_status(401)
            .with_body(r#"{"error": "Invalid token"}"#)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/refresh-token")
            .expect(0)
            .create_async()
            .await;

        let client = signed_in(&server, &token);
        let mut events = client.events().subscribe();
        let update = ProfileUpdate {
            bio: Some("x".into()),
            ..Default::default()
        };
        client.update_profile(&update).await.unwrap_err();

        assert!(client.session().get_token().is_none());
        assert!(client.session().get_user().is_none());
        assert!(events.drain_contains(AppEvent::SessionEnded));
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_null_profile_is_rejected_and_cache_kept() {
        let mut server = mockito::Server::new_async().await;
        let token = fresh_token(3);
        server
            .mock("GET", "/profile")
            .with_status(200)
            .with_body(r#"{"user": null}"#)
            .create_async()
            .await;

        let client = signed_in(&server, &token);
        let err = client.get_profile().await.unwrap_err();

        assert!(matches!(err.as_api(), Some(ApiError::InvalidResponse(_))));
        let cached = client.session().get_user().unwrap();
        assert_eq!(cached.id, 3);
        assert_eq!(cached.role, Role::Student);
    }

    #[test]
    fn test_required_envelope_rejects_missing_payload() {
        let err = required_envelope::<UserProfile>(json!({ "user": null }), "user").unwrap_err();
        assert!(matches!(err.as_api(), Some(ApiError::InvalidResponse(_))));

        let user: UserProfile =
            required_envelope(json!({ "id": 5, "name": "Ravi", "role": "guide" }), "user").unwrap();
        assert_eq!(user.role, Role::Guide);
    }

    #[tokio::test]
    async fn test_update_profile_other_error_does_not_refresh() {
        let mut server = mockito::Server::new_async().await;
        let token = fresh_token(3);
        server
            .mock("PUT", "/profile")
            .with_status(400)
            .with_body(r#"{"error": "Invalid phone"}"#)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/refresh-token")
            .expect(0)
            .create_async()
            .await;

        let client = signed_in(&server, &token);
        let update = ProfileUpdate {
            phone: Some("x".into()),
            ..Default::default()
        };
        client.update_profile(&update).await.unwrap_err();

        // Non-expiry failures leave the session alone
        assert_eq!(client.session().get_token(), Some(token));
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_public_listings_send_no_bearer() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/projects")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"projects": [{"ID": 42, "title": "Chat bot"}, {"id": 43, "title": "ETL"}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/projects/42")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"data": {"id": 42, "title": "Chat bot", "difficulty": "Intermediate"}}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/guides")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"guides": [{"id": 2, "name": "Ravi"}], "count": 1}"#)
            .create_async()
            .await;

        let client = client(&server);
        let projects = client.list_projects().await.unwrap();
        assert_eq!(projects.iter().map(|p| p.id).collect::<Vec<_>>(), vec![42, 43]);

        let project = client.get_project(42).await.unwrap();
        assert_eq!(project.difficulty, "Intermediate");

        let guides = client.list_guides().await.unwrap();
        assert_eq!(guides[0].name, "Ravi");
    }

    #[tokio::test]
    async fn test_job_applications_status_filter() {
        let mut server = mockito::Server::new_async().await;
        let token = fresh_token(5);
        let filtered = server
            .mock("GET", "/jobs/5/applications")
            .match_query(Matcher::UrlEncoded("status".into(), "Shortlisted".into()))
            .with_status(200)
            .with_body(r#"{"job_id": 5, "total": 1, "applicants": [{"id": 11, "status": "Shortlisted"}]}"#)
            .create_async()
            .await;

        let client = signed_in(&server, &token);
        let applicants = client
            .job_applications(5, Some(ApplicationStatus::Shortlisted))
            .await
            .unwrap();
        assert_eq!(applicants.len(), 1);
        assert_eq!(applicants[0].id, 11);
        filtered.assert_async().await;
    }

    #[tokio::test]
    async fn test_job_status_update_and_apply() {
        let mut server = mockito::Server::new_async().await;
        let token = fresh_token(5);
        let patch = server
            .mock("PATCH", "/applications/11/status")
            .match_body(Matcher::Json(json!({ "status": "Accepted" })))
            .with_status(200)
            .with_body(r#"{"message": "updated", "status": "Accepted"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/jobs/9/apply")
            .match_body(Matcher::Json(json!({ "cover_letter": "Hi" })))
            .with_status(200)
            .with_body(r#"{"message": "Applied", "application_id": 31}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/my-job-applications")
            .with_status(200)
            .with_body(r#"{"job_ids": [9, 12]}"#)
            .create_async()
            .await;

        let client = signed_in(&server, &token);
        client
            .update_application_status(11, ApplicationStatus::Accepted)
            .await
            .unwrap();
        let id = client
            .apply_to_job(
                9,
                &JobApplicationRequest {
                    cover_letter: Some("Hi".into()),
                    resume: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(id, 31);
        assert_eq!(client.my_job_applications().await.unwrap(), vec![9, 12]);
        patch.assert_async().await;
    }

    #[tokio::test]
    async fn test_chat_envelopes() {
        let mut server = mockito::Server::new_async().await;
        let token = fresh_token(3);
        server
            .mock("GET", "/chat/connected-guides")
            .with_status(200)
            .with_body(r#"{"connected_guide_ids": [2, 4], "count": 2}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/chat/history/3/2")
            .with_status(200)
            .with_body(r#"{"chats": [{"id": 1, "message": "hello", "sender_role": "student"}], "count": 1}"#)
            .create_async()
            .await;
        let confirm = server
            .mock("POST", "/guide/confirm-connection")
            .match_body(Matcher::Json(json!({ "request_id": 6, "action": "accept" })))
            .with_status(200)
            .with_body(r#"{"message": "ok", "request_id": 6, "status": "accepted"}"#)
            .create_async()
            .await;

        let client = signed_in(&server, &token);
        assert_eq!(client.connected_guides().await.unwrap(), vec![2, 4]);

        let history = client.chat_history(3, 2).await.unwrap();
        assert_eq!(history[0].message, "hello");

        let status = client
            .confirm_connection(6, ConnectionAction::Accept)
            .await
            .unwrap();
        assert_eq!(status, "accepted");
        confirm.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_resume_reads_download_link() {
        let mut server = mockito::Server::new_async().await;
        let token = fresh_token(3);
        let mock = server
            .mock("POST", "/resume/generate")
            .match_body(Matcher::PartialJson(json!({ "location": "Pune", "certifications": [] })))
            .with_status(200)
            .with_body(r#"{"data": {"file_url": "https://files.example/r.pdf"}}"#)
            .create_async()
            .await;

        let client = signed_in(&server, &token);
        let request = ResumeRequest {
            location: "Pune".into(),
            certifications: vec![Default::default()],
            ..Default::default()
        };
        let response = client.generate_resume(&request).await.unwrap();

        assert_eq!(response.url.as_deref(), Some("https://files.example/r.pdf"));
        mock.assert_async().await;
    }
}
