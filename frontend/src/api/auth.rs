use reqwest::Method;

use super::{
    client::{read_json, ApiClient, RequestBody, RequestOptions},
    types::{ApiError, LoginRequest, LoginResponse, UserProfile},
};
use crate::state::session::Session;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const PROFILE_PATH: &str = "/api/users/auth/user/";

impl ApiClient {
    /// Exchanges credentials for a session payload. Sent without a bearer
    /// header; storing the result is up to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<Session, ApiError> {
        let response = self
            .request(
                Method::POST,
                LOGIN_PATH,
                Some(RequestBody::json(&request)?),
                RequestOptions::anonymous(),
            )
            .await?;
        let payload: LoginResponse = read_json(response).await?;
        if payload.access.trim().is_empty() {
            return Err(ApiError::unknown("Login response did not include a token"));
        }
        Ok(payload.into())
    }

    /// Client-side logout; the backend keeps no server session to revoke.
    pub fn logout(&self) {
        self.session().clear_session();
    }

    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json(PROFILE_PATH, RequestOptions::default()).await
    }
}
