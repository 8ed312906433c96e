use super::Query;
use crate::{
    api::{ApiClient, ApiError, UserProfile},
    query::QueryKey,
    state::session::Session,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileQuery;

impl Query for ProfileQuery {
    type Output = UserProfile;

    fn key(&self) -> QueryKey {
        QueryKey::new("user").with("profile")
    }

    fn enabled(&self, session: &Session) -> bool {
        session.is_authenticated()
    }

    async fn fetch(&self, api: &ApiClient) -> Result<UserProfile, ApiError> {
        api.get_profile().await
    }
}
