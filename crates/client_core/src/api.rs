use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use shared::{
    domain::Recipe,
    protocol::{bearer_header_value, LoginRequest, LOGIN_PATH, RECIPES_PATH},
};
use tracing::debug;
use url::Url;

use crate::{credentials::CredentialProvider, error::ClientError};

/// Server answer to a create-recipe request that made it over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateResponse {
    Created { status: u16 },
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Sends one create request. `Err` means the request could not complete;
    /// any HTTP status is an `Ok` response.
    async fn create_recipe(&self, recipe: &Recipe) -> Result<CreateResponse, ClientError>;

    /// Exchanges credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<String, ClientError>;
}

pub struct HttpRecipeApi {
    http: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpRecipeApi {
    pub fn new(
        server_url: &str,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(server_url).map_err(|source| ClientError::InvalidServerUrl {
            url: server_url.to_string(),
            source,
        })?;
        Ok(Self {
            http: Client::new(),
            base_url,
            credentials,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|source| ClientError::InvalidServerUrl {
                url: format!("{}{path}", self.base_url),
                source,
            })
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn create_recipe(&self, recipe: &Recipe) -> Result<CreateResponse, ClientError> {
        let url = self.endpoint(RECIPES_PATH)?;
        let token = self.credentials.token();
        debug!(%url, has_token = token.is_some(), "posting recipe");

        let res = self
            .http
            .post(url)
            .header(AUTHORIZATION, bearer_header_value(token.as_deref()))
            .json(recipe)
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            return Ok(CreateResponse::Created {
                status: status.as_u16(),
            });
        }

        let body = res.text().await?;
        Ok(CreateResponse::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let res = self
            .http
            .post(self.endpoint(LOGIN_PATH)?)
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ClientError::LoginRejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body.trim().to_string())
    }
}
