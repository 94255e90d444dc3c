//! Async HTTP gateway for one feature's employee collection.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use roster_core::{
  Employee, EmployeeDraft, EmployeeId, EmployeePatch, Feature, Gateway,
  GatewayError,
};
use serde::de::DeserializeOwned;

use crate::{
  ClientConfig, Error, Result,
  dto::{EmployeeBody, EmployeeDto},
};

/// A configured HTTP client plus the server it talks to.
///
/// Cheap to clone, as the inner [`reqwest::Client`] is `Arc`-based, so one
/// connection can back every feature's gateway.
#[derive(Debug, Clone)]
pub struct Connection {
  client:   Client,
  base_url: Url,
  username: String,
  password: String,
}

impl Connection {
  pub fn new(config: &ClientConfig) -> Result<Self> {
    let base_url = Url::parse(&config.base_url).map_err(|e| Error::InvalidUrl {
      url:    config.base_url.clone(),
      reason: e.to_string(),
    })?;
    if base_url.cannot_be_a_base() {
      return Err(Error::InvalidUrl {
        url:    config.base_url.clone(),
        reason: "not a base url".into(),
      });
    }
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self {
      client,
      base_url,
      username: config.username.clone(),
      password: config.password.clone(),
    })
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    if self.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.username, Some(&self.password))
    }
  }
}

/// [`Gateway`] over the REST collection at `{base_url}{base_path}`.
///
/// | Call | Request |
/// |------|---------|
/// | `get_all` | `GET {base}` |
/// | `get_by_id` | `GET {base}/{id}` |
/// | `create` | `POST {base}` |
/// | `update` | `PUT {base}/{id}` |
/// | `delete` | `DELETE {base}/{id}` |
#[derive(Debug, Clone)]
pub struct HttpGateway {
  conn:      Connection,
  base_path: String,
}

impl HttpGateway {
  pub fn new(conn: Connection, base_path: impl Into<String>) -> Self {
    Self {
      conn,
      base_path: base_path.into(),
    }
  }

  /// The gateway for `feature`'s standard collection path.
  pub fn for_feature(conn: Connection, feature: Feature) -> Self {
    Self::new(conn, feature.base_path())
  }

  pub fn base_path(&self) -> &str { &self.base_path }

  pub(crate) fn url(&self, id: Option<&EmployeeId>) -> Result<Url, GatewayError> {
    let mut url = self.conn.base_url.clone();
    {
      let mut segments = url.path_segments_mut().map_err(|()| {
        GatewayError::Invalid(format!("cannot extend {}", self.conn.base_url))
      })?;
      segments
        .pop_if_empty()
        .extend(self.base_path.split('/').filter(|s| !s.is_empty()));
      if let Some(id) = id {
        segments.push(id.as_str());
      }
    }
    Ok(url)
  }

  async fn send(
    &self,
    method: Method,
    id: Option<&EmployeeId>,
    body: Option<EmployeeBody<'_>>,
  ) -> Result<Response, GatewayError> {
    let url = self.url(id)?;
    tracing::debug!(%method, %url, "sending request");

    let mut req = self.conn.auth(self.conn.client.request(method.clone(), url));
    if let Some(body) = &body {
      req = req.json(body);
    }
    let resp = req.send().await.map_err(|e| {
      GatewayError::Transport(format!("{method} {}: {e}", self.base_path))
    })?;

    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = error_message(resp).await;
    Err(match status {
      StatusCode::NOT_FOUND => GatewayError::NotFound(message),
      _ => GatewayError::Status {
        status: status.as_u16(),
        message,
      },
    })
  }

  async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, GatewayError> {
    resp
      .json()
      .await
      .map_err(|e| GatewayError::Decode(e.to_string()))
  }
}

/// Best-effort human-readable message from an error response: the `error` or
/// `message` field of a JSON body, else the raw body, else the reason phrase.
async fn error_message(resp: Response) -> String {
  let status = resp.status();
  let fallback = status
    .canonical_reason()
    .unwrap_or("request failed")
    .to_owned();
  let Ok(text) = resp.text().await else {
    return fallback;
  };
  if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text)
    && let Some(msg) = ["error", "message"]
      .iter()
      .find_map(|k| value.get(k).and_then(|v| v.as_str()))
  {
    return msg.to_owned();
  }
  let text = text.trim();
  if text.is_empty() {
    fallback
  } else {
    text.chars().take(200).collect()
  }
}

impl Gateway for HttpGateway {
  type Draft = EmployeeDraft;
  type Patch = EmployeePatch;
  type Record = Employee;

  async fn get_all(&self) -> Result<Vec<Employee>, GatewayError> {
    let resp = self.send(Method::GET, None, None).await?;
    let dtos: Vec<EmployeeDto> = Self::decode(resp).await?;
    Ok(dtos.into_iter().map(Employee::from).collect())
  }

  async fn get_by_id(&self, id: &EmployeeId) -> Result<Employee, GatewayError> {
    let resp = self.send(Method::GET, Some(id), None).await?;
    let dto: EmployeeDto = Self::decode(resp).await?;
    Ok(dto.into())
  }

  async fn create(&self, draft: &EmployeeDraft) -> Result<Employee, GatewayError> {
    let body = EmployeeBody::from(draft);
    let resp = self.send(Method::POST, None, Some(body)).await?;
    let dto: EmployeeDto = Self::decode(resp).await?;
    Ok(dto.into())
  }

  async fn update(
    &self,
    id: &EmployeeId,
    patch: &EmployeePatch,
  ) -> Result<Employee, GatewayError> {
    let body = EmployeeBody::from(patch);
    let resp = self.send(Method::PUT, Some(id), Some(body)).await?;
    let dto: EmployeeDto = Self::decode(resp).await?;
    Ok(dto.into())
  }

  async fn delete(&self, id: &EmployeeId) -> Result<(), GatewayError> {
    self.send(Method::DELETE, Some(id), None).await?;
    Ok(())
  }
}
