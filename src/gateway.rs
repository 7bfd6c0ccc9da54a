//! Gateway REST do backend.
//!
//! Toda requisição sai daqui: anexa o bearer token da sessão quando há um,
//! e trata 401 globalmente: limpa a sessão e devolve `SessionExpired`
//! para a navegação mandar o usuário ao login (uma vez só; ver
//! `auth::policy::unauthorized_redirect`).

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::session::SessionStore;
use crate::config::AppConfig;
use crate::errors::{extract_detail, AppError};
use crate::log_warn;

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .connect_timeout(Duration::from_secs(config.api.connect_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Envia a requisição e faz a triagem de status compartilhada.
    async fn send(&self, req: RequestBuilder, fallback: &str) -> Result<reqwest::Response, AppError> {
        let resp = req.send().await?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            self.session.clear();
            log_warn!("GATEWAY", "Resposta 401 do backend, sessão encerrada");
            return Err(AppError::SessionExpired);
        }

        if status == StatusCode::FORBIDDEN {
            let body = resp.text().await.unwrap_or_default();
            let detail = extract_detail(&body)
                .unwrap_or_else(|| "sem permissão para esta operação".to_string());
            return Err(AppError::Forbidden(detail));
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::from_detail(status.as_u16(), &body, fallback));
        }

        Ok(resp)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<T, AppError> {
        let resp = self.send(self.request(Method::GET, path), fallback).await?;
        Ok(resp.json::<T>().await?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, AppError> {
        let req = self.request(Method::POST, path).json(body);
        let resp = self.send(req, fallback).await?;
        Ok(resp.json::<T>().await?)
    }

    /// POST com parâmetros de query e corpo vazio (o login do backend
    /// espera email/senha como query params).
    pub async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        fallback: &str,
    ) -> Result<T, AppError> {
        let req = self.request(Method::POST, path).query(query);
        let resp = self.send(req, fallback).await?;
        Ok(resp.json::<T>().await?)
    }

    /// POST sem corpo, ignorando o corpo da resposta.
    pub async fn post_empty(&self, path: &str, fallback: &str) -> Result<(), AppError> {
        self.send(self.request(Method::POST, path), fallback).await?;
        Ok(())
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, AppError> {
        let req = self.request(Method::PUT, path).json(body);
        let resp = self.send(req, fallback).await?;
        Ok(resp.json::<T>().await?)
    }

    pub async fn delete(&self, path: &str, fallback: &str) -> Result<(), AppError> {
        self.send(self.request(Method::DELETE, path), fallback).await?;
        Ok(())
    }
}
