//! `ApiRequest` を reqwest で送信する
//!
//! HTTP/通信エラーは共通メッセージを stderr に出し、詳細は log に残す。

use crate::error::{BidWriterError, Result};
use crate::session_file::FileStore;
use bid_writer_common::api::{self, ApiRequest, ApiResponse, LoginResponse, Method, RequestBody, StampImage};
use bid_writer_common::session::SessionContext;
use bid_writer_common::verification::VerificationKind;
use bid_writer_common::workflow::SmartStampRequest;
use bid_writer_common::Error;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type CliRequest = ApiRequest<PathBuf>;
pub type CliSession = SessionContext<FileStore>;

fn report_status(status: Option<u16>) {
    eprintln!("✖ {}", api::status_message(status));
}

pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    session: CliSession,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout_seconds: Option<u64>, session: CliSession) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &CliSession {
        &self.session
    }

    async fn multipart(field: &'static str, files: &[PathBuf]) -> Result<Form> {
        let mut form = Form::new();
        for path in files {
            let bytes = tokio::fs::read(path).await?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "file".to_string());
            form = form.part(field, Part::bytes(bytes).file_name(name));
        }
        Ok(form)
    }

    /// 送信してステータスを確認する
    pub async fn send(&self, request: CliRequest) -> Result<reqwest::Response> {
        let url = request.url(&self.base_url);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Delete => self.http.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if request.authenticated {
            match self.session.bearer() {
                Some(bearer) => builder = builder.header(reqwest::header::AUTHORIZATION, bearer),
                None => log::warn!("{} without a stored token", request.path),
            }
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Multipart { field, files } => {
                builder.multipart(Self::multipart(field, &files).await?)
            }
        };

        log::debug!("{} {}", request.method.as_str(), url);
        let response = builder.send().await.map_err(|e| {
            log::error!("{} network error: {}", request.path, e);
            report_status(None);
            Error::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("{} failed: HTTP {} {}", request.path, status.as_u16(), body);
            report_status(Some(status.as_u16()));
            return Err(Error::Http {
                status: status.as_u16(),
                message: api::status_message(Some(status.as_u16())).to_string(),
            }
            .into());
        }

        Ok(response)
    }

    /// `{code, message, data}` を解釈（code != 200 はエラー）
    pub async fn envelope<T: DeserializeOwned>(&self, request: CliRequest) -> Result<Option<T>> {
        let path = request.path;
        let envelope: ApiResponse<T> = self.send(request).await?.json().await?;
        envelope.into_result().map_err(|e| {
            log::warn!("{} rejected: {}", path, e);
            BidWriterError::from(e)
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let login: LoginResponse = self.send(api::login(email, password)).await?.json().await?;
        if login.access_token.is_empty() {
            return Err(Error::Validation("登录失败，请检查您的邮箱和密码".into()).into());
        }
        Ok(login)
    }

    pub async fn logout(&self) -> Result<()> {
        self.send(api::logout()).await.map(|_| ())
    }

    pub async fn send_code(&self, kind: VerificationKind, email: &str) -> Result<()> {
        self.envelope::<serde_json::Value>(kind.send_code_request(email))
            .await
            .map(|_| ())
    }

    pub async fn verify_code(
        &self,
        kind: VerificationKind,
        email: &str,
        code: &str,
        password: &str,
    ) -> Result<()> {
        self.envelope::<serde_json::Value>(kind.verify_request(email, code, password))
            .await
            .map(|_| ())
    }

    pub async fn list_stamps(&self) -> Result<Vec<StampImage>> {
        Ok(self
            .envelope::<Vec<StampImage>>(api::list_stamps())
            .await?
            .unwrap_or_default())
    }

    pub async fn upload_stamps(&self, images: Vec<PathBuf>) -> Result<()> {
        self.envelope::<serde_json::Value>(api::upload_stamps(images))
            .await
            .map(|_| ())
    }

    pub async fn delete_stamps(&self, ids: &[i64]) -> Result<()> {
        self.envelope::<serde_json::Value>(api::delete_stamps(ids))
            .await
            .map(|_| ())
    }

    /// アップロード後のサーバー側パス
    pub async fn upload_files(&self, files: Vec<PathBuf>) -> Result<Vec<String>> {
        Ok(self
            .envelope::<Vec<String>>(api::upload_files(files))
            .await?
            .unwrap_or_default())
    }

    pub async fn smart_stamp(&self, request: &SmartStampRequest) -> Result<String> {
        self.envelope::<String>(request.to_api_request())
            .await?
            .filter(|path| !path.is_empty())
            .ok_or_else(|| Error::Validation("盖章失败，未返回文件".into()).into())
    }

    /// 任意URLを取得してファイルに書き出す。書いたバイト数を返す
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        let mut builder = self.http.get(url);
        if let Some(bearer) = self.session.bearer() {
            builder = builder.header(reqwest::header::AUTHORIZATION, bearer);
        }
        let response = builder.send().await.map_err(|e| {
            report_status(None);
            Error::Network(e.to_string())
        })?;
        let status = response.status();
        if !status.is_success() {
            report_status(Some(status.as_u16()));
            return Err(Error::Http {
                status: status.as_u16(),
                message: api::status_message(Some(status.as_u16())).to_string(),
            }
            .into());
        }
        let bytes = response.bytes().await?;
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &bytes).await?;
        Ok(bytes.len() as u64)
    }
}
