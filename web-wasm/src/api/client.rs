//! `ApiRequest` を gloo-net (fetch) で送信する
//!
//! HTTPエラー・通信エラーは画面共通の alert を出した上で `Err(String)` を返す。
//! 呼び出し側はそれとは別に各ページの表示を行う。

use bid_writer_common::api::{self, ApiRequest, ApiResponse, LoginResponse, Method, RequestBody, StampImage};
use bid_writer_common::verification::VerificationKind;
use bid_writer_common::workflow::SmartStampRequest;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData, UrlSearchParams};

use crate::config::api_base_url;
use crate::storage::BrowserSession;

pub type BrowserRequest = ApiRequest<File>;

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// ステータスに応じた共通メッセージを表示
fn report_status(status: Option<u16>) {
    gloo::dialogs::alert(api::status_message(status));
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: BrowserSession,
}

impl ApiClient {
    pub fn new(session: BrowserSession) -> Self {
        Self {
            base_url: api_base_url().to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn builder(&self, request: &BrowserRequest) -> RequestBuilder {
        let url = request.url(&self.base_url);
        let mut builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Delete => Request::delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        if request.authenticated {
            if let Some(bearer) = self.session.bearer() {
                builder = builder.header("Authorization", &bearer);
            }
        }
        builder
    }

    /// 送信してステータスを確認する
    pub async fn send(&self, request: BrowserRequest) -> Result<Response, String> {
        let builder = self.builder(&request);
        let path = request.path;

        let built = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(pairs) => {
                let params = UrlSearchParams::new().map_err(js_error)?;
                for (key, value) in &pairs {
                    params.append(key, value);
                }
                let encoded: String = params.to_string().into();
                builder
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(encoded)
            }
            RequestBody::Multipart { field, files } => {
                let form = FormData::new().map_err(js_error)?;
                for file in &files {
                    form.append_with_blob_and_filename(field, file, &file.name())
                        .map_err(js_error)?;
                }
                builder.body(form)
            }
        }
        .map_err(|e| format!("Request error: {}", e))?;

        let response = built.send().await.map_err(|e| {
            log::error!("{} network error: {}", path, e);
            report_status(None);
            format!("Network error: {}", e)
        })?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("{} failed: HTTP {} {}", path, status, body);
            report_status(Some(status));
            return Err(format!("HTTP {}: {}", status, api::status_message(Some(status))));
        }

        Ok(response)
    }

    /// `{code, message, data}` を解釈（code != 200 はエラー）
    pub async fn envelope<T: DeserializeOwned>(&self, request: BrowserRequest) -> Result<Option<T>, String> {
        let path = request.path;
        let response = self.send(request).await?;
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;
        envelope.into_result().map_err(|e| {
            log::warn!("{} rejected: {}", path, e);
            e.to_string()
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, String> {
        log::info!("login: {}", email);
        let response = self.send(api::login(email, password)).await?;
        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;
        if login.access_token.is_empty() {
            return Err("empty access token".to_string());
        }
        Ok(login)
    }

    pub async fn logout(&self) -> Result<(), String> {
        self.send(api::logout()).await.map(|_| ())
    }

    /// 認証コード送信
    pub async fn send_code(&self, kind: VerificationKind, email: &str) -> Result<(), String> {
        self.envelope::<serde_json::Value>(kind.send_code_request(email))
            .await
            .map(|_| ())
    }

    /// 認証コード確認（登録 or パスワード再設定）
    pub async fn verify_code(
        &self,
        kind: VerificationKind,
        email: &str,
        code: &str,
        password: &str,
    ) -> Result<(), String> {
        self.envelope::<serde_json::Value>(kind.verify_request(email, code, password))
            .await
            .map(|_| ())
    }

    pub async fn list_stamps(&self) -> Result<Vec<StampImage>, String> {
        self.envelope::<Vec<StampImage>>(api::list_stamps())
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn upload_stamps(&self, images: Vec<File>) -> Result<(), String> {
        self.envelope::<serde_json::Value>(api::upload_stamps(images))
            .await
            .map(|_| ())
    }

    pub async fn delete_stamps(&self, ids: &[i64]) -> Result<(), String> {
        self.envelope::<serde_json::Value>(api::delete_stamps(ids))
            .await
            .map(|_| ())
    }

    /// アップロード後のサーバー側パス
    pub async fn upload_files(&self, files: Vec<File>) -> Result<Vec<String>, String> {
        self.envelope::<Vec<String>>(api::upload_files(files))
            .await
            .map(Option::unwrap_or_default)
    }

    /// 盖章して出力ファイルのパスを返す
    pub async fn smart_stamp(&self, request: &SmartStampRequest) -> Result<String, String> {
        self.envelope::<String>(request.to_api_request())
            .await?
            .filter(|path| !path.is_empty())
            .ok_or_else(|| "smart stamp returned no output path".to_string())
    }

    /// 任意URLのバイナリ取得（生成ファイルのダウンロード用）
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, String> {
        let mut builder = Request::get(url);
        if let Some(bearer) = self.session.bearer() {
            builder = builder.header("Authorization", &bearer);
        }
        let response = builder.send().await.map_err(|e| {
            report_status(None);
            format!("Network error: {}", e)
        })?;
        if !response.ok() {
            report_status(Some(response.status()));
            return Err(format!("HTTP {}", response.status()));
        }
        response
            .binary()
            .await
            .map_err(|e| format!("Read error: {}", e))
    }
}
