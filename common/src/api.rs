//! バックエンドAPIの型定義とリクエストビルダー
//!
//! ここではリクエストの「形」だけを組み立てる。実際の送信は
//! ブラウザ側（fetch）とCLI側（reqwest）がそれぞれ行う。
//! ファイル本体の型はプラットフォームごとに異なるため `F` で受ける
//! （ブラウザ: `web_sys::File`、CLI: `PathBuf`）。

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Error, Result};

/// バックエンドのデフォルトURL
pub const DEFAULT_BASE_URL: &str = "http://0.0.0.0:8000";

/// エンベロープの成功コード
pub const SUCCESS_CODE: i64 = 200;

pub mod endpoints {
    pub const LOGIN: &str = "/auth/jwt/login";
    pub const LOGOUT: &str = "/auth/jwt/logout";
    pub const REGISTER_SEND_CODE: &str = "/auth/register/send-code";
    pub const REGISTER_VERIFY: &str = "/auth/register/verify";
    pub const FORGOT_SEND_CODE: &str = "/auth/forgot-password/send-code";
    pub const RESET_VERIFY: &str = "/auth/reset-password/verify";
    pub const UPLOAD_FILES: &str = "/upload/multiple-files";
    pub const STAMP_LIST: &str = "/stamp/list-images";
    pub const STAMP_UPLOAD: &str = "/stamp/upload-images";
    pub const STAMP_DELETE: &str = "/stamp/delete-images";
    pub const SMART_STAMP: &str = "/stamp/smart-stamp";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// リクエストボディ
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody<F> {
    Empty,
    Json(serde_json::Value),
    /// application/x-www-form-urlencoded
    Form(Vec<(String, String)>),
    /// multipart/form-data（同じフィールド名で複数ファイル）
    Multipart { field: &'static str, files: Vec<F> },
}

/// 送信前のリクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest<F> {
    pub method: Method,
    pub path: &'static str,
    pub query: Vec<(String, String)>,
    pub body: RequestBody<F>,
    /// `Authorization: Bearer <token>` を付けるか
    pub authenticated: bool,
}

impl<F> ApiRequest<F> {
    fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: RequestBody::Empty,
            authenticated: false,
        }
    }

    fn authed(mut self) -> Self {
        self.authenticated = true;
        self
    }

    fn json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    /// ベースURLとパスを結合（クエリは含まない）
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// バックエンド共通レスポンス `{code, message, data?}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// 成功時のみデータを返す
    pub fn into_result(self) -> Result<Option<T>> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(Error::Backend {
                code: self.code,
                message: self.message,
            })
        }
    }
}

/// `/auth/jwt/login` のレスポンス（エンベロープなし）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// 印章画像
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampImage {
    pub id: i64,
    pub path: String,
}

/// ステータスコード → 表示メッセージ（`None` は応答なし）
pub fn status_message(status: Option<u16>) -> &'static str {
    match status {
        Some(400) => "请求错误，请检查输入",
        Some(401) => "未授权，请登录",
        Some(403) => "没有权限访问该资源",
        Some(404) => "请求的资源未找到",
        Some(500) => "服务器错误，请稍后再试",
        Some(_) => "发生未知错误",
        None => "网络错误，请检查您的连接",
    }
}

// ============================================
// リクエストビルダー
// ============================================

/// OAuth2 password フロー（フォーム送信、email を username として送る）
pub fn login<F>(email: &str, password: &str) -> ApiRequest<F> {
    let mut request = ApiRequest::new(Method::Post, endpoints::LOGIN);
    request.body = RequestBody::Form(vec![
        ("grant_type".to_string(), "password".to_string()),
        ("username".to_string(), email.to_string()),
        ("password".to_string(), password.to_string()),
        ("scope".to_string(), String::new()),
        ("client_id".to_string(), String::new()),
    ]);
    request
}

pub fn logout<F>() -> ApiRequest<F> {
    ApiRequest::new(Method::Post, endpoints::LOGOUT)
        .authed()
        .json(json!({}))
}

pub fn send_register_code<F>(email: &str) -> ApiRequest<F> {
    ApiRequest::new(Method::Post, endpoints::REGISTER_SEND_CODE).json(json!({ "email": email }))
}

pub fn verify_registration<F>(email: &str, code: &str, password: &str) -> ApiRequest<F> {
    ApiRequest::new(Method::Post, endpoints::REGISTER_VERIFY).json(json!({
        "email": email,
        "code": code,
        "password": password,
    }))
}

pub fn send_reset_code<F>(email: &str) -> ApiRequest<F> {
    ApiRequest::new(Method::Post, endpoints::FORGOT_SEND_CODE).json(json!({ "email": email }))
}

pub fn reset_password<F>(email: &str, code: &str, password: &str) -> ApiRequest<F> {
    ApiRequest::new(Method::Post, endpoints::RESET_VERIFY).json(json!({
        "email": email,
        "code": code,
        "password": password,
    }))
}

/// 汎用ファイルアップロード（レスポンスのdataはサーバー側パスの配列）
pub fn upload_files<F>(files: Vec<F>) -> ApiRequest<F> {
    let mut request = ApiRequest::new(Method::Post, endpoints::UPLOAD_FILES).authed();
    request.body = RequestBody::Multipart { field: "files", files };
    request
}

pub fn list_stamps<F>() -> ApiRequest<F> {
    ApiRequest::new(Method::Get, endpoints::STAMP_LIST).authed()
}

pub fn upload_stamps<F>(images: Vec<F>) -> ApiRequest<F> {
    let mut request = ApiRequest::new(Method::Post, endpoints::STAMP_UPLOAD).authed();
    request.body = RequestBody::Multipart { field: "images", files: images };
    request
}

pub fn delete_stamps<F>(ids: &[i64]) -> ApiRequest<F> {
    ApiRequest::new(Method::Delete, endpoints::STAMP_DELETE)
        .authed()
        .json(json!({ "ids": ids }))
}

/// 盖章（レスポンスのdataは出力ファイルのパス）
pub fn smart_stamp<F>(input_file: &str, stamp_file: &str, stamp_type: &str) -> ApiRequest<F> {
    let mut request = ApiRequest::new(Method::Post, endpoints::SMART_STAMP).authed();
    request.query = vec![
        ("input_file".to_string(), input_file.to_string()),
        ("stamp_file".to_string(), stamp_file.to_string()),
        ("stamp_type".to_string(), stamp_type.to_string()),
    ];
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    type Req = ApiRequest<String>;

    #[test]
    fn test_status_message_table() {
        assert_eq!(status_message(Some(400)), "请求错误，请检查输入");
        assert_eq!(status_message(Some(403)), "没有权限访问该资源");
        assert_eq!(status_message(Some(404)), "请求的资源未找到");
        assert_eq!(status_message(Some(500)), "服务器错误，请稍后再试");
        assert_eq!(status_message(Some(502)), "发生未知错误");
        assert_eq!(status_message(None), "网络错误，请检查您的连接");
    }

    #[test]
    fn test_login_is_form_encoded_password_grant() {
        let request: Req = login("a@b.com", "secret");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/auth/jwt/login");
        assert!(!request.authenticated);
        match request.body {
            RequestBody::Form(pairs) => {
                assert!(pairs.contains(&("grant_type".into(), "password".into())));
                assert!(pairs.contains(&("username".into(), "a@b.com".into())));
                assert!(pairs.contains(&("scope".into(), String::new())));
                assert!(pairs.contains(&("client_id".into(), String::new())));
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_stamp_requests_are_authenticated() {
        let list: Req = list_stamps();
        let delete: Req = delete_stamps(&[3, 5]);
        let upload: Req = upload_stamps(vec!["a.png".to_string()]);
        assert!(list.authenticated && delete.authenticated && upload.authenticated);
        assert_eq!(delete.method, Method::Delete);
        assert_eq!(delete.body, RequestBody::Json(json!({ "ids": [3, 5] })));
        assert!(matches!(upload.body, RequestBody::Multipart { field: "images", .. }));
    }

    #[test]
    fn test_smart_stamp_query() {
        let request: Req = smart_stamp("uploads/a.pdf", "stamps/1.png", "seal");
        assert_eq!(request.query_value("input_file"), Some("uploads/a.pdf"));
        assert_eq!(request.query_value("stamp_file"), Some("stamps/1.png"));
        assert_eq!(request.query_value("stamp_type"), Some("seal"));
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let request: Req = list_stamps();
        assert_eq!(
            request.url("http://localhost:8000/"),
            "http://localhost:8000/stamp/list-images"
        );
    }

    #[test]
    fn test_envelope_success_and_failure() {
        let ok: ApiResponse<Vec<StampImage>> =
            serde_json::from_str(r#"{"code":200,"message":"ok","data":[{"id":1,"path":"/s/1.png"}]}"#)
                .unwrap();
        let data = ok.into_result().unwrap().unwrap();
        assert_eq!(data[0], StampImage { id: 1, path: "/s/1.png".into() });

        let failed: ApiResponse<Vec<StampImage>> =
            serde_json::from_str(r#"{"code":400,"message":"bad"}"#).unwrap();
        assert!(matches!(
            failed.into_result(),
            Err(Error::Backend { code: 400, .. })
        ));
    }

    fn decode<T: serde::de::DeserializeOwned>(body: &str) -> ApiResponse<T> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_envelope_without_data_decodes_for_any_payload() {
        let resp: ApiResponse<String> = decode(r#"{"code":200,"message":"ok"}"#);
        assert!(resp.is_success());
        assert_eq!(resp.into_result().unwrap(), None);

        let login: ApiResponse<LoginResponse> = decode(r#"{"code":200}"#);
        assert!(login.data.is_none());
        assert_eq!(login.message, "");
    }
}
