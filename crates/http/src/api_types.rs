use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /api/storage/write`.
#[derive(Debug, Deserialize)]
pub struct WriteRequest {
    pub key: String,
    pub data: Value,
}

/// Body of `POST /api/storage/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub key: String,
}

/// Query of `GET /api/storage/list`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub prefix: Option<String>,
}
