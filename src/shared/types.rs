use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform JSON wrapper for every API response.
///
/// `data` is always present (serialized as `null` when there is nothing to
/// return); `pagination` only appears on paged listings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub meta: Meta,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub status: bool,
    pub message: String,
}

/// Page block attached to paged listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_records: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            meta: Meta {
                status: true,
                message: message.into(),
            },
            data: Some(data),
            pagination: None,
        }
    }

    pub fn success_with_pagination(
        data: T,
        message: impl Into<String>,
        pagination: PaginationMeta,
    ) -> Self {
        Self {
            meta: Meta {
                status: true,
                message: message.into(),
            },
            data: Some(data),
            pagination: Some(pagination),
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            meta: Meta {
                status: false,
                message: message.into(),
            },
            data: None,
            pagination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success(vec![1, 2, 3], "fetched");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["meta"]["status"], true);
        assert_eq!(json["meta"]["message"], "fetched");
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json.get("pagination").is_none());
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let response = ApiResponse::<()>::error("boom");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["meta"]["status"], false);
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_pagination_keys_are_camel_case() {
        let response = ApiResponse::success_with_pagination(
            Vec::<i64>::new(),
            "fetched",
            PaginationMeta {
                total_records: 42,
                page: 2,
                per_page: 10,
                total_pages: 5,
            },
        );
        let json = serde_json::to_value(&response).unwrap();
        let pagination = &json["pagination"];

        assert_eq!(pagination["totalRecords"], 42);
        assert_eq!(pagination["page"], 2);
        assert_eq!(pagination["perPage"], 10);
        assert_eq!(pagination["totalPages"], 5);
    }
}
