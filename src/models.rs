// Wire types for the two webhooks. Field names follow the JSON the n8n
// workflows expect, hence the camelCase renames on the request side.

use serde::{Deserialize, Serialize};

/// One file as sent to the upload webhook.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub file_name: String,
    pub text: String,
    pub chunk_size: u32,
    pub chunk_overlap: u32,
}

/// Body of the upload webhook call. The whole batch travels in one request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub files: Vec<FileRecord>,
    pub namespace: String,
    pub chunk_size: u32,
    pub chunk_overlap: u32,
}

/// Upload webhook response. Counters the workflow leaves out read as zero.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadResult {
    pub total_files: u64,
    pub total_upserted: u64,
    pub file_results: Vec<FileResult>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FileResult {
    pub file_index: u64,
    pub upserted: u64,
}

/// Body of the search webhook call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub namespace: String,
    pub top_k: usize,
    pub min_score: f64,
}

/// A single match returned by the search webhook. Every field is optional on
/// the wire; `id` is kept as a raw JSON value because the workflow may send
/// either a string or a number.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SearchResult {
    pub text: String,
    pub score: f64,
    pub source: Option<String>,
    pub chunk_index: Option<i64>,
    pub id: serde_json::Value,
}

impl SearchResult {
    pub fn source_or_unknown(&self) -> &str {
        self.source.as_deref().unwrap_or("unknown")
    }

    pub fn chunk_index_or_default(&self) -> i64 {
        self.chunk_index.unwrap_or(-1)
    }

    pub fn id_display(&self) -> String {
        match &self.id {
            serde_json::Value::Null => "N/A".into(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// The shapes the search webhook has been seen to answer with, each
/// normalised by `into_results`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "WireResponse")]
pub enum SearchResponse {
    List(Vec<SearchResult>),
    Wrapped { data: Vec<SearchResult> },
    Empty,
    Single(SearchResult),
}

/// Untagged decode of the raw body. Variant order matters: `BadData` catches
/// a `data` key that is not a list before `Single` would accept it with every
/// field defaulted, and `Empty` must precede `Single` for the same reason.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireResponse {
    List(Vec<SearchResult>),
    Wrapped { data: Vec<SearchResult> },
    BadData { data: serde_json::Value },
    Empty(EmptyObject),
    Single(SearchResult),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EmptyObject {}

impl TryFrom<WireResponse> for SearchResponse {
    type Error = String;

    fn try_from(wire: WireResponse) -> std::result::Result<Self, Self::Error> {
        match wire {
            WireResponse::List(results) => Ok(SearchResponse::List(results)),
            WireResponse::Wrapped { data } => Ok(SearchResponse::Wrapped { data }),
            WireResponse::BadData { data } => Err(format!(
                "expected \"data\" to be a list of results, got {data}"
            )),
            WireResponse::Empty(_) => Ok(SearchResponse::Empty),
            WireResponse::Single(result) => Ok(SearchResponse::Single(result)),
        }
    }
}

impl SearchResponse {
    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            SearchResponse::List(results) => results,
            SearchResponse::Wrapped { data } => data,
            SearchResponse::Empty => Vec::new(),
            SearchResponse::Single(result) => vec![result],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upload_request_uses_webhook_field_names() {
        let req = UploadRequest {
            files: vec![FileRecord {
                file_name: "a.txt".into(),
                text: "hello".into(),
                chunk_size: 600,
                chunk_overlap: 100,
            }],
            namespace: "default".into(),
            chunk_size: 600,
            chunk_overlap: 100,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "files": [{"fileName": "a.txt", "text": "hello", "chunkSize": 600, "chunkOverlap": 100}],
                "namespace": "default",
                "chunkSize": 600,
                "chunkOverlap": 100
            })
        );
    }

    #[test]
    fn search_request_uses_webhook_field_names() {
        let req = SearchRequest {
            query: "query: vacation policy".into(),
            namespace: "hr".into(),
            top_k: 3,
            min_score: 0.5,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"query": "query: vacation policy", "namespace": "hr", "topK": 3, "minScore": 0.5})
        );
    }

    #[test]
    fn upload_result_tolerates_missing_counters() {
        let result: UploadResult = serde_json::from_str(r#"{"totalFiles": 2}"#).unwrap();
        assert_eq!(result.total_files, 2);
        assert_eq!(result.total_upserted, 0);
        assert!(result.file_results.is_empty());
    }

    #[test]
    fn response_shapes_normalize_to_a_list() {
        let list: SearchResponse =
            serde_json::from_str(r#"[{"text": "a", "score": 0.9}, {"text": "b", "score": 0.1}]"#).unwrap();
        assert!(matches!(list, SearchResponse::List(_)));
        assert_eq!(list.into_results().len(), 2);

        let wrapped: SearchResponse =
            serde_json::from_str(r#"{"data": [{"text": "a", "score": 0.9}]}"#).unwrap();
        assert!(matches!(wrapped, SearchResponse::Wrapped { .. }));
        assert_eq!(wrapped.into_results().len(), 1);

        let single: SearchResponse =
            serde_json::from_str(r#"{"text": "only", "score": 0.7, "source": "faq.txt"}"#).unwrap();
        let results = single.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source_or_unknown(), "faq.txt");

        let empty: SearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, SearchResponse::Empty);
        assert!(empty.into_results().is_empty());
    }

    #[test]
    fn data_key_that_is_not_a_list_fails_to_decode() {
        for body in [r#"{"data": null}"#, r#"{"data": {"text": "x", "score": 0.9}}"#, r#"{"data": "oops"}"#] {
            let err = serde_json::from_str::<SearchResponse>(body).unwrap_err();
            assert!(err.to_string().contains("\"data\""), "{body}: {err}");
        }
        let wrapped_null: Option<SearchResponse> = serde_json::from_str("null").unwrap();
        assert!(wrapped_null.is_none());
    }

    #[test]
    fn missing_result_fields_have_display_fallbacks() {
        let result: SearchResult = serde_json::from_str(r#"{"text": "t"}"#).unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.source_or_unknown(), "unknown");
        assert_eq!(result.chunk_index_or_default(), -1);
        assert_eq!(result.id_display(), "N/A");

        let numeric: SearchResult = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(numeric.id_display(), "42");
        let textual: SearchResult = serde_json::from_str(r#"{"id": "chunk_17_0"}"#).unwrap();
        assert_eq!(textual.id_display(), "chunk_17_0");
    }
}
