//! REST adapter for the classification-backed feed service

use async_trait::async_trait;
use reqwest::{Client, Response};
use sentimind_domain::{CategoryList, FeedError, NewPost, Post, PostService};
use serde::de::DeserializeOwned;

/// Default API root of a locally running backend
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Post service backed by the REST API
///
/// One request per call. No retries, no caching, client default timeouts.
pub struct RestPostService {
    client: Client,
    base_url: String,
}

impl RestPostService {
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Turn a response into a decoded body, mapping non-2xx to an error
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FeedError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FeedError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| FeedError::Decode(e.to_string()))
}

#[async_trait]
impl PostService for RestPostService {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Post>, FeedError> {
        tracing::debug!(category = ?category, "Fetching posts");

        let mut request = self.client.get(self.url("posts/"));
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        let posts: Vec<Post> = decode(response).await?;

        tracing::info!(category = ?category, count = posts.len(), "Fetched posts");
        Ok(posts)
    }

    async fn create(&self, content: &str) -> Result<Post, FeedError> {
        tracing::info!(text_length = content.len(), "Submitting post");

        let response = self
            .client
            .post(self.url("posts/"))
            .json(&NewPost {
                content: content.to_string(),
            })
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        decode(response).await
    }

    async fn list_categories(&self) -> Result<Vec<String>, FeedError> {
        let response = self
            .client
            .get(self.url("categories/"))
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let list: CategoryList = decode(response).await?;
        Ok(list.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn post_json(id: u64, category: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "content": format!("post {}", id),
            "primary_category": category,
            "primary_confidence": 0.9,
            "categories": [{"name": category, "confidence": 0.9}],
            "created_at": "2024-05-01T10:30:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_without_filter() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/posts/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([post_json(2, "Miedo"), post_json(1, "Amor")])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = RestPostService::with_base_url(format!("{}/api", mock_server.uri()));
        let posts = service.list(None).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 2);
        assert_eq!(posts[1].primary_category, "Amor");
    }

    #[tokio::test]
    async fn test_list_with_filter_encodes_category() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/posts/"))
            .and(query_param("category", "Alegría"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([post_json(5, "Alegría")])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = RestPostService::with_base_url(format!("{}/api/", mock_server.uri()));
        let posts = service.list(Some("Alegría")).await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].primary_category, "Alegría");
    }

    #[tokio::test]
    async fn test_create_posts_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/posts/"))
            .and(body_json(serde_json::json!({"content": "Te amo"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 9,
                "content": "Te amo",
                "category": "Amor",
                "confidence": 0.97,
                "created_at": "2024-05-01T10:30:00.512Z"
            })))
            .mount(&mock_server)
            .await;

        let service = RestPostService::with_base_url(format!("{}/api", mock_server.uri()));
        let post = service.create("Te amo").await.unwrap();

        assert_eq!(post.id, 9);
        assert_eq!(post.labels().len(), 1);
        assert_eq!(post.labels()[0].name, "Amor");
    }

    #[tokio::test]
    async fn test_create_rejected_by_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/posts/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "El contenido debe tener al menos 3 caracteres"
            })))
            .mount(&mock_server)
            .await;

        let service = RestPostService::with_base_url(format!("{}/api", mock_server.uri()));
        let result = service.create("ok").await;

        assert!(matches!(result, Err(FeedError::Status { status: 400, .. })));
    }

    #[tokio::test]
    async fn test_list_categories() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/categories/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "categories": ["Alegría", "Tristeza", "Terror"]
            })))
            .mount(&mock_server)
            .await;

        let service = RestPostService::with_base_url(format!("{}/api", mock_server.uri()));
        let categories = service.list_categories().await.unwrap();

        assert_eq!(categories, vec!["Alegría", "Tristeza", "Terror"]);
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/posts/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let service = RestPostService::with_base_url(format!("{}/api", mock_server.uri()));
        let result = service.list(None).await;

        assert!(matches!(result, Err(FeedError::Decode(_))));
    }

    #[tokio::test]
    async fn test_server_error_is_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/categories/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let service = RestPostService::with_base_url(format!("{}/api", mock_server.uri()));
        let result = service.list_categories().await;

        assert!(matches!(result, Err(FeedError::Status { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let service = RestPostService::with_base_url("http://127.0.0.1:9/api".to_string());
        let result = service.list(None).await;

        assert!(matches!(result, Err(FeedError::Network(_))));
    }
}
