//! Twitter v2 최근 검색 API 소스.

use super::PostSource;
use crate::error::Result;
use crate::http::fetch_json;
use async_trait::async_trait;
use digest_core::SocialPost;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

const PROVIDER: &str = "twitter";
/// API가 허용하는 `max_results` 범위.
const MIN_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// 결과가 없으면 필드 자체가 빠집니다.
    #[serde(default)]
    data: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    text: String,
    created_at: String,
}

/// Bearer 토큰 기반 검색 소스.
pub struct SearchApiSource<'a> {
    client: &'a Client,
    url: &'a str,
    token: &'a SecretString,
}

impl<'a> SearchApiSource<'a> {
    pub fn new(client: &'a Client, url: &'a str, token: &'a SecretString) -> Self {
        Self { client, url, token }
    }
}

#[async_trait]
impl PostSource for SearchApiSource<'_> {
    async fn fetch_posts(&self, account: &str, limit: usize) -> Result<Vec<SocialPost>> {
        let page_size = limit.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        let request = self
            .client
            .get(self.url)
            .bearer_auth(self.token.expose_secret())
            .query(&[
                ("query", format!("from:{account} -is:retweet")),
                ("max_results", page_size.to_string()),
                ("tweet.fields", "created_at".to_string()),
            ]);

        let response: SearchResponse = fetch_json(PROVIDER, request).await?;

        Ok(response
            .data
            .into_iter()
            .take(limit)
            .map(|tweet| SocialPost {
                account: account.to_string(),
                url: format!("https://twitter.com/{account}/status/{}", tweet.id),
                text: tweet.text,
                timestamp: tweet.created_at,
            })
            .collect())
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_search_request_and_truncation() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/2/tweets/search/recent")
            .match_header("authorization", "Bearer tw-token")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "from:elonmusk -is:retweet".into()),
                Matcher::UrlEncoded("max_results".into(), "10".into()),
                Matcher::UrlEncoded("tweet.fields".into(), "created_at".into()),
            ]))
            .with_body(
                r#"{"data":[
                    {"id":"1","text":"first","created_at":"2024-05-02T10:00:00.000Z"},
                    {"id":"2","text":"second","created_at":"2024-05-02T09:00:00.000Z"},
                    {"id":"3","text":"third","created_at":"2024-05-02T08:00:00.000Z"},
                    {"id":"4","text":"fourth","created_at":"2024-05-02T07:00:00.000Z"}
                ],"meta":{"result_count":4}}"#,
            )
            .create_async()
            .await;

        let client = Client::new();
        let url = format!("{}/2/tweets/search/recent", server.url());
        let token = SecretString::from("tw-token".to_string());
        let source = SearchApiSource::new(&client, &url, &token);

        let posts = source.fetch_posts("elonmusk", 3).await.unwrap();
        mock.assert_async().await;

        assert_eq!(posts.len(), 3);
        assert_eq!(
            posts[0],
            SocialPost {
                account: "elonmusk".to_string(),
                text: "first".to_string(),
                timestamp: "2024-05-02T10:00:00.000Z".to_string(),
                url: "https://twitter.com/elonmusk/status/1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_no_results() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_body(r#"{"meta":{"result_count":0}}"#)
            .create_async()
            .await;

        let client = Client::new();
        let url = format!("{}/search", server.url());
        let token = SecretString::from("tw-token".to_string());
        let source = SearchApiSource::new(&client, &url, &token);

        assert!(source.fetch_posts("cz_binance", 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"title":"Unauthorized"}"#)
            .create_async()
            .await;

        let client = Client::new();
        let url = format!("{}/search", server.url());
        let token = SecretString::from("expired".to_string());
        let source = SearchApiSource::new(&client, &url, &token);

        assert!(matches!(
            source.fetch_posts("cz_binance", 3).await,
            Err(DataError::Status { status: 401, .. })
        ));
    }
}
