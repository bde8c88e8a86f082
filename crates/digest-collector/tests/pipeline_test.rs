//! 모든 외부 API를 mockito 서버 하나로 대체한 전체 실행 테스트.

use digest_collector::{build_digest, run_once, CollectorError, DigestConfig};
use digest_data::{DataError, MetricsEndpoints};
use digest_notification::TelegramSender;
use mockito::{Matcher, Mock, ServerGuard};
use reqwest::Client;

const TWEETS: &str = r#"{"data":[
    {"id":"11","text":"tariffs","created_at":"2024-05-02T10:00:00.000Z"},
    {"id":"12","text":"markets","created_at":"2024-05-02T09:00:00.000Z"}
],"meta":{"result_count":2}}"#;

fn config_for(server: &ServerGuard) -> DigestConfig {
    let base = server.url();
    let mut config = DigestConfig::from_lookup(|key| match key {
        "NEWSAPI_KEY" => Some("news-key".to_string()),
        "TW_BEARER" => Some("tw-token".to_string()),
        "TELEGRAM_BOT_TOKEN" => Some("123:abc".to_string()),
        "TELEGRAM_CHAT_ID" => Some("@digest".to_string()),
        _ => None,
    })
    .unwrap();

    config.metrics.endpoints = MetricsEndpoints {
        fred: format!("{base}/fred"),
        exchange_rate: base.clone(),
        fear_greed: format!("{base}/fng/"),
        altseason: format!("{base}/altseason/"),
        coingecko: format!("{base}/api/v3"),
    };
    config.news.newsapi_url = format!("{base}/v2/top-headlines");
    config.news.feeds = vec![format!("{base}/rss.xml")];
    config.social.search_url = format!("{base}/2/tweets/search/recent");
    config.image.static_url = "https://img.test/static.jpg".to_string();
    if let Some(telegram) = config.telegram.as_mut() {
        telegram.api_url = base;
    }
    config
}

async fn mock_metrics(server: &mut ServerGuard) -> Vec<Mock> {
    vec![
        server
            .mock("GET", "/fred/series/observations")
            .match_query(Matcher::UrlEncoded("series_id".into(), "DGS10".into()))
            .with_body(r#"{"observations":[{"date":"2024-05-02","value":"4.20"}]}"#)
            .create_async()
            .await,
        server
            .mock("GET", "/fred/series/observations")
            .match_query(Matcher::UrlEncoded("series_id".into(), "M2SL".into()))
            .with_body(
                r#"{"observations":[
                    {"date":"2024-02-01","value":"20000.0"},
                    {"date":"2024-03-01","value":"20060.0"}
                ]}"#,
            )
            .create_async()
            .await,
        server
            .mock("GET", "/timeseries")
            .match_query(Matcher::Any)
            .with_body(r#"{"rates":{"2024-05-01":{"EUR":0.9200},"2024-05-02":{"EUR":0.92138}}}"#)
            .create_async()
            .await,
        server
            .mock("GET", "/fng/")
            .with_body(r#"{"data":[{"value":"55"}]}"#)
            .create_async()
            .await,
        server
            .mock("GET", "/altseason/")
            .with_body(r#"{"index":40}"#)
            .create_async()
            .await,
        server
            .mock("GET", "/api/v3/global")
            .with_body(r#"{"data":{"total_market_cap":{"usd":2500000000000.0}}}"#)
            .create_async()
            .await,
    ]
}

async fn mock_news(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::Any)
        .with_body(
            r#"{"status":"ok","articles":[
                {"title":"Markets up","url":"https://news.test/1"},
                {"title":"Crypto down","url":"https://news.test/2"}
            ]}"#,
        )
        .create_async()
        .await
}

async fn mock_social(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/2/tweets/search/recent")
        .match_query(Matcher::Any)
        .with_body(TWEETS)
        .expect(3)
        .create_async()
        .await
}

#[tokio::test]
async fn test_full_run_sends_composed_message() {
    let mut server = mockito::Server::new_async().await;
    let _metrics = mock_metrics(&mut server).await;
    let _news = mock_news(&mut server).await;
    let social = mock_social(&mut server).await;
    let telegram = server
        .mock("POST", "/bot123:abc/sendMessage")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "chat_id": "@digest",
            "parse_mode": "MarkdownV2",
            "disable_web_page_preview": false,
        })))
        .with_body(r#"{"ok":true,"result":{"message_id":7}}"#)
        .create_async()
        .await;

    let config = config_for(&server);
    let client = Client::new();
    let telegram_config = config.telegram.as_ref().unwrap();
    let sender = TelegramSender::new(telegram_config, client.clone());

    let stats = run_once(&config, &client, &sender).await.unwrap();

    telegram.assert_async().await;
    social.assert_async().await;
    assert!(stats.sent);
    assert!(!stats.is_partial());
    assert_eq!(stats.news, 2);
    // 1차 계정 1개, 2차 계정 2개 × 2건
    assert_eq!(stats.primary_posts, 2);
    assert_eq!(stats.secondary_posts, 4);
    assert!(stats.has_image);
}

#[tokio::test]
async fn test_build_digest_content() {
    let mut server = mockito::Server::new_async().await;
    let _metrics = mock_metrics(&mut server).await;
    let _news = mock_news(&mut server).await;
    let _social = mock_social(&mut server).await;

    let config = config_for(&server);
    let digest = build_digest(&config, &Client::new()).await.unwrap();
    let text = &digest.message.text;

    assert!(text.contains("🔔 *Метрики:* 🇺🇸10Y +4.20% | 💵DXY +0.15% | 😱FGI 55 | 🔀ALT 40% | 💸M2 +20060.00% | 🌐Cap $2500000000000"));
    assert!(text.contains("1. [Markets up](https://news.test/1)\n"));
    assert!(text.contains(
        "• [2024-05-02T10:00:00.000Z](https://twitter.com/realDonaldTrump/status/11): tariffs\n"
    ));
    assert!(text.contains(
        "• [cz_binance · 2024-05-02T09:00:00.000Z](https://twitter.com/cz_binance/status/12): markets\n"
    ));
    assert!(text.ends_with("![img](https://img.test/static.jpg)"));
    assert_eq!(digest.message.image_url, "https://img.test/static.jpg");
}

#[tokio::test]
async fn test_metrics_failure_aborts_without_sending() {
    let mut server = mockito::Server::new_async().await;
    let _fred = server
        .mock("GET", "/fred/series/observations")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;
    let telegram = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut config = config_for(&server);
    // 부분 실행이 허용되어도 지표 실패는 중단
    config.allow_partial = true;
    let client = Client::new();
    let telegram_config = config.telegram.as_ref().unwrap();
    let sender = TelegramSender::new(telegram_config, client.clone());

    let err = run_once(&config, &client, &sender).await.unwrap_err();

    telegram.assert_async().await;
    assert!(matches!(
        err,
        CollectorError::DataSource(DataError::Status { status: 500, .. })
    ));
}

async fn mock_broken_news(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::Any)
        .with_body("not json")
        .create_async()
        .await
}

#[tokio::test]
async fn test_news_failure_aborts_by_default() {
    let mut server = mockito::Server::new_async().await;
    let _metrics = mock_metrics(&mut server).await;
    let _news = mock_broken_news(&mut server).await;

    let config = config_for(&server);
    let err = build_digest(&config, &Client::new()).await.unwrap_err();

    assert!(matches!(
        err,
        CollectorError::DataSource(DataError::Decode { provider: "newsapi", .. })
    ));
}

#[tokio::test]
async fn test_news_failure_degrades_with_partial() {
    let mut server = mockito::Server::new_async().await;
    let _metrics = mock_metrics(&mut server).await;
    let _news = mock_broken_news(&mut server).await;
    let _social = mock_social(&mut server).await;

    let mut config = config_for(&server);
    config.allow_partial = true;
    let digest = build_digest(&config, &Client::new()).await.unwrap();

    assert_eq!(digest.stats.degraded, vec!["news"]);
    assert_eq!(digest.stats.news, 0);
    assert!(digest.message.text.contains("### Новости\n\n### Твиты Трампа\n"));
}
