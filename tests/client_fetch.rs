// BibleClient against a mock provider.
use lectio::client::BibleClient;
use lectio::config::{Config, ProviderKind};
use lectio::model::PassageRequest;
use mockito::{Matcher, Server};

const MAT1_CUNP: &str = r#"[
    {"pk": 1, "verse": 2, "text": "亞伯拉罕生以撒；"},
    {"pk": 2, "verse": 1, "text": "亞伯拉罕的後裔，大衛的子孫<S>5207</S>，耶穌基督的家譜："}
]"#;

const MAT1_KJV: &str = r#"[
    {"pk": 9, "verse": 1, "text": "The book of the <i>generation</i> of Jesus Christ"},
    {"pk": 10, "verse": 2, "text": "Abraham begat Isaac"}
]"#;

fn bolls_config(url: &str) -> Config {
    Config {
        provider: ProviderKind::Bolls,
        bolls_base_url: url.to_string(),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_fetch_chapter_cleans_and_sorts() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/get-chapter/CUNP/40/1/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MAT1_CUNP)
        .create_async()
        .await;

    let client = BibleClient::new(&bolls_config(&server.url())).unwrap();
    let request = PassageRequest::parse("太 1").unwrap();
    let passage = client.fetch_passage(&request, "CUNP", None).await.unwrap();

    m.assert_async().await;
    assert_eq!(passage.data.reference, "馬太福音 1");
    assert_eq!(passage.data.lines.len(), 2);
    assert_eq!(passage.data.lines[0].verse, 1);
    assert_eq!(
        passage.data.lines[0].text,
        "亞伯拉罕的後裔，大衛的子孫，耶穌基督的家譜："
    );
    assert!(passage.parallel.is_none());
}

#[tokio::test]
async fn test_parallel_version_is_paired_by_verse() {
    let mut server = Server::new_async().await;
    let _a = server
        .mock("GET", "/get-chapter/CUNP/40/1/")
        .with_body(MAT1_CUNP)
        .create_async()
        .await;
    let _b = server
        .mock("GET", "/get-chapter/KJV/40/1/")
        .with_body(MAT1_KJV)
        .create_async()
        .await;

    let client = BibleClient::new(&bolls_config(&server.url())).unwrap();
    let request = PassageRequest::parse("太 1:2").unwrap();
    let passage = client
        .fetch_passage(&request, "CUNP", Some("KJV"))
        .await
        .unwrap();

    assert_eq!(passage.data.reference, "馬太福音 1:2");
    let rows = passage.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0.verse, 2);
    assert_eq!(rows[0].1, Some("Abraham begat Isaac"));
}

#[tokio::test]
async fn test_secondary_failure_fails_the_passage() {
    let mut server = Server::new_async().await;
    let _a = server
        .mock("GET", "/get-chapter/CUNP/40/1/")
        .with_body(MAT1_CUNP)
        .create_async()
        .await;
    let _b = server
        .mock("GET", "/get-chapter/KJV/40/1/")
        .with_status(500)
        .create_async()
        .await;

    let client = BibleClient::new(&bolls_config(&server.url())).unwrap();
    let request = PassageRequest::parse("太 1").unwrap();
    let err = client
        .fetch_passage(&request, "CUNP", Some("KJV"))
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("500"));
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/get-chapter/CUNP/19/23/")
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let client = BibleClient::new(&bolls_config(&server.url())).unwrap();
    let request = PassageRequest::parse("詩 23").unwrap();
    assert!(client.fetch_passage(&request, "CUNP", None).await.is_err());
}

#[tokio::test]
async fn test_garbage_body_is_an_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/get-chapter/CUNP/40/1/")
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = BibleClient::new(&bolls_config(&server.url())).unwrap();
    let request = PassageRequest::parse("太 1").unwrap();
    assert!(client.fetch_passage(&request, "CUNP", None).await.is_err());
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mut server = Server::new_async().await;
    let _moved = server
        .mock("GET", "/get-chapter/CUNP/40/1/")
        .with_status(301)
        .with_header("location", "/v2/get-chapter/CUNP/40/1/")
        .create_async()
        .await;
    let _target = server
        .mock("GET", "/v2/get-chapter/CUNP/40/1/")
        .with_body(MAT1_CUNP)
        .create_async()
        .await;

    let client = BibleClient::new(&bolls_config(&server.url())).unwrap();
    let request = PassageRequest::parse("太 1").unwrap();
    let passage = client.fetch_passage(&request, "CUNP", None).await.unwrap();
    assert_eq!(passage.data.lines.len(), 2);
}

#[tokio::test]
async fn test_fhl_provider() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("GET", Matcher::Regex(r"^/json/qb\.php".to_string()))
        .match_query(Matcher::UrlEncoded("chap".into(), "23".into()))
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(
            r#"{"status": "success", "record_count": 2, "record": [
                {"chineses": "詩", "chap": 23, "sec": "1", "bible_text": "耶和華是我的牧者，我必不致缺乏。"},
                {"chineses": "詩", "chap": 23, "sec": "2", "bible_text": "他使我躺臥在青草地上"}
            ]}"#,
        )
        .create_async()
        .await;

    let config = Config {
        provider: ProviderKind::Fhl,
        fhl_base_url: server.url(),
        ..Config::default()
    };
    let client = BibleClient::new(&config).unwrap();
    let request = PassageRequest::parse("詩 23:1").unwrap();
    let passage = client.fetch_passage(&request, "unv", None).await.unwrap();

    ok.assert_async().await;
    assert_eq!(passage.data.lines.len(), 1);
    assert_eq!(passage.data.lines[0].text, "耶和華是我的牧者，我必不致缺乏。");
}

#[tokio::test]
async fn test_fhl_error_status() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", Matcher::Regex(r"^/json/qb\.php".to_string()))
        .with_body(r#"{"status": "error", "record": []}"#)
        .create_async()
        .await;

    let config = Config {
        provider: ProviderKind::Fhl,
        fhl_base_url: server.url(),
        ..Config::default()
    };
    let client = BibleClient::new(&config).unwrap();
    let request = PassageRequest::parse("詩 23").unwrap();
    assert!(client.fetch_passage(&request, "unv", None).await.is_err());
}

#[tokio::test]
async fn test_stalled_body_times_out() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Headers arrive, then the body never completes.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n[")
            .await;
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
    });

    let config = Config {
        request_timeout_secs: 1,
        ..bolls_config(&format!("http://{}", addr))
    };
    let client = BibleClient::new(&config).unwrap();
    let request = PassageRequest::parse("太 1").unwrap();

    let outcome = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        client.fetch_passage(&request, "CUNP", None),
    )
    .await
    .expect("fetch should give up on its own");
    let err = outcome.unwrap_err();
    assert!(format!("{:#}", err).contains("timed out"));
}
