//! End-to-end scraper tests against a local mock of tvlux.sk

use std::time::Duration;

use tvlux_core::config::DEFAULT_USER_AGENT;
use tvlux_core::{CategoryKind, ClientConfig, LiveStream, SiteConfig, TvluxError, TvluxScraper};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX: &str = r#"
<html><body>
  <div class="col-md-6 col-lg-3 rel-identification">
    <a href="/archiv/relacia/a-teraz-co/"><img src="/img/a.jpg"><h3> A teraz čo? </h3></a>
    <div class="tag tag-blue">Publicistika</div>
  </div>
  <div class="col-md-6 col-lg-3 rel-identification">
    <a href="/archiv/relacia/bozie-slovo/"><img src="/img/b.jpg"><h3>Božie slovo</h3></a>
    <div class="tag tag-blue">Náboženstvo</div>
  </div>
</body></html>
"#;

fn listing(cards: &[(&str, &str, Option<&str>)], next: Option<&str>) -> String {
    let mut html = String::from("<html><body>");
    for (title, href, date) in cards {
        html.push_str(&format!(
            r#"<div class="archive-item"><a href="{href}"><img src="{href}.jpg"></a><h4>{title}</h4>"#
        ));
        if let Some(date) = date {
            html.push_str(&format!(r#"<div class="tag dark">{date}</div>"#));
        }
        html.push_str("</div>");
    }
    if let Some(next) = next {
        html.push_str(&format!(
            r#"<ul class="pagination"><li class="next"><a href="{next}">&raquo;</a></li></ul>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

fn detail(source: &str, description: &str) -> String {
    format!(
        r#"<html><body><video><source src="{source}" type="video/mp4"></video><p>{description}</p></body></html>"#
    )
}

fn config_for(server: &MockServer) -> SiteConfig {
    SiteConfig {
        index_url: format!("{}/archiv/abecedne/vsetko", server.uri()),
        client: ClientConfig {
            base_retry_delay_ms: 10,
            ..ClientConfig::default()
        },
        ..SiteConfig::default()
    }
}

async fn mount_html(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_categories_sends_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archiv/abecedne/vsetko"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(INDEX))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = TvluxScraper::with_config(config_for(&server)).unwrap();
    let categories = scraper.list_categories().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].title, "A teraz čo?");
    assert_eq!(
        categories[0].detail_url,
        format!("{}/archiv/relacia/a-teraz-co/", server.uri())
    );
    assert_eq!(categories[0].image_url, format!("{}/img/a.jpg", server.uri()));
    assert_eq!(categories[1].title, "Božie slovo");
    assert_eq!(categories[1].genre_tag, "Náboženstvo");
}

#[tokio::test]
async fn test_live_stream_comes_first() {
    let server = MockServer::start().await;
    mount_html(&server, "/archiv/abecedne/vsetko", INDEX.to_string()).await;

    let config = SiteConfig {
        live_stream: Some(LiveStream {
            title: "TV LUX naživo".to_string(),
            url: "https://live.example.test/lux/playlist.m3u8".to_string(),
            image: String::new(),
        }),
        ..config_for(&server)
    };
    let scraper = TvluxScraper::with_config(config).unwrap();
    let categories = scraper.list_categories().await.unwrap();

    assert_eq!(categories.len(), 3);
    assert_eq!(categories[0].kind, CategoryKind::Live);
    assert_eq!(categories[0].detail_url, "https://live.example.test/lux/playlist.m3u8");
    assert!(categories[1..].iter().all(|c| c.kind == CategoryKind::Archive));
    assert_eq!(categories[1].title, "A teraz čo?");
}

#[tokio::test]
async fn test_list_categories_is_stable_across_runs() {
    let server = MockServer::start().await;
    mount_html(&server, "/archiv/abecedne/vsetko", INDEX.to_string()).await;

    let scraper = TvluxScraper::with_config(config_for(&server)).unwrap();
    let first = scraper.list_categories().await.unwrap();
    let second = scraper.list_categories().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_episodes_resolves_each_detail_page_in_order() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/archiv/relacia/a-teraz-co/",
        listing(
            &[
                ("Prvý diel", "/archiv/video/1", Some("15.03.2023")),
                ("Druhý diel", "/archiv/video/2", None),
                ("Tretí diel", "/archiv/video/3", Some("1.4.2023")),
            ],
            None,
        ),
    )
    .await;

    // The first detail page answers last; output order must not change.
    Mock::given(method("GET"))
        .and(path("/archiv/video/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(detail("https://media.example.test/1.mp4", "Jedna"))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/archiv/video/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail("/media/2.m3u8", "Dva")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/archiv/video/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail("/media/3.m3u8", "Tri")))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = TvluxScraper::with_config(config_for(&server)).unwrap();
    let page = scraper
        .list_episodes(&format!("{}/archiv/relacia/a-teraz-co/", server.uri()))
        .await
        .unwrap();

    let titles: Vec<&str> = page.episodes.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Prvý diel", "Druhý diel", "Tretí diel"]);
    assert!(page
        .episodes
        .iter()
        .all(|e| e.playable_url.starts_with("http://") || e.playable_url.starts_with("https://")));

    assert_eq!(page.episodes[0].playable_url, "https://media.example.test/1.mp4");
    assert_eq!(page.episodes[0].description, "Jedna");
    assert_eq!(page.episodes[0].premiered_iso().as_deref(), Some("2023-03-15"));
    assert_eq!(page.episodes[1].playable_url, format!("{}/media/2.m3u8", server.uri()));
    assert_eq!(page.episodes[1].premiered, None);
    assert_eq!(page.episodes[2].premiered_iso().as_deref(), Some("2023-04-01"));
    assert_eq!(page.next_page, None);
}

#[tokio::test]
async fn test_sequential_detail_fetches_keep_order() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/list",
        listing(&[("A", "/v/a", None), ("B", "/v/b", None)], None),
    )
    .await;
    mount_html(&server, "/v/a", detail("/a.mp4", "a")).await;
    mount_html(&server, "/v/b", detail("/b.mp4", "b")).await;

    let config = SiteConfig {
        detail_concurrency: 1,
        ..config_for(&server)
    };
    let scraper = TvluxScraper::with_config(config).unwrap();
    let page = scraper.list_episodes(&format!("{}/list", server.uri())).await.unwrap();

    assert_eq!(page.episodes[0].playable_url, format!("{}/a.mp4", server.uri()));
    assert_eq!(page.episodes[1].playable_url, format!("{}/b.mp4", server.uri()));
}

#[tokio::test]
async fn test_episode_pages_follow_next_link_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/relacia/strana/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing(&[("P1", "/v/1", None)], Some("/relacia/strana/2"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/relacia/strana/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&[("P2", "/v/2", None)], None)))
        .expect(1)
        .mount(&server)
        .await;
    mount_html(&server, "/v/1", detail("/1.mp4", "")).await;
    mount_html(&server, "/v/2", detail("/2.mp4", "")).await;

    let scraper = TvluxScraper::with_config(config_for(&server)).unwrap();
    let mut pages = scraper.episode_pages(&format!("{}/relacia/strana/1", server.uri()));

    let first = pages.next_page().await.unwrap().unwrap();
    assert_eq!(first.episodes[0].title, "P1");
    assert_eq!(
        first.next_page,
        Some(format!("{}/relacia/strana/2", server.uri()))
    );
    assert_eq!(pages.next_url(), first.next_page.as_deref());

    let second = pages.next_page().await.unwrap().unwrap();
    assert_eq!(second.episodes[0].title, "P2");
    assert_eq!(second.next_page, None);

    assert!(pages.next_page().await.is_none());
}

#[tokio::test]
async fn test_episode_pages_never_revisit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/strana/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing(&[("P1", "/v/1", None)], Some("/strana/2"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/strana/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing(&[("P2", "/v/2", None)], Some("/strana/1"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_html(&server, "/v/1", detail("/1.mp4", "")).await;
    mount_html(&server, "/v/2", detail("/2.mp4", "")).await;

    let scraper = TvluxScraper::with_config(config_for(&server)).unwrap();
    let mut pages = scraper.episode_pages(&format!("{}/strana/1", server.uri()));

    let mut count = 0;
    while let Some(page) = pages.next_page().await {
        page.unwrap();
        count += 1;
    }
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_missing_listing_is_page_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>Stránka neexistuje</html>"))
        .mount(&server)
        .await;

    let scraper = TvluxScraper::with_config(config_for(&server)).unwrap();
    let result = scraper.list_episodes(&format!("{}/gone", server.uri())).await;

    assert!(matches!(result, Err(TvluxError::PageNotFound(_))));
}

#[tokio::test]
async fn test_server_error_is_not_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archiv/abecedne/vsetko"))
        .respond_with(ResponseTemplate::new(500).set_body_string(INDEX))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = TvluxScraper::with_config(config_for(&server)).unwrap();
    match scraper.list_categories().await {
        Err(TvluxError::HttpStatus { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected HttpStatus error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_retry_recovers_from_transient_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archiv/abecedne/vsetko"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_html(&server, "/archiv/abecedne/vsetko", INDEX.to_string()).await;

    let mut config = config_for(&server);
    config.client.max_retries = 1;
    let scraper = TvluxScraper::with_config(config).unwrap();

    assert_eq!(scraper.list_categories().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_rate_limited_without_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = TvluxScraper::with_config(config_for(&server)).unwrap();
    assert!(matches!(
        scraper.list_categories().await,
        Err(TvluxError::RateLimited)
    ));
}

#[tokio::test]
async fn test_malformed_date_aborts_listing() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/list",
        listing(&[("A", "/v/a", Some("včera"))], None),
    )
    .await;
    mount_html(&server, "/v/a", detail("/a.mp4", "a")).await;

    let scraper = TvluxScraper::with_config(config_for(&server)).unwrap();
    match scraper.list_episodes(&format!("{}/list", server.uri())).await {
        Err(TvluxError::DateParse { text, .. }) => assert_eq!(text, "včera"),
        other => panic!("Expected DateParse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_detail_without_source_aborts_listing() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/list",
        listing(&[("A", "/v/a", None), ("B", "/v/b", None)], None),
    )
    .await;
    mount_html(&server, "/v/a", detail("/a.mp4", "a")).await;
    mount_html(&server, "/v/b", "<html><p>Video bolo odstránené</p></html>".to_string()).await;

    let scraper = TvluxScraper::with_config(config_for(&server)).unwrap();
    let result = scraper.list_episodes(&format!("{}/list", server.uri())).await;

    assert!(matches!(result, Err(TvluxError::ElementNotFound(_))));
}

#[tokio::test]
async fn test_non_utf8_body_is_encoding_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archiv/abecedne/vsetko"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<h3>om\x9aa</h3>".to_vec()))
        .mount(&server)
        .await;

    let scraper = TvluxScraper::with_config(config_for(&server)).unwrap();
    assert!(matches!(
        scraper.list_categories().await,
        Err(TvluxError::Encoding(_))
    ));
}
