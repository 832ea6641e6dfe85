//! Paginated listing tests.

use futures::{StreamExt, TryStreamExt};
use sensu_go::{ErrorKind, Selector};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{api_key_client, check_json, check_page, start_backend};

const CHECKS_PATH: &str = "/api/core/v2/namespaces/default/checks";

/// Three pages of 100, 100 and 37 items yield 237 resources in order.
#[tokio::test]
async fn test_list_follows_continue_header() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .and(query_param("limit", "100"))
        .and(query_param_is_missing("continue"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Sensu-Continue", "t1")
                .set_body_json(check_page(0, 100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .and(query_param("limit", "100"))
        .and(query_param("continue", "t1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Sensu-Continue", "t2")
                .set_body_json(check_page(100, 100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .and(query_param("continue", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_page(200, 37)))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let checks = client.checks().list().await?;

    assert_eq!(checks.len(), 237);
    let names: Vec<_> = checks
        .iter()
        .filter_map(|c| c.name().map(|n| n.into_owned()))
        .collect();
    let expected: Vec<_> = (0..237).map(|i| format!("check-{}", i)).collect();
    assert_eq!(names, expected);

    Ok(())
}

/// Stopping early fetches no further pages.
#[tokio::test]
async fn test_early_stop_fetches_one_page() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .and(query_param_is_missing("continue"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Sensu-Continue", "t1")
                .set_body_json(check_page(0, 100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .and(query_param("continue", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_page(100, 1)))
        .expect(0)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let first: Vec<_> = client
        .checks()
        .list()
        .stream()
        .take(5)
        .try_collect()
        .await?;

    assert_eq!(first.len(), 5);

    Ok(())
}

/// Each traversal starts over from the first page.
#[tokio::test]
async fn test_listing_is_restartable() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .and(query_param_is_missing("continue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_page(0, 3)))
        .expect(2)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let listing = client.checks().list();

    assert_eq!(listing.collect().await?.len(), 3);
    assert_eq!(listing.stream().try_collect::<Vec<_>>().await?.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_selectors_are_sent() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path("/api/core/v2/namespaces/default/entities"))
        .and(query_param("labelSelector", r#"region == "eu-west" && tier != "db""#))
        .and(query_param("fieldSelector", r#""linux" in entity.subscriptions"#))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let entities = client
        .entities()
        .list()
        .label_selector(Selector::equal("region", "eu-west").and(Selector::not_equal("tier", "db")))
        .field_selector(Selector::in_("linux", "subscriptions"))
        .page_size(25)
        .await?;

    assert!(entities.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_check_events() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path("/api/core/v2/namespaces/default/checks/check-cpu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_json("check-cpu")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/core/v2/namespaces/default/events"))
        .and(query_param("fieldSelector", r#"event.check.name == "check-cpu""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "entity": {"metadata": {"name": "web-01", "namespace": "default"}},
            "check": {"status": 0, "metadata": {"name": "check-cpu", "namespace": "default"}},
            "metadata": {"namespace": "default"},
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let check = client.checks().get("check-cpu").await?;
    let events = check.events()?.await?;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name().as_deref(), Some("web-01/check-cpu"));

    Ok(())
}

#[tokio::test]
async fn test_failing_page_ends_stream() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .and(query_param_is_missing("continue"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Sensu-Continue", "t1")
                .set_body_json(check_page(0, 2)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .and(query_param("continue", "t1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("etcd unavailable"))
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let results: Vec<_> = client.checks().list().stream().collect().await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    let err = results[2]
        .as_ref()
        .err()
        .ok_or_else(|| anyhow::anyhow!("third item should be an error"))?;
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    assert_eq!(err.body(), Some("etcd unavailable"));

    Ok(())
}

#[tokio::test]
async fn test_delete_all_listed() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_page(0, 3)))
        .expect(1)
        .mount(&server)
        .await;

    for i in 0..3 {
        Mock::given(method("DELETE"))
            .and(path(format!("{}/check-{}", CHECKS_PATH, i)))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = api_key_client(&server)?;
    client.checks().list().delete().await?;

    Ok(())
}
