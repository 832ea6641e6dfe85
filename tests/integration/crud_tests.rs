//! Resource CRUD tests.

use sensu_go::ErrorKind;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{api_key_client, api_key_header, check_json, start_backend};

const CHECK_PATH: &str = "/api/core/v2/namespaces/default/checks/check-cpu";

#[tokio::test]
async fn test_get_and_find_missing_resource() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("resource not found"))
        .expect(2)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;

    assert!(client.checks().find("check-cpu").await?.is_none());

    let err = client
        .checks()
        .get("check-cpu")
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("get should fail"))?;
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    assert!(err.is_not_found());
    assert_eq!(err.body(), Some("resource not found"));
    assert_eq!(
        err.url(),
        Some(format!("{}{}", server.uri(), CHECK_PATH).as_str())
    );

    Ok(())
}

/// Creating writes with `PUT`, then re-reads to pick up server defaults.
#[tokio::test]
async fn test_create_reconciles_server_defaults() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(CHECK_PATH))
        .and(header("Authorization", api_key_header().as_str()))
        .and(body_json(json!({
            "command": "check-cpu.sh",
            "interval": 60,
            "metadata": {"name": "check-cpu", "namespace": "default"},
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "command": "check-cpu.sh",
            "interval": 60,
            "publish": false,
            "timeout": 0,
            "metadata": {"name": "check-cpu", "namespace": "default", "created_by": "admin"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let check = client
        .checks()
        .create(
            json!({"command": "check-cpu.sh", "interval": 60}),
            json!({"name": "check-cpu"}),
        )
        .await?;

    assert_eq!(check.spec()["publish"], false);
    assert_eq!(check.spec()["timeout"], 0);
    assert_eq!(check.metadata()["created_by"], "admin");
    assert_eq!(check.type_name(), "CheckConfig");

    Ok(())
}

#[tokio::test]
async fn test_create_existing_resource_writes_nothing() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_json("check-cpu")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let err = client
        .checks()
        .create(json!({"command": "true"}), json!({"name": "check-cpu"}))
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("create should fail"))?;

    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(
        err.message(),
        format!("Resource at {} already exists.", CHECK_PATH)
    );

    Ok(())
}

/// Local edits are sent with `save`, and the reply of the follow-up `GET` wins.
#[tokio::test]
async fn test_update_and_save() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_json("check-cpu")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    let mut updated = check_json("check-cpu");
    updated["interval"] = json!(30);

    Mock::given(method("PUT"))
        .and(path(CHECK_PATH))
        .and(body_json(&updated))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut reloaded = updated.clone();
    reloaded["metadata"]["labels"] = json!({"region": "eu-west"});

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&reloaded))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let mut check = client.checks().get("check-cpu").await?;
    check.spec_mut().insert("interval".to_string(), json!(30));
    check.save().await?;

    assert_eq!(check.spec()["interval"], 30);
    assert_eq!(check.metadata()["labels"]["region"], "eu-west");

    Ok(())
}

#[tokio::test]
async fn test_save_rejects_unexpected_status() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(check_json("check-cpu")))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad interval"))
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let mut check = client.checks().get("check-cpu").await?;
    let err = check
        .save()
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("save should fail"))?;

    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.body(), Some("bad interval"));

    Ok(())
}

#[tokio::test]
async fn test_delete() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("DELETE"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/core/v2/namespaces/default/checks/check-mem"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    client.checks().delete("check-cpu").await?;

    let err = client
        .checks()
        .delete("check-mem")
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("delete should fail"))?;
    assert!(err.is_not_found());

    Ok(())
}

#[tokio::test]
async fn test_users_cannot_be_deleted() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path("/api/core/v2/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "password_hash": "$2a$10$x",
            "groups": ["ops"],
            "disabled": false,
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let user = client.users().get("alice").await?;
    assert_eq!(user.name().as_deref(), Some("alice"));
    assert_eq!(user.path()?, "/api/core/v2/users/alice");

    let err = user
        .delete()
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("delete should fail"))?;
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.message(), "Users cannot be deleted");

    Ok(())
}

#[tokio::test]
async fn test_explicit_namespace() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path("/api/core/v2/namespaces/prod/entities/web-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entity_class": "agent",
            "metadata": {"name": "web-01", "namespace": "prod"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let entity = client.entities().namespace("prod").get("web-01").await?;

    assert_eq!(entity.namespace(), Some("prod"));
    assert_eq!(entity.spec()["entity_class"], "agent");

    Ok(())
}

#[tokio::test]
async fn test_event_names_span_entity_and_check() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("GET"))
        .and(path("/api/core/v2/namespaces/default/events/web-01/check-cpu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entity": {"metadata": {"name": "web-01", "namespace": "default"}},
            "check": {"status": 2, "metadata": {"name": "check-cpu", "namespace": "default"}},
            "metadata": {"namespace": "default"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let event = client.events().get("web-01/check-cpu").await?;

    assert_eq!(event.name().as_deref(), Some("web-01/check-cpu"));
    assert_eq!(event.spec()["check"]["status"], 2);

    Ok(())
}

#[tokio::test]
async fn test_secrets_provider_envelope() -> anyhow::Result<()> {
    let server = start_backend().await;
    let provider_path = "/api/enterprise/secrets/v1/providers/vault";
    let wire = json!({
        "type": "VaultProvider",
        "api_version": "secrets/v1",
        "metadata": {"name": "vault"},
        "spec": {"client": {"address": "https://vault.example.com:8200"}},
    });

    Mock::given(method("GET"))
        .and(path(provider_path))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(provider_path))
        .and(body_json(&wire))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(provider_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(&wire))
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let provider = client
        .secrets_providers()
        .create_with_type(
            json!({"client": {"address": "https://vault.example.com:8200"}}),
            json!({"name": "vault"}),
            "VaultProvider",
        )
        .await?;

    assert_eq!(provider.type_name(), "VaultProvider");
    assert_eq!(provider.api_version(), "secrets/v1");
    assert_eq!(provider.to_api(), wire);

    Ok(())
}

#[tokio::test]
async fn test_raw_passthrough() -> anyhow::Result<()> {
    let server = start_backend().await;

    Mock::given(method("POST"))
        .and(path("/api/core/v2/namespaces/default/checks/check-cpu/execute"))
        .and(body_json(json!({"check": "check-cpu"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"issued": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server)?;
    let response = client
        .post(
            "/api/core/v2/namespaces/default/checks/check-cpu/execute",
            json!({"check": "check-cpu"}),
        )
        .await?;

    assert_eq!(response.status(), 202);
    let body: serde_json::Value = response.json()?;
    assert_eq!(body["issued"], 1);

    Ok(())
}
