//! Rendering of complete form states.

use indoc::indoc;
use serde_json::json;

use helm_values_builder::serialize;
use helm_values_builder::store::ValuesStore;
use helm_values_builder::values::{default_values, mapping_from_json, Mapping, Section};

#[test]
fn test_default_document() {
    let expected = indoc! {"
        image:
          repository: registry.kestra.io/docker/kestra-ee
          tag: latest
          pullPolicy: IfNotPresent
        configuration:
          datasources:
            postgres:
              driverClassName: org.postgresql.Driver
          kestra:
            queue:
              type: postgres
            repository:
              type: postgres
        deployments:
          webserver:
            enabled: true
          executor:
            enabled: false
          worker:
            enabled: false
          scheduler:
            enabled: false
          standalone:
            enabled: false
        postgresql:
          enabled: false
        minio:
          enabled: false"};
    assert_eq!(serialize(&default_values()), expected);
}

#[test]
fn test_filled_form() {
    let store = ValuesStore::new(default_values());
    store.update("image.tag", "0.19.0".into()).unwrap();
    store.update("imagePullSecrets.name", "reg-secret".into()).unwrap();
    store
        .update(
            "configuration.datasources.postgres.uri",
            "jdbc:postgresql://db:5432/kestra".into(),
        )
        .unwrap();
    store
        .update(
            "configuration.datasources.postgres.options",
            "maximumPoolSize: 10\nminimumIdle: 2".into(),
        )
        .unwrap();
    store
        .update("configuration.kestra.secrets.type", "aws".into())
        .unwrap();
    store
        .update(
            "configuration.kestra.secrets.aws",
            "accessKeyId: AKIA\nregion: eu-west-1".into(),
        )
        .unwrap();
    store
        .update("configuration.kestra.secrets.vault", "address: http://vault".into())
        .unwrap();
    store.update("configuration.oidcEnabled", true.into()).unwrap();
    store.update("deployments.webserver.enabled", false.into()).unwrap();
    store.update("deployments.standalone.enabled", true.into()).unwrap();

    let rendered = store.render();

    assert!(rendered.contains(indoc! {r#"
        image:
          repository: registry.kestra.io/docker/kestra-ee
          tag: 0.19.0
          pullPolicy: IfNotPresent
        imagePullSecrets:
          - name: reg-secret
        configuration:
          datasources:
            postgres:
              driverClassName: org.postgresql.Driver
              uri: "jdbc:postgresql://db:5432/kestra"
              maximumPoolSize: 10
              minimumIdle: 2
          kestra:
            secrets:
              type: aws
              aws:
                accessKeyId: AKIA
                region: eu-west-1
            queue:"#}));
    assert!(!rendered.contains("vault"));
    assert!(!rendered.contains("oidcEnabled"));
    assert!(rendered.contains("  webserver:\n    enabled: false"));
    assert!(rendered.contains("  standalone:\n    enabled: true"));
}

#[test]
fn test_sso_block_and_reset() {
    let client = mapping_from_json(json!({
        "providerName": "keycloak",
        "clientId": "kestra",
        "clientSecret": "s3cr3t",
        "issuer": "https://auth.example.com/realms/kestra"
    }));

    let mut root = Mapping::new();
    root.insert("micronaut".to_string(), client.clone().into());
    assert_eq!(
        serialize(&root),
        indoc! {r#"
            micronaut:
              security:
                oauth2:
                  enabled: true
                  clients:
                    keycloak:
                      client-id: kestra
                      client-secret: s3cr3t
                      openid:
                        issuer: "https://auth.example.com/realms/kestra""#}
    );

    let store = ValuesStore::new(default_values());
    store
        .update("configuration.micronaut", client.into())
        .unwrap();
    assert!(store.render().contains("\n  micronaut:\n    security:\n"));

    store.reset(Section::Sso);
    assert!(!store.render().contains("micronaut"));
}

#[test]
fn test_storage_mapping_payload() {
    let values = mapping_from_json(json!({
        "configuration": {
            "kestra": {
                "storage": {
                    "type": "gcs",
                    "gcs": {"bucket": "kestra-data", "project-id": ""},
                    "s3": {"bucket": "unused"}
                }
            }
        }
    }));
    assert_eq!(
        serialize(&values),
        indoc! {"
            configuration:
              kestra:
                storage:
                  type: gcs
                  gcs:
                    bucket: kestra-data"}
    );
}
