use super::*;
use crate::error::FetchFailureKind;

#[test]
fn default_settings_use_ten_second_timeout_and_browser_agent() {
    let settings = ClientSettings::default();
    assert_eq!(settings.timeout_secs, 10);
    assert!(settings.user_agent.starts_with("Mozilla/5.0"));
}

#[test]
fn client_builds_with_default_settings() {
    assert!(CatalogClient::new(&ClientSettings::default()).is_ok());
}

#[tokio::test]
async fn unparseable_url_is_classified_as_other() {
    let client = CatalogClient::new(&ClientSettings::default()).unwrap();
    let err = client.try_fetch_page("not a url").await.unwrap_err();
    assert_eq!(err.fetch_kind(), Some(FetchFailureKind::Other));
}

#[tokio::test]
async fn fetch_page_swallows_failures() {
    let client = CatalogClient::new(&ClientSettings::default()).unwrap();
    assert!(client.fetch_page("not a url").await.is_none());
}

#[tokio::test]
async fn refused_connection_is_classified_as_transport() {
    let client = CatalogClient::new(&ClientSettings {
        timeout_secs: 2,
        ..ClientSettings::default()
    })
    .unwrap();
    // Port 9 (discard) on loopback is closed in test environments.
    let err = client
        .try_fetch_page("http://127.0.0.1:9/")
        .await
        .unwrap_err();
    assert_eq!(err.fetch_kind(), Some(FetchFailureKind::Transport));
}
