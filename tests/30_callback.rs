mod common;

use anyhow::Result;
use axum::http::StatusCode;
use notion_bridge::auth::OAuthState;
use notion_bridge::services;

fn callback_uri(path: &str, code: &str, state: &OAuthState) -> String {
    let encoded: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("code", code)
        .append_pair("state", &state.encode().expect("state encodes"))
        .finish();
    format!("{}?{}", path, encoded)
}

#[tokio::test]
async fn oauth_error_redirects_to_frontend() -> Result<()> {
    let state = common::offline_state(common::test_config(&[]));
    let res = common::get_uri(state, "/callback?error=access_denied").await?;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), "http://localhost:5173/notion/error?message=access_denied");
    Ok(())
}

#[tokio::test]
async fn missing_code_redirects_to_frontend() -> Result<()> {
    let state = common::offline_state(common::test_config(&[]));
    let res = common::get_uri(state, "/notion/callback?state=abc").await?;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(
        res.location(),
        "http://localhost:5173/notion/error?message=No+authorization+code+received"
    );
    Ok(())
}

#[tokio::test]
async fn malformed_query_still_redirects() -> Result<()> {
    let state = common::offline_state(common::test_config(&[]));
    let res = common::get_uri(state, "/callback?code=a&code=b").await?;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(
        res.location(),
        "http://localhost:5173/notion/error?message=Invalid+callback+parameters"
    );
    Ok(())
}

#[tokio::test]
async fn rejected_code_redirects_with_notion_message() -> Result<()> {
    let base = common::spawn_fake_notion().await?;
    let config = common::test_config(&[("NOTION_API_BASE_URL", base.as_str())]);
    let state = common::offline_state(config);

    let oauth_state = OAuthState::new("user_1", "http://localhost:3000");
    let res = common::get_uri(state, &callback_uri("/callback", "stale-code", &oauth_state)).await?;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), "http://localhost:3000/notion/error?message=Invalid+code.");
    Ok(())
}

#[tokio::test]
async fn failed_exchange_without_body_redirects_with_status() -> Result<()> {
    let base = common::spawn_fake_notion().await?;
    let config = common::test_config(&[("NOTION_API_BASE_URL", base.as_str())]);
    let state = common::offline_state(config);

    let oauth_state = OAuthState::new("user_1", "");
    let res = common::get_uri(state, &callback_uri("/callback", common::BROKEN_CODE, &oauth_state)).await?;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(
        res.location(),
        "http://localhost:5173/notion/error?message=Failed+to+exchange+code+for+token+%28HTTP+500%29"
    );
    Ok(())
}

#[tokio::test]
async fn refused_lookup_falls_back_to_default_workspace_name() -> Result<()> {
    let base = common::spawn_fake_notion().await?;
    let config = common::test_config(&[
        ("NOTION_API_BASE_URL", base.as_str()),
        ("DEFAULT_WORKSPACE_NAME", "My Workspace"),
    ]);
    let state = common::offline_state(config);

    let token = state.notion.exchange_code(common::REVOKED_CODE).await?;
    assert_eq!(token.access_token, common::REVOKED_TOKEN);
    assert_eq!(services::workspace_name(&state, &token).await, "My Workspace");

    let named = state.notion.exchange_code(common::GOOD_CODE).await?;
    assert_eq!(services::workspace_name(&state, &named).await, "Acme HQ");
    Ok(())
}

#[tokio::test]
async fn database_failure_redirects_with_generic_message() -> Result<()> {
    let base = common::spawn_fake_notion().await?;
    let config = common::test_config(&[("NOTION_API_BASE_URL", base.as_str())]);
    let state = common::offline_state(config);

    let oauth_state = OAuthState::new("user_1", "");
    let res = common::get_uri(state, &callback_uri("/api/notion/callback", common::GOOD_CODE, &oauth_state)).await?;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    let location = res.location();
    assert!(location.starts_with("http://localhost:5173/notion/error?message="), "{}", location);
    assert!(location.contains("Database"), "{}", location);
    assert!(!location.contains(common::ACCESS_TOKEN));
    Ok(())
}

#[tokio::test]
async fn successful_callback_stores_connection() -> Result<()> {
    let Some(pool) = common::database_pool().await else {
        return Ok(());
    };
    let base = common::spawn_fake_notion().await?;
    let config = common::test_config(&[("NOTION_API_BASE_URL", base.as_str())]);
    let state = common::state_with_pool(config, pool);
    let user = common::unique_user();

    let oauth_state = OAuthState::new(user.as_str(), "http://127.0.0.1:3000/");
    let res = common::get_uri(state.clone(), &callback_uri("/callback", common::GOOD_CODE, &oauth_state)).await?;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), "http://127.0.0.1:3000/notion/connected?success=true");

    // Name missing from the token response comes from users/me
    let res = common::get_uri(state.clone(), &callback_uri("/callback", common::NAMELESS_CODE, &oauth_state)).await?;
    assert_eq!(res.location(), "http://127.0.0.1:3000/notion/connected?success=true");

    let rows = state.connections().list_for_user(&user).await?;
    assert_eq!(rows.len(), 2);
    let acme = rows.iter().find(|c| c.workspace_id == "ws-1").expect("ws-1 row");
    assert_eq!(acme.workspace_name.as_deref(), Some("Acme HQ"));
    assert_eq!(acme.access_token, common::ACCESS_TOKEN);
    assert_eq!(acme.refresh_token, "");
    assert_eq!(acme.bot_id.as_deref(), Some("bot-1"));
    let looked_up = rows.iter().find(|c| c.workspace_id == "ws-2").expect("ws-2 row");
    assert_eq!(looked_up.workspace_name.as_deref(), Some("Looked Up Workspace"));

    // users/me refusing the token still stores the connection under the default name
    let saved = services::complete_authorization(&state, common::REVOKED_CODE, &user).await?;
    assert_eq!(saved.workspace_name.as_deref(), Some("Notion Workspace"));
    assert_eq!(state.connections().list_for_user(&user).await?.len(), 3);

    // Authorizing the same workspace again keeps a single row
    common::get_uri(state.clone(), &callback_uri("/callback", common::GOOD_CODE, &oauth_state)).await?;
    assert_eq!(state.connections().list_for_user(&user).await?.len(), 3);
    Ok(())
}
