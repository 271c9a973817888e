use crate::helpers::spawn_app;

#[tokio::test]
async fn valid_credentials_yield_bearer_tokens() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;

    let tokens = app.login(&a).await;

    assert_eq!(tokens.token_type, "bearer");
    assert!(!tokens.access_token.is_empty());
    assert!(!tokens.refresh_token.is_empty());
    assert_ne!(tokens.access_token, tokens.refresh_token);
    assert_eq!(tokens.user.id, a.id);
    assert_eq!(tokens.user.email, "a@x.com");
}

#[tokio::test]
async fn wrong_password_returns_401() {
    let app = spawn_app().await;
    app.create_user("a@x.com", "pw1").await;

    let response = app.post_token("a@x.com", "pw2").await;

    assert_eq!(401, response.status().as_u16());
    assert_eq!(
        response.headers()["www-authenticate"].to_str().unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn unknown_email_returns_401() {
    let app = spawn_app().await;

    let response = app.post_token("nobody@x.com", "pw1").await;

    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn malformed_email_returns_400() {
    let app = spawn_app().await;

    let response = app.post_token("nobody", "pw1").await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn discarded_user_cannot_log_in() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    app.delete(&format!("/users/{}", a.id)).await;

    let response = app.post_token("a@x.com", "pw1").await;

    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn refresh_token_yields_a_new_pair() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    let tokens = app.login(&a).await;

    let response = app.post_refresh(&tokens.refresh_token).await;

    assert_eq!(200, response.status().as_u16());
    let refreshed: itemhub::routes::TokenResponse = response.json().await.unwrap();
    assert_eq!(refreshed.user.id, a.id);
    let items = app
        .get_user_items(a.id, Some(&refreshed.access_token))
        .await;
    assert_eq!(200, items.status().as_u16());
}

#[tokio::test]
async fn access_token_is_not_a_refresh_token() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    let tokens = app.login(&a).await;

    let response = app.post_refresh(&tokens.access_token).await;

    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn inactive_user_cannot_log_in() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    app.put(
        &format!("/users/{}", a.id),
        &serde_json::json!({ "is_active": false }),
    )
    .await;

    let response = app.post_token("a@x.com", "pw1").await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Inactive user");
}

#[tokio::test]
async fn missing_form_field_returns_json_error() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(format!("{}/token", app.address))
        .form(&[("username", "a@x.com")])
        .send()
        .await
        .unwrap();

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
    assert!(body["timestamp"].is_string());
}
