use itemhub::routes::ItemResponse;

use crate::helpers::{jwt_with_lifetimes, spawn_app};

#[tokio::test]
async fn owner_can_create_and_list_their_items() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    let tokens = app.login(&a).await;

    let response = app
        .post_item(
            a.id,
            Some(&tokens.access_token),
            &serde_json::json!({ "title": "Book" }),
        )
        .await;
    assert_eq!(201, response.status().as_u16());
    let created: ItemResponse = response.json().await.unwrap();
    assert_eq!(created.owner_id, a.id);

    let response = app.get_user_items(a.id, Some(&tokens.access_token)).await;
    assert_eq!(200, response.status().as_u16());
    let items: Vec<ItemResponse> = response.json().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Book");
}

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;

    let create = app
        .post_item(a.id, None, &serde_json::json!({ "title": "Book" }))
        .await;
    let list = app.get_user_items(a.id, None).await;

    assert_eq!(401, create.status().as_u16());
    assert_eq!(401, list.status().as_u16());
}

#[tokio::test]
async fn protected_routes_reject_garbage_token() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;

    let response = app.get_user_items(a.id, Some("not-a-token")).await;

    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    let user = app.stored_user(a.id).await;
    let expired = jwt_with_lifetimes(&app.jwt_settings, -5)
        .issue_tokens(&user)
        .unwrap()
        .access_token;

    let response = app.get_user_items(a.id, Some(&expired)).await;

    assert_eq!(401, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorized: Token has expired");
}

#[tokio::test]
async fn cannot_act_on_behalf_of_another_user() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    let b = app.create_user("b@x.com", "pw1").await;
    let tokens = app.login(&a).await;

    let response = app
        .post_item(
            b.id,
            Some(&tokens.access_token),
            &serde_json::json!({ "title": "Book" }),
        )
        .await;
    assert_eq!(403, response.status().as_u16());

    let response = app.get_user_items(b.id, Some(&tokens.access_token)).await;
    assert_eq!(403, response.status().as_u16());

    let items: Vec<ItemResponse> = app.get("/items/").await.json().await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn inactive_user_gets_400_on_protected_routes() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    let tokens = app.login(&a).await;
    app.put(
        &format!("/users/{}", a.id),
        &serde_json::json!({ "is_active": false }),
    )
    .await;

    let response = app.get_user_items(a.id, Some(&tokens.access_token)).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Inactive user");
}

#[tokio::test]
async fn updated_item_is_returned_on_next_fetch() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    let b = app.create_user("b@x.com", "pw1").await;
    let tokens = app.login(&a).await;
    let created: ItemResponse = app
        .post_item(
            a.id,
            Some(&tokens.access_token),
            &serde_json::json!({ "title": "Book", "description": "Hardcover" }),
        )
        .await
        .json()
        .await
        .unwrap();
    assert!(created.updated_at.is_none());

    let response = app
        .put(
            &format!("/items/{}", created.id),
            &serde_json::json!({ "title": "Novel", "description": "Paperback", "owner_id": b.id }),
        )
        .await;
    assert_eq!(200, response.status().as_u16());

    let fetched: ItemResponse = app
        .get(&format!("/items/{}", created.id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched.title, "Novel");
    assert_eq!(fetched.description.as_deref(), Some("Paperback"));
    assert_eq!(fetched.owner_id, b.id);
    assert!(fetched.updated_at.is_some());
}

#[tokio::test]
async fn updating_missing_item_or_owner_returns_404() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    let tokens = app.login(&a).await;
    let created: ItemResponse = app
        .post_item(
            a.id,
            Some(&tokens.access_token),
            &serde_json::json!({ "title": "Book" }),
        )
        .await
        .json()
        .await
        .unwrap();

    let missing_item = app
        .put(
            "/items/999",
            &serde_json::json!({ "title": "x", "owner_id": a.id }),
        )
        .await;
    let missing_owner = app
        .put(
            &format!("/items/{}", created.id),
            &serde_json::json!({ "title": "x", "owner_id": 999 }),
        )
        .await;

    assert_eq!(404, missing_item.status().as_u16());
    assert_eq!(404, missing_owner.status().as_u16());
}

#[tokio::test]
async fn soft_deleted_item_leaves_listings_but_stays_fetchable() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    let tokens = app.login(&a).await;
    let mut ids = Vec::new();
    for title in ["Book", "Pen"] {
        let item: ItemResponse = app
            .post_item(
                a.id,
                Some(&tokens.access_token),
                &serde_json::json!({ "title": title }),
            )
            .await
            .json()
            .await
            .unwrap();
        ids.push(item.id);
    }

    let response = app.delete(&format!("/items/{}", ids[0])).await;
    assert_eq!(200, response.status().as_u16());

    let listed: Vec<ItemResponse> = app.get("/items/").await.json().await.unwrap();
    assert_eq!(listed.iter().map(|i| i.id).collect::<Vec<_>>(), vec![ids[1]]);
    let owned: Vec<ItemResponse> = app
        .get_user_items(a.id, Some(&tokens.access_token))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(owned.len(), 1);

    let response = app.get(&format!("/items/{}", ids[0])).await;
    assert_eq!(200, response.status().as_u16());
    let fetched: ItemResponse = response.json().await.unwrap();
    assert!(fetched.discarded_at.is_some());
}

#[tokio::test]
async fn user_response_embeds_active_items() {
    let app = spawn_app().await;
    let a = app.create_user("a@x.com", "pw1").await;
    let tokens = app.login(&a).await;
    app.post_item(
        a.id,
        Some(&tokens.access_token),
        &serde_json::json!({ "title": "Book" }),
    )
    .await;

    let user: itemhub::routes::UserResponse = app
        .get(&format!("/users/{}", a.id))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(user.items.len(), 1);
    assert_eq!(user.items[0].title, "Book");
}

#[tokio::test]
async fn missing_item_returns_404() {
    let app = spawn_app().await;

    assert_eq!(404, app.get("/items/7").await.status().as_u16());
    assert_eq!(404, app.delete("/items/7").await.status().as_u16());
}
