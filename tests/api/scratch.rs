use itemhub::routes::Example;

use crate::helpers::spawn_app;

#[tokio::test]
async fn scratch_list_supports_crud_by_position() {
    let app = spawn_app().await;
    let client = &app.api_client;

    for name in ["first", "second"] {
        let response = client
            .post(format!("{}/create_example", app.address))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .unwrap();
        assert_eq!(200, response.status().as_u16());
    }

    let response = app
        .put(
            "/update_example/1",
            &serde_json::json!({ "name": "second", "description": "edited" }),
        )
        .await;
    assert_eq!(200, response.status().as_u16());

    let response = app.delete("/delete_example?id=0").await;
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["ok"], true);

    let examples: Vec<Example> = app.get("/examples").await.json().await.unwrap();
    assert_eq!(
        examples,
        vec![Example {
            name: "second".to_string(),
            description: Some("edited".to_string()),
        }]
    );
}

#[tokio::test]
async fn out_of_range_positions_return_404() {
    let app = spawn_app().await;

    let response = app
        .put("/update_example/3", &serde_json::json!({ "name": "x" }))
        .await;
    assert_eq!(404, response.status().as_u16());

    let response = app.delete("/delete_example?id=0").await;
    assert_eq!(404, response.status().as_u16());
}
