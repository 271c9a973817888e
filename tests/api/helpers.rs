use std::sync::Arc;

use itemhub::authentication::JwtService;
use itemhub::configuration::{get_configuration, JwtSettings};
use itemhub::domain::User;
use itemhub::repository::{InMemoryRepository, Repository};
use itemhub::routes::{TokenResponse, UserResponse};
use itemhub::startup::Application;
use itemhub::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to install the test subscriber");
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to install the test subscriber");
    };
});

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_settings: JwtSettings,
    pub repository: Arc<InMemoryRepository>,
}

pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub password: String,
}

impl TestApp {
    pub async fn post_user(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/users/", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_token(&self, username: &str, password: &str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/token", self.address))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_refresh(&self, refresh_token: &str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/token/refresh", self.address))
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_item(
        &self,
        user_id: i64,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        let mut request = self
            .api_client
            .post(format!("{}/users/{}/items/", self.address, user_id))
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn get_user_items(&self, user_id: i64, token: Option<&str>) -> reqwest::Response {
        let mut request = self
            .api_client
            .get(format!("{}/users/{}/items/", self.address, user_id));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn create_user(&self, email: &str, password: &str) -> TestUser {
        let response = self
            .post_user(&serde_json::json!({ "email": email, "password": password }))
            .await;
        assert_eq!(201, response.status().as_u16());
        let user: UserResponse = response.json().await.expect("Invalid user body");
        TestUser {
            id: user.id,
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    pub async fn login(&self, user: &TestUser) -> TokenResponse {
        let response = self.post_token(&user.email, &user.password).await;
        assert_eq!(200, response.status().as_u16());
        response.json().await.expect("Invalid token body")
    }

    /// Looks a user up behind the API, for issuing tokens the API would not.
    pub async fn stored_user(&self, id: i64) -> User {
        self.repository
            .find_user(id)
            .await
            .expect("Failed to query the repository")
            .expect("User does not exist")
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.host = "127.0.0.1".to_string();
        c.application.port = 0;
        c.jwt.secret = "test-secret".to_string();
        c
    };

    let repository = Arc::new(InMemoryRepository::new());
    let application =
        Application::build_with_repository(configuration.clone(), repository.clone())
            .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        api_client: reqwest::Client::new(),
        jwt_settings: configuration.jwt,
        repository,
    }
}

/// A token service sharing the app's key but with its own lifetimes.
pub fn jwt_with_lifetimes(settings: &JwtSettings, access_minutes: i64) -> JwtService {
    JwtService::new(&JwtSettings {
        secret: settings.secret.clone(),
        access_token_expire_minutes: access_minutes,
        refresh_token_expire_minutes: settings.refresh_token_expire_minutes,
    })
}
