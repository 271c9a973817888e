use std::{net::TcpListener, sync::Arc, time::Duration};

use actix_web::{
    dev::Server,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    authentication::{JwtMiddleware, JwtService},
    configuration::{DatabaseSettings, Settings},
    crud::CrudService,
    repository::{PgRepository, Repository},
    routes::{
        create_example, create_item_for_user, create_user, delete_example, delete_item,
        delete_user, get_item, get_user, list_examples, list_items, list_items_for_user,
        list_users, login, refresh_token, update_example, update_item, update_user, ScratchList,
    },
    utils::extractor_error,
};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Connects to Postgres, applies pending migrations and binds the listener.
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        sqlx::migrate!("./migrations")
            .run(&connection_pool)
            .await
            .context("Failed to migrate the database.")?;

        let repository: Arc<dyn Repository> = Arc::new(PgRepository::new(connection_pool));
        Self::build_with_repository(configuration, repository)
    }

    pub fn build_with_repository(
        configuration: Settings,
        repository: Arc<dyn Repository>,
    ) -> Result<Self, anyhow::Error> {
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {address}."))?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            repository,
            JwtService::new(&configuration.jwt),
            configuration.application.base_url,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(configuration.connect_options())
}

/// Public URL prefix used in `Location` headers.
pub struct ApplicationBaseUrl(pub String);

pub fn run(
    listener: TcpListener,
    repository: Arc<dyn Repository>,
    jwt: JwtService,
    base_url: String,
) -> Result<Server, anyhow::Error> {
    let crud = Data::new(CrudService::new(repository.clone()));
    let repository: Data<dyn Repository> = Data::from(repository);
    let jwt = Data::new(jwt);
    let base_url = Data::new(ApplicationBaseUrl(base_url));
    let scratch = Data::new(ScratchList::default());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .route("/token", web::post().to(login))
            .route("/token/refresh", web::post().to(refresh_token))
            .service(
                web::scope("/users")
                    .service(
                        web::scope("/{user_id}/items")
                            .wrap(JwtMiddleware::new())
                            .route("/", web::post().to(create_item_for_user))
                            .route("/", web::get().to(list_items_for_user)),
                    )
                    .route("/", web::post().to(create_user))
                    .route("/", web::get().to(list_users))
                    .route("/{user_id}", web::get().to(get_user))
                    .route("/{user_id}", web::put().to(update_user))
                    .route("/{user_id}", web::delete().to(delete_user)),
            )
            .service(
                web::scope("/items")
                    .route("/", web::get().to(list_items))
                    .route("/{item_id}", web::get().to(get_item))
                    .route("/{item_id}", web::put().to(update_item))
                    .route("/{item_id}", web::delete().to(delete_item)),
            )
            .route("/examples", web::get().to(list_examples))
            .route("/create_example", web::post().to(create_example))
            .route("/update_example/{id}", web::put().to(update_example))
            .route("/delete_example", web::delete().to(delete_example))
            .app_data(web::JsonConfig::default().error_handler(extractor_error))
            .app_data(web::FormConfig::default().error_handler(extractor_error))
            .app_data(web::QueryConfig::default().error_handler(extractor_error))
            .app_data(web::PathConfig::default().error_handler(extractor_error))
            .app_data(crud.clone())
            .app_data(repository.clone())
            .app_data(jwt.clone())
            .app_data(base_url.clone())
            .app_data(scratch.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
