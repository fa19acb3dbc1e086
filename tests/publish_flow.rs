use actix_web::{web, App, HttpServer};
use movie_library::config::AppConfig;
use movie_library::db::{movie_repository::MovieRepository, schema::init_db};
use movie_library::handler::{
    Banners, Form, FormSubmitHandler, HttpTransport, ResponseResult, SubmitEvent, SubmitOutcome,
    TRANSPORT_FAILURE_MESSAGE,
};
use movie_library::routes::{self, movies::PUBLISH_SUCCESS_MESSAGE};
use std::sync::Arc;

fn scratch_db_path() -> String {
    std::env::temp_dir()
        .join(format!("movie-library-flow-{}.db", uuid::Uuid::new_v4().simple()))
        .to_string_lossy()
        .into_owned()
}

fn spawn_app(database_path: &str) -> String {
    let app_config = web::Data::new(AppConfig {
        database_path: database_path.to_string(),
        ..AppConfig::default()
    });
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_config.clone())
            .configure(routes::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}/movies/publish", addr)
}

fn movie_form(title: &str, director: &str, year: &str) -> Arc<Form> {
    Arc::new(Form::with_fields(
        "new-movie-form",
        [("title", title), ("director", director), ("year", year)],
    ))
}

#[actix_web::test]
async fn valid_movie_shows_success_and_is_stored() {
    let db_path = scratch_db_path();
    let endpoint = spawn_app(&db_path);
    let banners = Arc::new(Banners::new());
    let handler = FormSubmitHandler::new(
        movie_form("Alien", "Ridley Scott", "1979"),
        banners.clone(),
        endpoint,
        HttpTransport::new(),
    );

    let mut event = SubmitEvent::new();
    let outcome = handler.on_submit(&mut event).await;

    assert!(event.is_default_prevented());
    assert_eq!(
        outcome,
        SubmitOutcome::Completed(ResponseResult::Success {
            message: PUBLISH_SUCCESS_MESSAGE.to_string()
        })
    );
    let state = banners.snapshot().await;
    assert!(state.success.visible);
    assert_eq!(state.success.message, PUBLISH_SUCCESS_MESSAGE);
    assert!(!state.error.visible);

    let movies = MovieRepository::new(init_db(&db_path).unwrap())
        .get_all_movies()
        .unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Alien");
    let _ = std::fs::remove_file(db_path);
}

#[actix_web::test]
async fn rejected_movie_shows_server_message() {
    let db_path = scratch_db_path();
    let endpoint = spawn_app(&db_path);
    let banners = Arc::new(Banners::new());
    let handler = FormSubmitHandler::new(
        movie_form("", "Ridley Scott", "1979"),
        banners.clone(),
        endpoint,
        HttpTransport::new(),
    );

    handler.on_submit(&mut SubmitEvent::new()).await;

    let state = banners.snapshot().await;
    assert!(state.error.visible);
    assert_eq!(state.error.message, "Add a valid movie title");
    assert!(!state.success.visible);
    let _ = std::fs::remove_file(db_path);
}

#[actix_web::test]
async fn fixing_the_form_swaps_the_banners() {
    let db_path = scratch_db_path();
    let endpoint = spawn_app(&db_path);
    let form = movie_form("Alien", "Ridley Scott", "1800");
    let banners = Arc::new(Banners::new());
    let handler =
        FormSubmitHandler::new(form.clone(), banners.clone(), endpoint, HttpTransport::new());

    handler.on_submit(&mut SubmitEvent::new()).await;
    let state = banners.snapshot().await;
    assert!(state.error.visible);
    assert!(state.error.message.starts_with("Year must be between 1900 and "));

    form.set_value("year", "1979").await;
    handler.on_submit(&mut SubmitEvent::new()).await;
    let state = banners.snapshot().await;
    assert!(state.success.visible);
    assert!(!state.error.visible);
    let _ = std::fs::remove_file(db_path);
}

#[actix_web::test]
async fn unreachable_endpoint_shows_fallback_message() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let banners = Arc::new(Banners::new());
    let handler = FormSubmitHandler::new(
        movie_form("Alien", "Ridley Scott", "1979"),
        banners.clone(),
        format!("http://127.0.0.1:{}/movies/publish", port),
        HttpTransport::new(),
    );

    handler.on_submit(&mut SubmitEvent::new()).await;

    let state = banners.snapshot().await;
    assert!(state.error.visible);
    assert_eq!(state.error.message, TRANSPORT_FAILURE_MESSAGE);
    assert!(!state.success.visible);
}
