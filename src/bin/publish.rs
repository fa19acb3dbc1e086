//! Submits one movie form to the publish endpoint and prints the banner that
//! ends up visible.
//!
//! Usage: `movie-publish title=Alien director="Ridley Scott" year=1979`

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use movie_library::config::AppConfig;
use movie_library::handler::{Banners, Form, FormSubmitHandler, HttpTransport, SubmitEvent};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let form = Arc::new(Form::new("new-movie-form"));
    for arg in std::env::args().skip(1) {
        match arg.split_once('=') {
            Some((name, value)) => form.add_field(name, value).await,
            None => {
                error!("Expected name=value, got '{}'", arg);
                return ExitCode::from(2);
            }
        }
    }

    let banners = Arc::new(Banners::new());
    let handler = FormSubmitHandler::new(
        form,
        banners.clone(),
        config.publish_post_url,
        HttpTransport::new(),
    );
    info!("Publishing form to {}", handler.endpoint());
    handler.on_submit(&mut SubmitEvent::new()).await;

    let state = banners.snapshot().await;
    if state.error.visible {
        eprintln!("error: {}", state.error.message);
        ExitCode::FAILURE
    } else {
        println!("success: {}", state.success.message);
        ExitCode::SUCCESS
    }
}
