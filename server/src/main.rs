use std::error::Error;
use std::sync::Arc;

use warp::Filter;

use ficha::config::get_variable;
use ficha::routes;
use log::{info, initialize_logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let logger = initialize_logger();

    let port: u16 = get_variable("FICHA_PORT")
        .parse()
        .expect("parse FICHA_PORT as u16");

    info!(logger, "Starting..."; "port" => port);
    let logger = Arc::new(logger);

    let form_route = routes::make_form_route(logger.clone());
    let submission_route = routes::make_submission_route(logger.clone());
    let healthz_route = routes::make_healthz_route();

    let rejection_logger = logger.clone();
    let routes = form_route
        .or(submission_route)
        .or(healthz_route)
        .recover(move |r| routes::format_rejection(rejection_logger.clone(), r));

    let shutdown_logger = logger.clone();
    let (_, server) =
        warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], port), async move {
            tokio::signal::ctrl_c()
                .await
                .expect("listen for shutdown signal");
            info!(shutdown_logger, "Received shutdown signal...");
        });

    server.await;

    info!(logger, "Exiting gracefully...");

    Ok(())
}
