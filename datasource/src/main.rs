//! Datasource Lambda - Serves GET /{datatype} from the upstream event API.

use std::sync::Arc;

use datasource::{handler, AppState};
use lambda_http::{run, service_fn, Error};
use shared::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    shared::logging::init();

    let config = Config::from_env()?;
    let state = Arc::new(AppState::new(&config)?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
