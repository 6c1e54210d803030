use walks_backend::api::serve;
use walks_backend::config::Config;
use walks_backend::external::MapQuest;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = Config::env();
    let port = config.listen_port;

    serve(MapQuest::new(config), port).await;
}
