use findex::FindexClient;

// Print the engine's normalized search history
#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let history = FindexClient::new("findex-examples")
        .get_search_history()
        .await
        .unwrap();
    for entry in history {
        println!("{}", entry.query);
    }
}
