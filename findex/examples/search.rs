use findex::FindexClient;

// Search the locally running engine and print the first page of hits
#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let results = FindexClient::new("findex-examples")
        .search("rust", 0)
        .await
        .unwrap();
    for result in results {
        println!("{} <{}>", result.title, result.url);
    }
}
