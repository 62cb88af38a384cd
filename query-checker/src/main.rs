use clap::Parser;
use findex::FindexClient;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search query text
    #[arg(short, long, default_value = "")]
    query: String,

    /// Result page to request
    #[arg(short, long, default_value_t = 0)]
    page: u32,

    /// Base URL of the engine API
    #[arg(long)]
    api_url: Option<String>,

    /// Print every result the engine returns instead of the first 20
    #[arg(long)]
    all: bool,

    /// Print the normalized search history instead of searching
    #[arg(long)]
    history: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let mut client = FindexClient::new("query-checker");
    if let Some(api_url) = args.api_url {
        client = client.with_base_url(api_url);
    }
    if args.all {
        client = client.with_result_limit(None);
    }

    if args.history {
        for entry in client.get_search_history().await? {
            println!("{}", entry.query);
        }
        return Ok(());
    }

    println!("Searching \"{}\" (page {})...", args.query, args.page);

    let results = client.search(&args.query, args.page).await?;
    if results.is_empty() {
        println!("No results found.");
    }
    for result in results {
        println!("{}", result.title);
        println!("  {}", result.url);
        println!("  {}", result.snippet);
    }

    Ok(())
}
