//! Run the query held in an explorer URL, or print the host page when the
//! URL carries none.
//!
//! ```text
//! cargo run --example explore -- explorer.toml "/graphiql?query=%7B%20__typename%20%7D"
//! ```

use graphiql_explorer::{Explorer, ExplorerConfig, MemoryHistory};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("graphiql_explorer=debug,graphiql_explorer_net=debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::new("http://localhost:8080"),
    };
    let url = args.next().unwrap_or_else(|| "/graphiql".to_string());

    let explorer = Explorer::new(config, MemoryHistory::from_url(&url))?;
    if explorer.parameters().query().is_none() {
        println!("{}", explorer.render_page());
        return Ok(());
    }

    let result = explorer.execute_current().await?;
    println!("{result}");
    Ok(())
}
