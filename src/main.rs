use stayhub_client::cache::keys;
use stayhub_client::models::ListingSearch;
use stayhub_client::session::FileTokenStore;
use stayhub_client::{ApiClient, AppConfig, RequestCache, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    info!("🏠 StayHub client");
    info!("API: {}", config.api_base_url);

    let api = ApiClient::new(&config.api_base_url)?;
    let cache = RequestCache::new();
    let session = Session::initialize(
        api.clone(),
        Box::new(FileTokenStore::new(&config.token_file)),
    )
    .await;

    match session.current_user() {
        Some(user) => info!("Signed in as {} ({})", user.username, user.email),
        None => info!("Browsing anonymously"),
    }

    // Browse the marketplace and display what's available.
    let search = ListingSearch::default();
    let listings = cache
        .fetch(&keys::listing_search(&search), || {
            api.search_listings(&search)
        })
        .await?;

    info!("Found {} listings\n", listings.len());

    for (i, listing) in listings.iter().enumerate() {
        println!(
            "{}. {} (${}/night)",
            i + 1,
            listing.title,
            listing.price_per_night
        );
        println!(
            "   {} guests, {} bedrooms, {} bathrooms",
            listing.max_guests, listing.bedrooms, listing.bathrooms
        );
        println!("   {}", listing.location);
        if let Some(amenities) = &listing.amenities {
            if !amenities.is_empty() {
                println!("   Amenities: {}", amenities.join(", "));
            }
        }
        println!();
    }

    Ok(())
}
