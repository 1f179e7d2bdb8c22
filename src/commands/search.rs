use std::path::PathBuf;

use anyhow::{Context, Result};
use moneybear::{
    client::{ClientMode, ProxyClient, SearchController, SessionState},
    config::{Config, SearchMode},
    types::SearchResultItem,
    upload::UploadedImage,
    util::truncate_for_display,
};
use serde::Serialize;
use tracing::info;

/// Options for `moneybear search`
pub struct SearchArgs {
    pub image: PathBuf,
    pub server: Option<String>,
    pub caption: Option<String>,
    pub pages: u32,
    pub mode: Option<SearchMode>,
    pub json: bool,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    caption: Option<&'a str>,
    results: &'a [SearchResultItem],
}

/// Search a running server with a local image file
pub async fn search_image(config: Config, args: SearchArgs) -> Result<()> {
    let mode = match args.mode.unwrap_or(config.search.mode) {
        SearchMode::Passthrough => ClientMode::Passthrough,
        SearchMode::Catalog => ClientMode::Catalog,
    };
    let server = args
        .server
        .unwrap_or_else(|| format!("http://{}", config.server.listen_addr));

    let image = UploadedImage::from_path(&args.image)
        .with_context(|| format!("Failed to read {}", args.image.display()))?;

    let client = ProxyClient::new(&server)?;
    info!("Searching {} with {}", client.search_url(), args.image.display());

    let mut controller = SearchController::new(client, mode);
    controller.select_image(image)?;
    controller.search().await;
    check_failed(controller.session().state())?;

    if let Some(caption) = args.caption {
        if mode == ClientMode::Passthrough && controller.edit_caption(caption) {
            controller.submit_caption().await;
        }
    }

    let mut loaded = 1;
    while loaded < args.pages && controller.load_more().await {
        loaded += 1;
        if let Some(notice) = controller.session().results_view().and_then(|v| v.notice()) {
            anyhow::bail!("Loading page {} failed: {}", loaded, notice);
        }
    }

    let session = controller.session();
    if args.json {
        let output = SearchOutput {
            caption: session.caption().map(|c| c.received()),
            results: session.results(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(caption) = session.caption() {
        println!("Caption: {}", caption.received());
    }
    if let Some(headline) = session.headline() {
        println!("{}", headline);
        println!();
    }
    for (i, item) in session.results().iter().enumerate() {
        println!("{}. {} ({})", i + 1, truncate_for_display(&item.title, 60), item.price);
        if !item.url.is_empty() {
            println!("   {}", item.url);
        }
    }
    if let Some(status) = session.status_message() {
        println!();
        println!("{}", status);
    }

    Ok(())
}

fn check_failed(state: &SessionState) -> Result<()> {
    match state {
        SessionState::Failed { message } => anyhow::bail!("{}", message),
        _ => Ok(()),
    }
}
