//! Minimal terminal front end over the same session state the browser uses.
//! Type a title to search, a card number to open it, `close` to dismiss the
//! overlay, `/` to press the search icon, `scroll <y>` to move the page and
//! `quit` to leave. Requires OMDB_API_KEY (.env supported).

use anyhow::Result;
use chrono::Utc;
use cineguide::config::Config;
use cineguide::omdb::{self, OmdbClient};
use cineguide::session::{SearchIconAction, Session};
use cineguide::view::DetailView;
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let config = Config::from_env()?;
    let client = OmdbClient::from_config(&config)?;
    let mut session = Session::new();

    run_search(&mut session, &client, &config.initial_query).await;
    print_results(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => continue,
            "quit" | "exit" => break,
            "close" => {
                session.close();
                print_results(&session);
            }
            _ => {
                if input == "/" {
                    match session.on_search_icon() {
                        SearchIconAction::Expand => println!("Search opened"),
                        SearchIconAction::Collapse => println!("Search closed"),
                        SearchIconAction::Search(term) => {
                            run_search(&mut session, &client, &term).await;
                            print_results(&session);
                        }
                    }
                } else if let Some(raw) = input.strip_prefix("scroll ") {
                    match raw.trim().parse::<f64>() {
                        Ok(y) => {
                            session.on_scroll(y);
                            let nav = session.nav();
                            println!(
                                "navbar: {}{}",
                                if nav.scrolled { "scrolled" } else { "top" },
                                if nav.hidden { ", hidden" } else { "" }
                            );
                        }
                        Err(_) => println!("scroll needs a number"),
                    }
                } else if let Ok(n) = input.parse::<usize>() {
                    let Some(summary) = n
                        .checked_sub(1)
                        .and_then(|i| session.results().get(i))
                        .cloned()
                    else {
                        println!("No card #{n}");
                        continue;
                    };
                    let ticket = session.open(summary);
                    let Some(imdb_id) = session.selected().map(|s| s.imdb_id.clone()) else {
                        continue;
                    };
                    if session.is_detail_loading() {
                        println!("Loading movie info...");
                    }
                    let detail = omdb::detail_or_none(&client, &imdb_id).await;
                    session.apply_detail(ticket, detail);
                    match session.detail_view(Utc::now()) {
                        Some(view) => print_detail(&view),
                        None => {
                            let title = session.selected().map(|s| s.title.as_str()).unwrap_or("");
                            println!("No details available for {title}");
                        }
                    }
                } else {
                    session.set_search_term(input);
                    if session.is_search_expanded() {
                        println!("Searching for {}", session.search_term());
                    }
                    run_search(&mut session, &client, input).await;
                    print_results(&session);
                }
            }
        }
    }
    Ok(())
}

async fn run_search(session: &mut Session, client: &OmdbClient, title: &str) {
    if let Some(ticket) = session.begin_search(title) {
        if session.is_loading() {
            println!("Loading amazing content...");
        }
        let results = omdb::search_or_empty(client, title).await;
        session.apply_search(ticket, results);
    }
}

fn print_results(session: &Session) {
    let cards = session.cards();
    if cards.is_empty() {
        println!("No content found. Try searching for something else.");
        return;
    }
    println!("{}", session.heading());
    for (i, card) in cards.iter().enumerate() {
        let year = card.year.as_deref().unwrap_or("");
        let kind = card.media_type.map(|k| k.as_str()).unwrap_or("");
        println!("{:>3}. {} {} [{}]", i + 1, card.title, year, kind);
    }
}

fn print_detail(view: &DetailView) {
    println!();
    match &view.status {
        Some(status) => println!("{} ({})", view.title, status.label),
        None => println!("{}", view.title),
    }
    let meta: Vec<&str> = [&view.rating, &view.year, &view.runtime, &view.rated]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .collect();
    if !meta.is_empty() {
        println!("{}", meta.join(" | "));
    }
    if let Some(release) = &view.release {
        println!("{} {}", release.caption, release.date);
    }
    if let Some(plot) = &view.plot {
        println!("\n{plot}\n");
    }
    println!("Where to Watch");
    for platform in &view.streaming.platforms {
        let state = if platform.available {
            "Available"
        } else {
            "Not Available"
        };
        println!("  {:<12} {}", platform.name, state);
    }
    println!("  * {}", view.streaming.note);
    if let Some(box_office) = &view.box_office {
        println!("Box Office: {box_office}");
    }
    if let Some(dvd) = &view.dvd {
        println!("DVD Release: {dvd}");
    }
    for fact in &view.facts {
        println!("{}: {}", fact.label, fact.value);
    }
    println!("IMDb:    {}", view.links.imdb);
    println!("Trailer: {}", view.links.trailer);
    println!("Stream:  {}", view.links.streaming_search);
    println!();
}
