use std::io::{self, Write};

use color_eyre::eyre::Result;
use owo_colors::OwoColorize;
use zaplist_worker::{ChatEntry, Config, JidKind, ZaplistWorker, user_notification};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .from_env_lossy()
                .add_directive("zaplist_cli=info".parse().unwrap())
                .add_directive("zaplist_worker=info".parse().unwrap())
                .add_directive("zaplist_db=info".parse().unwrap()),
        )
        .init();

    let mut config = Config::load();
    let mut worker = ZaplistWorker::new(&config)?;
    let mut entries: Vec<ChatEntry> = Vec::new();

    loop {
        print_menu(&config);
        let choice = read_line("Choice: ")?;

        match choice.trim() {
            "1" => entries = refresh(&worker).await,
            "2" => search(&entries)?,
            "3" => show_deep_link(&entries)?,
            "4" => {
                config.include_groups = !config.include_groups;
                worker = ZaplistWorker::new(&config)?;
                entries.clear();
                println!("🔁 Groups {}. Refresh to reload.", on_off(config.include_groups));
            }
            "0" => {
                println!("👋 Bye");
                break;
            }
            _ => println!("❌ Invalid choice"),
        }
    }

    Ok(())
}

fn print_menu(config: &Config) {
    println!();
    println!("╔════════════════════════════════════╗");
    println!("║        ZAPLIST - WhatsApp          ║");
    println!("╠════════════════════════════════════╣");
    println!("║  1. Refresh chat list              ║");
    println!("║  2. Search chats                   ║");
    println!("║  3. Show deep link                 ║");
    println!("║  4. Toggle groups ({:<3})           ║", on_off(config.include_groups));
    println!("║  0. Exit                           ║");
    println!("╚════════════════════════════════════╝");
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

async fn refresh(worker: &ZaplistWorker) -> Vec<ChatEntry> {
    match worker.refresh().await {
        Ok(entries) => {
            if entries.is_empty() {
                println!("📭 No chats found");
            } else {
                println!("\n💬 Chats ({}):", entries.len());
                print_entries(&entries);
            }
            entries
        }
        Err(e) => {
            println!("❌ {}", user_notification(&e).red());
            Vec::new()
        }
    }
}

fn search(entries: &[ChatEntry]) -> Result<()> {
    if entries.is_empty() {
        println!("📭 Nothing loaded yet, refresh first");
        return Ok(());
    }

    let query = read_line("Search: ")?;
    let hits = ZaplistWorker::filter(entries, &query);
    if hits.is_empty() {
        println!("📭 No match for '{}'", query);
    } else {
        println!("\n🔍 Matches ({}):", hits.len());
        let hits: Vec<ChatEntry> = hits.into_iter().cloned().collect();
        print_entries(&hits);
    }
    Ok(())
}

fn show_deep_link(entries: &[ChatEntry]) -> Result<()> {
    if entries.is_empty() {
        println!("📭 Nothing loaded yet, refresh first");
        return Ok(());
    }

    let input = read_line("Chat number: ")?;
    let Ok(index) = input.trim().parse::<usize>() else {
        println!("❌ Not a number");
        return Ok(());
    };
    let Some(entry) = index.checked_sub(1).and_then(|i| entries.get(i)) else {
        println!("❌ No chat #{}", input.trim());
        return Ok(());
    };

    match entry.deep_link() {
        Some(link) => println!("🔗 {}", link.cyan()),
        None => println!("🚫 {} has no phone number to dial", entry.display_name),
    }
    Ok(())
}

fn print_entries(entries: &[ChatEntry]) {
    for (i, entry) in entries.iter().enumerate().take(20) {
        let icon = match entry.kind {
            JidKind::Group => "👥",
            _ => "📱",
        };
        let when = entry
            .last_message
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "  {:>3}. {} {} {} {}",
            i + 1,
            icon,
            entry.display_name.bold(),
            entry
                .display_phone()
                .map(|p| format!("({p})"))
                .unwrap_or_default()
                .cyan(),
            when.dimmed(),
        );
        if let Some(ref preview) = entry.preview {
            let short: String = preview.chars().take(60).collect();
            let ellipsis = if preview.chars().count() > 60 { "..." } else { "" };
            println!("       {}{}", short.dimmed(), ellipsis.dimmed());
        }
    }
    if entries.len() > 20 {
        println!("  ... and {} more", entries.len() - 20);
    }
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
