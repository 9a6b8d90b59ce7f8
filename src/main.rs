use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use env_logger::Env;

use lorifier::config::Config;
use lorifier::lore::{self, ListTable};
use lorifier::mail::{self, Message};

fn main() -> Result<()> {
    // Errors go to stderr; stdout carries only the filtered message.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = Config::load();

    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .context("reading message from stdin")?;

    let mut message = Message::parse(&raw)?;

    mail::add_local_date(&mut message);

    let table = if config.use_builtin_table {
        ListTable::builtin()
    } else {
        lore::load_list_table(&config.lists_url, &config.cache_path(), config.cache_ttl())
    };
    if let Some(url) = lore::resolve_link(&message, &table) {
        message.add_header("X-URI", &url);
    }
    message.remove_header("Message-ID");

    io::stdout()
        .write_all(message.to_string().as_bytes())
        .context("writing message to stdout")?;
    Ok(())
}
