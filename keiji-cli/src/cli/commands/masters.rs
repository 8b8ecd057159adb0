//! Masters command handler: show the lookup tables

use anyhow::Result;
use colored::*;

use crate::api::SignageClient;
use crate::config::BackendConfig;
use crate::master::MasterData;

pub async fn handle(remote: bool) -> Result<()> {
    let masters = if remote {
        let client = SignageClient::new(&BackendConfig::from_env()?)?;
        client.fetch_masters().await?
    } else {
        MasterData::defaults()
    };

    println!("{}", "Properties".bold());
    for (code, name) in masters.property_list() {
        let terminals = masters.terminals_for(code);
        println!(
            "  {:>8}  {}  ({} terminals, first {})",
            code.to_string().cyan(),
            name,
            terminals.len(),
            terminals.first().map(|t| t.as_str()).unwrap_or("-")
        );
    }

    println!("{}", "Vendors".bold());
    for v in &masters.vendors {
        println!("  {}  {}", v.name, v.emergency_contact.cyan());
    }

    println!("{}", "Inspection notices".bold());
    for n in &masters.inspection_notices {
        let board = if n.show_on_board { "board" } else { "no-board" };
        println!(
            "  [{}] {}  template {} ({})",
            n.category, n.name, n.template_no, board
        );
    }

    println!("{}", "Templates".bold());
    for t in &masters.templates {
        println!("  {:>2}  {}", t.template_no, t.image_file);
    }
    Ok(())
}
