use clap::Parser;
use recircle::{analyzer, cli, config, dashboard, error, export, media, storage};

use cli::{Cli, Commands, ShopCommands};
use config::Config;
use error::{RecircleError, Result};
use recircle_common::record_reward;
use storage::{Ledger, Registration, ShopItem, ShopStore, UserStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            photo,
            text,
            user,
            output,
            item_cap,
            dry_run,
        } => {
            println!("recircle - sustainability analysis\n");

            let data_dir = config.storage_dir()?;
            let users = UserStore::open(&data_dir)?;
            if !users.exists(&user)? {
                return Err(RecircleError::UnknownUser(user));
            }

            // 1. Prepare input
            println!("[1/3] Preparing input...");
            let input = match (&photo, &text) {
                (Some(path), _) => analyzer::AnalysisInput::Photo(media::load_image(
                    path,
                    config.max_image_size,
                )?),
                (None, Some(description)) => {
                    analyzer::AnalysisInput::Description(description.clone())
                }
                (None, None) => unreachable!("clap requires a photo or --text"),
            };
            println!("✔ input ready\n");

            // 2. Run the three-stage pipeline
            println!("[2/3] Running analysis...");
            let client = analyzer::GeminiClient::new(&config)?;
            let cap = item_cap.unwrap_or(config.item_cap);
            let report = analyzer::run_pipeline(&client, &input, cap, cli.verbose).await?;
            println!("✔ {} item(s) analyzed\n", report.records.len());

            for failure in &report.failures {
                eprintln!(
                    "⚠ {} failed at the {} stage: {}",
                    failure.item_name, failure.stage, failure.reason
                );
            }
            for skipped in &report.skipped {
                println!("- skipped beyond cap: {} (x{})", skipped.name, skipped.quantity);
            }

            // 3. Record results
            println!("[3/3] Recording results...");
            if dry_run {
                println!("- dry run, nothing recorded");
            } else {
                let ledger = Ledger::open(&data_dir)?;
                for record in &report.records {
                    ledger.append(&user, record)?;
                }
                println!("✔ {} record(s) appended for {}", report.records.len(), user);
            }

            for record in &report.records {
                let reward = record_reward(record);
                println!(
                    "  {} ({} x{}): {} -> {:.2} kg CO2 saved, {} points, {} credits (Rs {})",
                    record.item.name,
                    record.item.material,
                    record.item.quantity,
                    record.decision.best_action,
                    record.co2_saved_kg,
                    record.points,
                    reward.credits,
                    reward.cash_inr
                );
            }

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&report)?;
                std::fs::write(&path, json)?;
                println!("✔ report saved: {}", path.display());
            }

            println!("\n✅ analysis complete");
        }

        Commands::Dashboard { user } => {
            let ledger = Ledger::open(&config.storage_dir()?)?;
            let records = ledger.list_by_user(&user)?;
            let totals = dashboard::totals_for(&user, &records);

            println!("recircle - dashboard\n");
            println!("  user:      {}", totals.user_id);
            println!("  analyses:  {}", totals.records);
            println!("  points:    {}", totals.points);
            println!("  CO2 saved: {:.2} kg", totals.co2_saved_kg);
            println!(
                "  credits:   {} (Rs {})",
                totals.reward.credits, totals.reward.cash_inr
            );
        }

        Commands::Leaderboard => {
            let ledger = Ledger::open(&config.storage_dir()?)?;
            let mut totals = Vec::new();
            for user_id in ledger.list_user_ids()? {
                let records = ledger.list_by_user(&user_id)?;
                totals.push(dashboard::totals_for(&user_id, &records));
            }
            let ranked = dashboard::leaderboard(totals);

            println!("recircle - leaderboard\n");
            if ranked.is_empty() {
                println!("No analyses recorded yet.");
            }
            for (rank, totals) in ranked.iter().enumerate() {
                println!(
                    "{:>3}. {:<20} {:>6} pts  {:>8.2} kg CO2",
                    rank + 1,
                    totals.user_id,
                    totals.points,
                    totals.co2_saved_kg
                );
            }
        }

        Commands::Certificate { user, output } => {
            println!("recircle - certificate export\n");

            let data_dir = config.storage_dir()?;
            let users = UserStore::open(&data_dir)?;
            if !users.exists(&user)? {
                return Err(RecircleError::UnknownUser(user));
            }

            let ledger = Ledger::open(&data_dir)?;
            let records = ledger.list_by_user(&user)?;
            let totals = dashboard::totals_for(&user, &records);
            let issue_date = chrono::Local::now().format("%Y-%m-%d").to_string();

            let data = export::CertificateData {
                username: &user,
                total_points: totals.points,
                total_co2_kg: totals.co2_saved_kg,
                issue_date: &issue_date,
            };
            let path = output
                .unwrap_or_else(|| std::path::PathBuf::from(format!("{}-certificate.pdf", user)));
            export::generate_certificate(&data, &path)?;
            println!("✔ certificate saved: {}", path.display());
        }

        Commands::Register { username } => {
            let users = UserStore::open(&config.storage_dir()?)?;
            let password = dialoguer::Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(|e| RecircleError::Auth(format!("password prompt failed: {}", e)))?;

            match users.register(&username, &password)? {
                Registration::Created => println!("✔ user {} registered", username),
                Registration::AlreadyExists => {
                    return Err(RecircleError::Auth(format!(
                        "user {} already exists",
                        username
                    )))
                }
            }
        }

        Commands::Login { username } => {
            let users = UserStore::open(&config.storage_dir()?)?;
            let password = dialoguer::Password::new()
                .with_prompt("Password")
                .interact()
                .map_err(|e| RecircleError::Auth(format!("password prompt failed: {}", e)))?;

            if users.verify(&username, &password)? {
                println!("✔ credentials ok");
            } else {
                return Err(RecircleError::Auth("invalid username or password".into()));
            }
        }

        Commands::Shop { command } => match command {
            ShopCommands::Add {
                seller,
                name,
                description,
                price,
                image,
            } => {
                let shop = ShopStore::open(&config.storage_dir()?)?;
                let item = ShopItem {
                    seller,
                    item_name: name,
                    description,
                    price_inr: price,
                    image_path: image.map(|p| p.display().to_string()),
                    listed_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                };
                shop.add(&item)?;
                println!("✔ {} listed for Rs {}", item.item_name, item.price_inr);
            }
            ShopCommands::List => {
                let shop = ShopStore::open(&config.storage_dir()?)?;
                let items = shop.list_all()?;

                println!("recircle - community shop\n");
                if items.is_empty() {
                    println!("No items available yet.");
                }
                for item in items {
                    println!(
                        "  {} - Rs {} (seller: {}){}",
                        item.item_name,
                        item.price_inr,
                        item.seller,
                        if item.description.is_empty() {
                            String::new()
                        } else {
                            format!("\n    {}", item.description)
                        }
                    );
                }
            }
        },

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if show {
                println!("configuration:");
                println!("  model:          {}", config.model);
                println!("  api url:        {}", config.api_url);
                println!("  max image size: {}px", config.max_image_size);
                println!("  item cap:       {}", config.item_cap);
                println!("  timeout:        {}s", config.timeout_seconds);
                println!(
                    "  api key:        {}",
                    if config.api_key.is_some() { "set" } else { "not set" }
                );
            }
        }
    }

    Ok(())
}
