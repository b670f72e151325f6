//! # Seed Data Generator
//!
//! Populates the database with activities, campers and signups for development.
//! Activities have no HTTP create route, so this is how they get into the store.
//!
//! ## Usage
//! ```bash
//! # Seed the default database (./app.db)
//! cargo run -p camp-db --bin seed
//!
//! # Specify the connection string and wipe existing rows first
//! cargo run -p camp-db --bin seed -- --db sqlite://./data/camp.db --reset
//! ```

use std::env;

use camp_core::{NewActivity, NewCamper, NewSignup};
use camp_db::pool::DEFAULT_DATABASE_URL;
use camp_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// (name, difficulty)
const ACTIVITIES: &[(&str, i64)] = &[
    ("Archery", 2),
    ("Canoeing", 3),
    ("Rock Climbing", 5),
    ("Arts and Crafts", 1),
    ("Swimming", 2),
    ("Orienteering", 4),
    ("Campfire Songs", 1),
];

/// (name, age)
const CAMPERS: &[(&str, i64)] = &[
    ("Ava", 12),
    ("Ben", 9),
    ("Caleb", 15),
    ("Dana", 11),
    ("Eli", 8),
    ("Farah", 17),
    ("Gus", 13),
    ("Hana", 10),
    ("Ivan", 14),
    ("Jun", 18),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_url = env::var("DB_URI").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_url = args[i + 1].clone();
                    i += 1;
                }
            }
            "--reset" | "-r" => reset = true,
            "--help" | "-h" => {
                println!("Camp Roster Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <URL>     Connection string (default: $DB_URI or {DEFAULT_DATABASE_URL})");
                println!("  -r, --reset        Delete existing activities and campers first");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Camp Roster Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_url);
    println!();

    let db = Database::new(DbConfig::new(&db_url)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if reset {
        clear(&db).await?;
        println!("✓ Cleared existing rows");
    }

    let existing = db.activities().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} activities", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Re-run with --reset to regenerate.");
        return Ok(());
    }

    let mut activities = Vec::with_capacity(ACTIVITIES.len());
    for (name, difficulty) in ACTIVITIES {
        activities.push(db.activities().create(&NewActivity::new(*name, *difficulty)).await?);
    }
    println!("✓ Created {} activities", activities.len());

    let mut campers = Vec::with_capacity(CAMPERS.len());
    for (name, age) in CAMPERS {
        let camper = NewCamper {
            name: (*name).to_string(),
            age: *age,
        };
        campers.push(db.campers().create(&camper).await?);
    }
    println!("✓ Created {} campers", campers.len());

    // Two slots per camper: a morning one and an afternoon one.
    let mut signups = 0;
    for (idx, camper) in campers.iter().enumerate() {
        let morning = &activities[idx % activities.len()];
        let afternoon = &activities[(idx + 2) % activities.len()];

        for (activity, time) in [(morning, 9 + (idx as i64 % 3)), (afternoon, 13 + (idx as i64 % 4))] {
            db.signups()
                .create(&NewSignup {
                    activity_id: activity.id,
                    camper_id: camper.id,
                    time,
                })
                .await?;
            signups += 1;
        }
    }
    println!("✓ Created {} signups", signups);

    println!();
    println!("Rosters:");
    for activity in &activities {
        let roster = db.activities().campers(activity.id).await?;
        let names: Vec<&str> = roster.iter().map(|c| c.name.as_str()).collect();
        println!("  {:<16} {}", activity.name, names.join(", "));
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Removes every activity (and with it every signup), then every camper.
async fn clear(db: &Database) -> anyhow::Result<()> {
    for activity in db.activities().list_all().await? {
        db.activities().delete(activity.id).await?;
    }
    for camper in db.campers().list_all().await? {
        db.campers().delete(camper.id).await?;
    }
    Ok(())
}
