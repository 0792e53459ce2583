//! miidb CLI - Command-line tool for editing Wii Mii database files.
//!
//! This is the main entry point for the miidb command-line application.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use miidb::prelude::*;

/// Base URL of the Mii rendering service.
const STUDIO_IMAGE_URL: &str = "https://studio.mii.nintendo.com/miis/image.png";

/// miidb - Wii Mii database (RFL_DB.dat) editing tool
#[derive(Parser)]
#[command(name = "miidb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a fresh database of 100 empty slots
    New {
        /// Output path for the database image
        #[arg(short, long, default_value = "RFL_DB.dat")]
        output: PathBuf,
    },

    /// List the slots of a database
    List {
        /// Path to the database file
        #[arg(short, long, env = "MIIDB_FILE")]
        db: PathBuf,

        /// Include empty slots
        #[arg(short, long)]
        all: bool,

        /// Emit JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },

    /// Show one slot in detail
    Show {
        /// Path to the database file
        #[arg(short, long, env = "MIIDB_FILE")]
        db: PathBuf,

        /// Slot index (0-99)
        #[arg(short, long)]
        slot: usize,

        /// Also print the individual Studio parameters
        #[arg(short, long)]
        fields: bool,
    },

    /// Export a slot to a raw 74-byte .mii file
    Export {
        /// Path to the database file
        #[arg(short, long, env = "MIIDB_FILE")]
        db: PathBuf,

        /// Slot index (0-99)
        #[arg(short, long)]
        slot: usize,

        /// Output path (default Mii_<slot>.mii)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a raw 74-byte .mii file into a slot
    Import {
        /// Path to the database file
        #[arg(short, long, env = "MIIDB_FILE")]
        db: PathBuf,

        /// Slot index (0-99)
        #[arg(short, long)]
        slot: usize,

        /// Input .mii file
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the updated database (default: in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Clear a slot back to empty
    Clear {
        /// Path to the database file
        #[arg(short, long, env = "MIIDB_FILE")]
        db: PathBuf,

        /// Slot index (0-99)
        #[arg(short, long)]
        slot: usize,

        /// Where to write the updated database (default: in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Swap the records of two slots
    Swap {
        /// Path to the database file
        #[arg(short, long, env = "MIIDB_FILE")]
        db: PathBuf,

        /// First slot index
        #[arg(short, long)]
        from: usize,

        /// Second slot index
        #[arg(short, long)]
        to: usize,

        /// Where to write the updated database (default: in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Move all occupied slots to the front of the database
    Compact {
        /// Path to the database file
        #[arg(short, long, env = "MIIDB_FILE")]
        db: PathBuf,

        /// Where to write the updated database (default: in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a slot's Studio render code or image URL
    Studio {
        /// Path to the database file
        #[arg(short, long, env = "MIIDB_FILE")]
        db: PathBuf,

        /// Slot index (0-99)
        #[arg(short, long)]
        slot: usize,

        /// Print the full image URL instead of the bare code
        #[arg(short, long)]
        url: bool,

        /// Image type for the URL (face, face_only, all_body)
        #[arg(long, default_value = "face")]
        image_type: String,

        /// Image width for the URL
        #[arg(long, default_value_t = 512)]
        width: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::New { output } => {
            cmd_new(&output)?;
        }
        Commands::List { db, all, json } => {
            cmd_list(&db, all, json)?;
        }
        Commands::Show { db, slot, fields } => {
            cmd_show(&db, slot, fields)?;
        }
        Commands::Export { db, slot, output } => {
            cmd_export(&db, slot, output.as_ref())?;
        }
        Commands::Import { db, slot, input, output } => {
            cmd_import(&db, slot, &input, output.as_ref())?;
        }
        Commands::Clear { db, slot, output } => {
            cmd_clear(&db, slot, output.as_ref())?;
        }
        Commands::Swap { db, from, to, output } => {
            cmd_swap(&db, from, to, output.as_ref())?;
        }
        Commands::Compact { db, output } => {
            cmd_compact(&db, output.as_ref())?;
        }
        Commands::Studio { db, slot, url, image_type, width } => {
            cmd_studio(&db, slot, url, &image_type, width)?;
        }
    }

    Ok(())
}

fn load_database(path: &PathBuf) -> Result<RflDatabase> {
    let data = fs::read(path).context("Failed to read database file")?;
    RflDatabase::parse(&data).context("Failed to parse database")
}

fn save_database(db: &RflDatabase, path: &PathBuf) -> Result<()> {
    fs::write(path, db.to_bytes()).context("Failed to write database file")
}

#[derive(Serialize)]
struct SlotEntry {
    slot: usize,
    occupied: bool,
    name: String,
}

fn cmd_new(output: &PathBuf) -> Result<()> {
    let db = RflDatabase::new();
    save_database(&db, output)?;

    println!("Created empty database: {}", output.display());

    Ok(())
}

fn cmd_list(db_path: &PathBuf, all: bool, json: bool) -> Result<()> {
    let db = load_database(db_path)?;

    let entries: Vec<SlotEntry> = db
        .miis()
        .iter()
        .enumerate()
        .filter(|(_, mii)| all || mii.is_valid())
        .map(|(slot, mii)| SlotEntry {
            slot,
            occupied: mii.is_valid(),
            name: mii.name(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        if entry.occupied {
            println!("{:>3}  {}", entry.slot, entry.name);
        } else {
            println!("{:>3}  (empty)", entry.slot);
        }
    }
    println!("\nTotal: {} of {} slots occupied", db.valid_count(), MAX_MIIS);

    Ok(())
}

fn cmd_show(db_path: &PathBuf, slot: usize, fields: bool) -> Result<()> {
    let db = load_database(db_path)?;
    let mii = db
        .mii(slot)
        .with_context(|| format!("No such slot: {} (valid range 0-99)", slot))?;

    println!("Slot {}", slot);
    if mii.is_empty() {
        println!("  (empty)");
        return Ok(());
    }

    println!("  Name: {}", mii.name());
    println!("  Data: {}", mii.to_hex());

    if let Some(studio) = StudioMii::from_mii(mii) {
        println!("  Studio code: {}", studio.encode());

        if fields {
            println!("  Studio parameters:");
            for (name, value) in studio.fields() {
                println!("    {:<20} {}", name, value);
            }
        }
    }

    Ok(())
}

fn cmd_export(db_path: &PathBuf, slot: usize, output: Option<&PathBuf>) -> Result<()> {
    let db = load_database(db_path)?;
    let mii = db
        .mii(slot)
        .with_context(|| format!("No such slot: {} (valid range 0-99)", slot))?;

    if mii.is_empty() {
        anyhow::bail!("Slot {} is empty", slot);
    }

    let default_path = PathBuf::from(format!("Mii_{}.mii", slot));
    let output = output.unwrap_or(&default_path);
    fs::write(output, mii.as_bytes()).context("Failed to write .mii file")?;

    println!("Exported slot {} ({}) to {}", slot, mii.name(), output.display());

    Ok(())
}

fn cmd_import(
    db_path: &PathBuf,
    slot: usize,
    input: &PathBuf,
    output: Option<&PathBuf>,
) -> Result<()> {
    let mut db = load_database(db_path)?;

    let data = fs::read(input).context("Failed to read .mii file")?;
    let mii = Mii::from_bytes(&data)
        .with_context(|| format!("{} is not a 74-byte Mii record", input.display()))?;
    let name = mii.name();

    db.replace(slot, mii)?;

    let output = output.unwrap_or(db_path);
    save_database(&db, output)?;

    println!("Imported {} ({}) into slot {}", input.display(), name, slot);

    Ok(())
}

fn cmd_clear(db_path: &PathBuf, slot: usize, output: Option<&PathBuf>) -> Result<()> {
    let mut db = load_database(db_path)?;
    db.clear_slot(slot)?;

    let output = output.unwrap_or(db_path);
    save_database(&db, output)?;

    println!("Cleared slot {}", slot);

    Ok(())
}

fn cmd_swap(db_path: &PathBuf, from: usize, to: usize, output: Option<&PathBuf>) -> Result<()> {
    let mut db = load_database(db_path)?;
    db.swap(from, to)?;

    let output = output.unwrap_or(db_path);
    save_database(&db, output)?;

    println!("Swapped slots {} and {}", from, to);

    Ok(())
}

fn cmd_compact(db_path: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    let mut db = load_database(db_path)?;
    let occupied = db.compact();

    let output = output.unwrap_or(db_path);
    save_database(&db, output)?;

    println!("Compacted database: {} occupied slots moved to the front", occupied);

    Ok(())
}

fn cmd_studio(db_path: &PathBuf, slot: usize, url: bool, image_type: &str, width: u32) -> Result<()> {
    let db = load_database(db_path)?;
    let mii = db
        .mii(slot)
        .with_context(|| format!("No such slot: {} (valid range 0-99)", slot))?;

    let studio = StudioMii::from_mii(mii)
        .with_context(|| format!("Slot {} is empty", slot))?;
    let code = studio.encode();

    if url {
        println!(
            "{}?data={}&type={}&width={}",
            STUDIO_IMAGE_URL, code, image_type, width
        );
    } else {
        println!("{}", code);
    }

    Ok(())
}
