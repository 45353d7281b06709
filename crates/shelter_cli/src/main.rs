//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire config, logging and the pet provider outside any host app.
//! - Run one insert/query/update/delete pass and print the results.
//!
//! Usage: `shelter_cli [DATA_DIR]`. Without a directory the table lives in
//! memory for the duration of the run.

use shelter_core::{
    init_logging_from_config, pets_from_cursor, ContentValues, Gender, PetProvider, QueryRequest,
    Selection, ShelterConfig,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args_os().nth(1) {
        Some(dir) => {
            let dir = PathBuf::from(dir);
            let dir = if dir.is_absolute() {
                dir
            } else {
                std::env::current_dir()?.join(dir)
            };
            ShelterConfig {
                log_dir: Some(dir.join("logs")),
                ..ShelterConfig::with_data_dir(dir)
            }
        }
        None => ShelterConfig::default(),
    };

    if init_logging_from_config(&config)? {
        log::info!(
            "event=cli_start module=cli status=ok version={}",
            env!("CARGO_PKG_VERSION")
        );
    }

    let provider = PetProvider::from_config(&config)?;
    let collection = provider.router().collection_uri()?;

    let mut values = ContentValues::new();
    values
        .put_text("name", "Toto")
        .put_text("breed", "Terrier")
        .put("gender", Gender::Male)
        .put("weight", 7_i64);
    let Some(item) = provider.insert(&collection, &values)? else {
        return Err("storage did not write the pet row".into());
    };
    println!("inserted {item} type={}", provider.get_type(&item)?);

    let mut change = ContentValues::new();
    change.put("weight", 8_i64);
    let changed = provider.update(&item, &change, &Selection::all())?;
    println!("updated rows={changed}");

    let cursor = provider.query(&collection, &QueryRequest::default())?;
    for pet in pets_from_cursor(&cursor)? {
        println!(
            "pet id={} name={} breed={} gender={:?} weight={}",
            pet.id,
            pet.name,
            pet.breed.as_deref().unwrap_or("-"),
            pet.gender,
            pet.weight
        );
    }

    let removed = provider.delete(&item, &Selection::all())?;
    println!("deleted rows={removed}");
    Ok(())
}
