use clap::{App, Arg};
use datapack::archive::{self, path};
use datapack::DocumentType;
use env_logger::Env;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let matches = App::new("pack-dump")
        .about("list what a worldgen datapack contains")
        .arg(Arg::with_name("pack").takes_value(true).required(true))
        .arg(
            Arg::with_name("format")
                .long("format")
                .takes_value(true)
                .possible_values(&["text", "json"])
                .default_value("text"),
        )
        .get_matches();

    let bytes = std::fs::read(matches.value_of("pack").unwrap())?;
    let imported = archive::import_archive(&bytes)?;

    if matches.value_of("format") == Some("json") {
        println!("{}", serde_json::to_string_pretty(&imported)?);
        return Ok(());
    }

    match &imported.pack_meta {
        Some(meta) => match (&meta.data, &meta.error) {
            (_, Some(error)) => println!("{}: {}", path::PACK_META, error),
            (Some(data), None) => println!(
                "{}: pack_format {}",
                path::PACK_META,
                data["pack"]["pack_format"]
            ),
            (None, None) => {}
        },
        None => println!("{}: missing", path::PACK_META),
    }

    println!("namespaces: {}", imported.namespaces.join(", "));

    let typed = imported
        .entries_by_type
        .iter()
        .map(|(&ty, entries)| (ty, entries));
    let tags = std::iter::once((DocumentType::Tag, &imported.tag_entries));

    for (ty, entries) in typed.chain(tags).filter(|(_, e)| !e.is_empty()) {
        println!("{} ({})", ty, entries.len());
        for entry in entries {
            println!("    {}", entry.id);
        }
    }

    for e in &imported.errors {
        println!("error: {}", e);
    }

    Ok(())
}
