use clap::{App, Arg};
use datapack::{schema, DocumentType};
use env_logger::Env;
use log::error;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("schema-dump")
        .about("print the JSON Schema for a document type")
        .arg(
            Arg::with_name("type")
                .takes_value(true)
                .required_unless("list"),
        )
        .arg(
            Arg::with_name("list")
                .long("list")
                .takes_value(false)
                .help("list the types that have a schema"),
        )
        .get_matches();

    if matches.is_present("list") {
        for ty in DocumentType::LISTED {
            println!("{}", ty);
        }
        return Ok(());
    }

    let ty: DocumentType = matches.value_of("type").unwrap().parse()?;
    match schema::get_schema(ty) {
        Some(schema) => println!("{}", serde_json::to_string_pretty(schema)?),
        None => error!("{} has no schema", ty),
    }

    Ok(())
}
