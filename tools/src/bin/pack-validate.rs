use std::path::Path;

use clap::{App, Arg};
use datapack::{id, validate_document, DocumentType, Project, ValidationError};
use env_logger::Env;
use log::{error, info};
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Serialize)]
struct Report {
    #[serde(rename = "type")]
    ty: DocumentType,
    id: String,
    errors: Vec<ValidationError>,
}

#[derive(Serialize)]
struct Summary<'a> {
    namespace: &'a str,
    import_errors: &'a [String],
    invalid: &'a [Report],
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("pack-validate")
        .about("validate every document in a worldgen datapack")
        .arg(Arg::with_name("pack").takes_value(true).required(true))
        .arg(
            Arg::with_name("namespace")
                .long("namespace")
                .takes_value(true)
                .required(false)
                .help("active namespace, instead of the most used one in the pack"),
        )
        .arg(
            Arg::with_name("type")
                .long("type")
                .takes_value(true)
                .required(false)
                .help("only validate documents of this type"),
        )
        .arg(
            Arg::with_name("filter")
                .long("filter")
                .takes_value(true)
                .required(false)
                .help("only validate documents whose id matches this regex"),
        )
        .arg(
            Arg::with_name("format")
                .long("format")
                .takes_value(true)
                .possible_values(&["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::with_name("quiet")
                .long("quiet")
                .takes_value(false)
                .help("only set the exit code"),
        )
        .get_matches();

    let path = Path::new(matches.value_of("pack").unwrap());
    let only: Option<DocumentType> = matches
        .value_of("type")
        .map(str::parse::<DocumentType>)
        .transpose()?;
    let filter = matches.value_of("filter").map(Regex::new).transpose()?;

    let bytes = std::fs::read(path)?;
    let mut project = Project::new("minecraft");
    let summary = project.import_archive(&bytes)?;
    if let Some(namespace) = matches.value_of("namespace") {
        project.set_namespace(namespace);
    }
    info!("{}: {}", path.display(), summary.status());

    let namespace = project.namespace().to_owned();
    let documents: Vec<_> = DocumentType::LISTED
        .iter()
        .filter(|&&ty| only.map_or(true, |only| only == ty))
        .flat_map(|&ty| project.entries(ty).iter().map(move |entry| (ty, entry)))
        .map(|(ty, entry)| (ty, id::to_display(&entry.id, &namespace), entry))
        .filter(|(_, id, _)| filter.as_ref().map_or(true, |re| re.is_match(id)))
        .collect();

    let mut invalid: Vec<Report> = documents
        .par_iter()
        .filter_map(|(ty, id, entry)| {
            let result = validate_document(*ty, &entry.data);
            if result.valid {
                None
            } else {
                Some(Report {
                    ty: *ty,
                    id: id.clone(),
                    errors: result.errors,
                })
            }
        })
        .collect();
    invalid.sort_by(|a, b| (a.ty, &a.id).cmp(&(b.ty, &b.id)));

    info!("{} documents checked, {} invalid", documents.len(), invalid.len());

    if !matches.is_present("quiet") {
        match matches.value_of("format") {
            Some("json") => {
                let summary = Summary {
                    namespace: &namespace,
                    import_errors: &summary.errors,
                    invalid: &invalid,
                };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            _ => {
                for e in &summary.errors {
                    println!("import: {}", e);
                }
                for report in &invalid {
                    for e in &report.errors {
                        let at: &str = if e.path.is_empty() { "/" } else { &e.path };
                        println!("{} {}: {}: {}", report.ty, report.id, at, e.message);
                    }
                }
            }
        }
    }

    if !invalid.is_empty() || !summary.errors.is_empty() {
        error!("{} is not valid", path.display());
        std::process::exit(1);
    }

    Ok(())
}
