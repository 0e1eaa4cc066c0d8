use std::{env, process::exit, time::Instant};

use csstyper::{
    config::{CliOptions, USAGE},
    display_error,
    errors::errors::Error,
    tables::SourceTables,
    typer::{
        typer::{Resolution, Typer},
        types::display_union,
    },
};

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let options = match CliOptions::from_args(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("{}\n{}", error, USAGE);
            exit(2);
        }
    };

    let start = Instant::now();

    let tables = match SourceTables::load(&options.tables) {
        Ok(tables) => tables,
        Err(error) => {
            eprintln!("Error: {}", error);
            exit(1);
        }
    };

    println!("Loaded tables in {:?}", start.elapsed());

    let resolve_start = Instant::now();
    let mut typer = tables.typer(options.config.clone());

    if let Err(error) = run(&tables, &mut typer, options.normalize) {
        display_error(&error);
        exit(1);
    }

    println!("Resolved in {:?}", resolve_start.elapsed());

    for warning in typer.warnings() {
        eprintln!("Warning: {}", warning);
    }

    let stats = typer.stats();
    println!(
        "{} names resolved, {} syntaxes parsed, {} warnings",
        stats.resolved_names,
        stats.parsed_syntaxes,
        typer.warnings().len()
    );
    println!("Total time: {:?}", start.elapsed());
}

fn run(tables: &SourceTables, typer: &mut Typer, normalize: bool) -> Result<(), Error> {
    for (name, resolution) in typer.resolve_all_properties()? {
        println!("{}", render(&name, &resolution, typer, normalize)?);
    }

    for descriptor in tables.resolve_descriptors(typer)? {
        let name = format!("{} {}", descriptor.at_rule, descriptor.descriptor);
        println!("{}", render(&name, &descriptor.resolution, typer, normalize)?);
    }

    if normalize {
        for (name, resolution) in typer.resolve_all_data_types()? {
            let name = format!("<{}>", name);
            println!("{}", render(&name, &resolution, typer, normalize)?);
        }
    }

    if !tables.pseudo_classes.is_empty() {
        println!("pseudo-classes: {}", display_union(&tables.pseudo_class_types()));
    }

    Ok(())
}

fn render(name: &str, resolution: &Resolution, typer: &mut Typer, normalize: bool) -> Result<String, Error> {
    let union = if normalize {
        display_union(&typer.normalize(&resolution.types)?)
    } else {
        display_union(&resolution.types)
    };

    if resolution.needs_length {
        Ok(format!("{}<TLength>: {}", name, union))
    } else {
        Ok(format!("{}: {}", name, union))
    }
}
