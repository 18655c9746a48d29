//! Showcase of paramtree writes, store loading and diagnostics
//!
//! Each scenario prints the parameter listing it feeds in, followed by either
//! the resulting value or the collected failures.
//!
//! Run with: cargo run --example showcase
//! Set `RUST_LOG=paramtree=trace` to follow the writer step by step.

use std::collections::HashMap;

use indoc::indoc;
use paramtree::{LoadOptions, ParamError, Params, Severity};

#[derive(Params, Debug, Default)]
struct Service {
    name: String,
    #[param(rename = "max_connections")]
    connections: u32,
    database: Database,
    replicas: Vec<String>,
    limits: HashMap<String, u64>,
    tls: Option<Tls>,
}

#[derive(Params, Debug, Default)]
struct Database {
    host: String,
    port: u16,
}

#[derive(Params, Debug, Default)]
struct Tls {
    enabled: bool,
    cert_path: String,
}

/// Reads `path=value` lines.
fn params(listing: &str) -> Vec<(&str, &str)> {
    listing
        .lines()
        .filter_map(|line| line.split_once('='))
        .collect()
}

fn main() {
    env_logger::init();

    println!("\n{}", "═".repeat(70));
    println!("  paramtree Showcase");
    println!("{}\n", "═".repeat(70));

    let listing = indoc! {"
        name=api
        max_connections=64
        database/host=db.internal
        database/port=5432
        replicas/1=replica-b
        limits/requests=1000
        tls/enabled=true
    "};
    let mut service = Service::default();
    let result = paramtree::write(&mut service, params(listing));
    scenario("Writing a listing", listing, &service, result);

    let listing = indoc! {"
        /prod/api/name=api
        /prod/api/database/port=6432
        /prod/api/legacy_flag=on
        /staging/api/name=staging
    "};
    let mut service = Service::default();
    let options = LoadOptions {
        ignore_unmapped: true,
        ..LoadOptions::with_prefix("/prod/api")
    };
    let result = paramtree::load(params(listing), &options, &mut service);
    scenario(
        "Loading from a store prefix, unmapped names ignored",
        listing,
        &service,
        result,
    );

    let listing = indoc! {"
        name=api
        database=primary
        database/port=http
        replicas/first=a
        tls/enabled=yes
        tls/key_path=/etc/key.pem
    "};
    let mut service = Service::default();
    let result = paramtree::write(&mut service, params(listing));
    scenario("Collecting every failure", listing, &service, result);

    let listing = indoc! {"
        nmae=api
        replicas/-1=a
    "};
    let mut service = Service::default();
    let result = paramtree::write(&mut service, params(listing));
    scenario("Path-level failures only", listing, &service, result);

    println!("{}", "═".repeat(70));
}

fn scenario(title: &str, listing: &str, value: &Service, result: Result<(), ParamError>) {
    println!("{}", "─".repeat(70));
    println!("  {title}");
    println!("{}\n", "─".repeat(70));

    println!("Parameters:");
    for line in listing.lines() {
        println!("    {line}");
    }

    match result {
        Ok(()) => println!("\nWritten:\n{value:#?}"),
        Err(error) => {
            let outcome = if error.is_warning() { "warning" } else { "error" };
            println!("\nOutcome: {outcome}");
            println!("    {error}");

            if let Some(failures) = error.write_errors() {
                println!("\nFailures:");
                for failure in failures {
                    let severity = match failure.severity() {
                        Severity::Path => "path ",
                        Severity::Fatal => "fatal",
                    };
                    println!("    [{severity}] {:<20} {}", failure.path(), failure.message());
                }
            }

            println!("\nValue after the write:\n{value:#?}");
        }
    }
    println!();
}
