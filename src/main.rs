use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use component_registry::{with_global, EntityId, Registry, RegistryConfig};

#[derive(Debug, Parser)]
#[command(author, version, about = "Entity-Component registry demo")]
struct Cli {
    /// Path to a YAML or JSON registry config (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of entities to allocate from the registry
    #[arg(long, default_value_t = 2)]
    entities: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Counter {
    value: i32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RegistryConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RegistryConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.logging.level))?,
        )
        .init();

    info!(first_id = config.first_id, "registry demo starting");

    // Hand-made ids compare and print as their integers.
    let a = EntityId::new(1);
    let b = EntityId::from(3);
    println!("a: {}", a.as_integer());
    println!("b: {}", b.as_integer());
    println!("a == b: {}", a == b);
    println!("a == Entity(1): {}", a == EntityId::new(1));

    let mut registry = Registry::with_config(&config);
    let mut allocated = Vec::with_capacity(cli.entities as usize);
    for _ in 0..cli.entities {
        allocated.push(registry.next_id()?);
    }
    info!(count = allocated.len(), "allocated entities");

    for (i, &entity) in allocated.iter().enumerate() {
        registry.set(entity, Counter { value: i as i32 * 5 });
    }
    for &entity in &allocated {
        println!("{entity}: counter = {}", registry.get::<Counter>(entity).value);
    }

    // Reading a component that was never attached creates it.
    let loner = registry.next_id()?;
    let fresh = registry.get::<Counter>(loner).value;
    println!(
        "{loner}: lazily created counter = {fresh}, has = {}",
        registry.has::<Counter>(loner)
    );

    registry.get::<Counter>(loner).value = 7;
    println!("{loner}: counter = {}", registry.get::<Counter>(loner).value);
    println!("{loner}: removed = {}", registry.remove::<Counter>(loner));
    println!("{loner}: recreated counter = {}", registry.get::<Counter>(loner).value);

    for &entity in &allocated {
        registry.remove_entity(entity);
    }

    // The process-wide registry serves the same operations through handles.
    a.set_global(Counter { value: 7 });
    println!("a.get_global::<Counter>(): {}", a.get_global::<Counter>().value);
    let store_count = with_global(|registry| registry.store_count());

    info!(store_count, "registry demo finished");
    Ok(())
}
