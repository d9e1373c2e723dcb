//! Table Lifecycle Example
//!
//! This example walks a facade through a full mount cycle:
//! - calls before the table is mounted fail with a "not mounted" error
//! - calls after mounting are forwarded, including asynchronous ones
//! - unmounting and remounting swaps the instance behind the same handle
//!
//! Usage:
//!   RUST_LOG=instance_actions=trace cargo run --example table_lifecycle

use instance_actions::prelude::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn table(generation: usize, loaded: Arc<AtomicUsize>) -> DynamicObject {
    DynamicObject::new()
        .with_fn("reload", move |_| Ok(Outcome::ready(format!("reloaded #{}", generation))))
        .with_async_fn("load_column", move |args| {
            let loaded = Arc::clone(&loaded);
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                let columns = args.get(0).and_then(|c| c.as_array()).map(|c| c.len()).unwrap_or(0);
                loaded.fetch_add(columns, Ordering::SeqCst);
                Ok(json!({ "columns": columns }))
            }
        })
        .with_value("total", 5)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Table Lifecycle Demo ===\n");

    let (cell, actions) = use_instance::<DynamicObject>("Table");
    let loaded = Arc::new(AtomicUsize::new(0));

    // Before mount
    match actions.call("reload", args![]) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("before mount: {}", e),
    }

    // Mount and forward
    cell.mount(table(1, Arc::clone(&loaded)));
    let reloaded = actions.call("reload", args![])?.resolve().await?;
    println!("after mount: {}", reloaded);

    let pending = actions.call("load_column", args![json!(["id", "name", "status"])])?;
    println!("load_column pending: {}", pending.is_pending());
    println!("load_column result: {}", pending.resolve().await?);

    if let Err(e) = actions.call("total", args![]) {
        println!("total: {}", e);
    }

    if let Some(raw) = actions.get("instance").into_instance() {
        println!("raw instance members: {:?}", raw.member_names());
    }

    // Teardown and remount
    cell.unmount();
    println!("after unmount, mounted = {}", actions.is_mounted());

    cell.mount(table(2, Arc::clone(&loaded)));
    println!("after remount: {}", actions.call("reload", args![])?.resolve().await?);
    println!("columns loaded in total: {}", loaded.load(Ordering::SeqCst));

    Ok(())
}
