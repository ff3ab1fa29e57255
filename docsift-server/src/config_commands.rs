use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use docsift_core::config::load_config;
use docsift_types::DocsiftConfig;

pub fn show_config(explicit: Option<&Path>, json: bool) -> Result<()> {
    let mut config = load_config(explicit)?;
    config.upstream.api_key = mask_key(&config.upstream.api_key);

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print_config(&config);
    }
    Ok(())
}

fn print_config(config: &DocsiftConfig) {
    println!("{}", "Server:".cyan().bold());
    println!("  Bind: {}:{}", config.server.get_bind_address(), config.server.port);
    println!("  Body limit: {} MB", config.server.body_limit_mb);

    println!("{}", "Upstream:".cyan().bold());
    println!("  Endpoint: {}", config.upstream.endpoint);
    println!("  API Key: {}", config.upstream.api_key);
    println!("  Auth: {}", config.upstream.auth_mode);
    println!("  API Version: {}", config.upstream.api_version.as_deref().unwrap_or("-"));
    println!("  Model: {}", config.upstream.model);
    println!(
        "  Timeouts: request {}s, indexing {}s (poll every {}ms)",
        config.upstream.request_timeout_secs,
        config.upstream.index_timeout_secs,
        config.upstream.poll_interval_ms
    );

    println!("{}", "Pipeline:".cyan().bold());
    println!("  Chunk size: {} bytes", config.pipeline.chunk_size);
    println!("  Batch size: {}", config.pipeline.batch_size);
    println!("  Max results: {}", config.pipeline.max_results);
    println!(
        "  Retry: {} attempt(s), {}ms..{}ms",
        config.pipeline.retry.max_attempts,
        config.pipeline.retry.base_delay_ms,
        config.pipeline.retry.max_delay_ms
    );

    println!("{}", "Progress:".cyan().bold());
    println!(
        "  TTL: {}s, capacity: {}, sweep: {}s",
        config.progress.ttl_secs, config.progress.max_entries, config.progress.sweep_interval_secs
    );
}

fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
