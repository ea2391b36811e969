//! Sitemap server.
//!
//! Every request re-runs discovery and renders its document from scratch;
//! the only state shared between workers is the immutable config.

mod lifecycle;
mod path;
mod response;
mod router;

use router::{RequestInfo, dispatch};

use crate::{
    config::{SiteConfig, cfg, init_config},
    core::{is_shutdown, register_server},
    debug, log,
    utils::date::DateTimeUtc,
};
use anyhow::{Context, Result};
use crossbeam::channel::{self, Sender};
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    started_at: DateTimeUtc,
}

/// Bind the HTTP server and register it for Ctrl+C shutdown.
pub fn bind_server() -> Result<BoundServer> {
    let config = cfg();
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;

    let mut bound = SiteConfig::clone(&config);
    bound.apply_bound_address(addr);
    init_config(bound);

    let server = Arc::new(server);
    register_server(Arc::clone(&server));

    log!("serve"; "http://{}/sitemap.xml", addr);

    Ok(BoundServer {
        server,
        started_at: DateTimeUtc::now(),
    })
}

impl BoundServer {
    /// Start the request loop (blocking until shutdown).
    pub fn run(self) -> Result<()> {
        let config = cfg();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.serve.workers)
            .thread_name(|i| format!("lingomap-serve-{i}"))
            .build()
            .context("failed to create request thread pool")?;

        let (done_tx, done_rx) = channel::unbounded::<()>();
        let mut spawned = 0usize;

        for request in self.server.incoming_requests() {
            let config = Arc::clone(&config);
            let done_tx = done_tx.clone();
            let started_at = self.started_at;
            spawned += 1;
            pool.spawn(move || handle_request(request, &config, started_at, &done_tx));
        }

        drop(done_tx);
        let still_running = lifecycle::drain_in_flight(&done_rx, spawned);
        if still_running > 0 {
            debug!("serve"; "{} request(s) still running at exit", still_running);
        }
        Ok(())
    }
}

fn handle_request(request: Request, config: &SiteConfig, started_at: DateTimeUtc, done: &Sender<()>) {
    let method = request.method().clone();
    let url = request.url().to_string();

    let result = if is_shutdown() {
        response::respond_unavailable(request)
    } else {
        let if_none_match = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("If-None-Match"))
            .map(|h| h.value.to_string());
        let info = RequestInfo {
            method: method.clone(),
            url: &url,
            if_none_match: if_none_match.as_deref(),
        };
        let reply = dispatch(info, config, started_at);
        debug!("serve"; "{} {} -> {}", method, url, reply.status);
        response::respond(request, reply)
    };

    if let Err(e) = result {
        log!("serve"; "request error: {e}");
    }
    let _ = done.send(());
}
