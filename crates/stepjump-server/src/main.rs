//! Language server binary for stepjump.
//!
//! Communicates via JSON-RPC over stdin/stdout and logs to stderr.

use std::ops::ControlFlow;

use async_lsp::concurrency::ConcurrencyLayer;
use async_lsp::panic::CatchUnwindLayer;
use async_lsp::router::Router;
use async_lsp::server::LifecycleLayer;
use async_lsp::tracing::TracingLayer;
use clap::Parser;
use lsp_types::{notification, request};
use stepjump::config::{Config, LogLevel};
use stepjump::logging::init_logging;
use tower::ServiceBuilder;
use tracing::info;

use stepjump_server::error::ServerError;
use stepjump_server::handlers::{
    handle_definition, handle_did_save_text_document, handle_implementation, handle_initialise,
    handle_initialised, handle_shutdown,
};
use stepjump_server::server::ServerState;

/// Language server jumping between Gherkin steps and Rust step implementations.
#[derive(Parser, Debug)]
#[command(name = "stepjump-lsp", version, about)]
struct Args {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&Config::default().with_log_level(LogLevel::Info));
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "starting stepjump-lsp");

    if let Err(e) = run_server() {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

fn build_config(args: &Args) -> Result<Config, ServerError> {
    let config = Config::from_env(LogLevel::Info)?;
    Ok(config.apply_overrides(args.log_level))
}

fn run_server() -> Result<(), ServerError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run_server_async())
}

async fn run_server_async() -> Result<(), ServerError> {
    let (server, _client) = async_lsp::MainLoop::new_server(|client| {
        let state = ServerState::new().with_client(client);

        let mut router = Router::new(state);
        router
            .request::<request::Initialize, _>(|st, params| {
                std::future::ready(handle_initialise(st, params))
            })
            .request::<request::Shutdown, _>(|st, ()| std::future::ready(handle_shutdown(st)))
            .request::<request::GotoDefinition, _>(|st, params| {
                std::future::ready(handle_definition(st, &params))
            })
            .request::<request::GotoImplementation, _>(|st, params| {
                std::future::ready(handle_implementation(st, &params))
            })
            .notification::<notification::Initialized>(|st, params| {
                handle_initialised(st, params);
                ControlFlow::Continue(())
            })
            .notification::<notification::Exit>(|_, ()| ControlFlow::Break(Ok(())))
            .notification::<notification::DidOpenTextDocument>(|_, _| ControlFlow::Continue(()))
            .notification::<notification::DidChangeTextDocument>(|_, _| ControlFlow::Continue(()))
            .notification::<notification::DidSaveTextDocument>(|st, params| {
                handle_did_save_text_document(st, params);
                ControlFlow::Continue(())
            })
            .notification::<notification::DidCloseTextDocument>(|_, _| ControlFlow::Continue(()));

        ServiceBuilder::new()
            .layer(TracingLayer::default())
            .layer(LifecycleLayer::default())
            .layer(CatchUnwindLayer::default())
            .layer(ConcurrencyLayer::default())
            .service(router)
    });

    #[cfg(unix)]
    let (stdin, stdout) = (
        async_lsp::stdio::PipeStdin::lock_tokio()?,
        async_lsp::stdio::PipeStdout::lock_tokio()?,
    );
    #[cfg(not(unix))]
    let (stdin, stdout) = {
        use tokio_util::compat::{TokioAsyncReadCompatExt, TokioAsyncWriteCompatExt};
        (
            tokio::io::stdin().compat(),
            tokio::io::stdout().compat_write(),
        )
    };

    server
        .run_buffered(stdin, stdout)
        .await
        .map_err(std::io::Error::other)?;

    info!("server exited");
    Ok(())
}
