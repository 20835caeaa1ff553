use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use hookwork_core::SettlePolicy;
use hookwork_fetch::{FetchConfig, HttpClient, ReqwestClient};
use hookwork_platform::{RunConfig, run_terminal_app};
use showcase::{Endpoints, root};

/// Hooks demo in the terminal.
///
/// Commands: click <n>, type <n> <text>, focus <n>, ok, show, quit.
#[derive(Debug, Parser)]
#[command(name = "hooks-showcase", version)]
struct Args {
    /// Authors collection URL.
    #[arg(long)]
    authors_url: Option<String>,

    /// Single post URL.
    #[arg(long)]
    post_url: Option<String>,

    /// URL for the fetch lifecycle demo.
    #[arg(long)]
    lifecycle_url: Option<String>,

    /// Request timeout in seconds (0 disables it).
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Let a superseded request overwrite a newer result.
    #[arg(long)]
    last_settled: bool,

    /// Do not read stdin; exit once the app goes idle.
    #[arg(long)]
    once: bool,

    /// Seconds without activity before exiting once stdin is closed.
    #[arg(long, default_value_t = 5)]
    idle: u64,

    /// Append the frame HUD.
    #[arg(long)]
    inspector: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut endpoints = Endpoints::default();
    if let Some(url) = args.authors_url {
        endpoints = endpoints.authors(url);
    }
    if let Some(url) = args.post_url {
        endpoints = endpoints.post(url);
    }
    if let Some(url) = args.lifecycle_url {
        endpoints = endpoints.lifecycle(url);
    }

    let fetch = FetchConfig::default()
        .policy(if args.last_settled {
            SettlePolicy::LastSettled
        } else {
            SettlePolicy::Latest
        })
        .timeout((args.timeout > 0).then(|| Duration::from_secs(args.timeout)));

    let config = RunConfig::default()
        .title("Hooks showcase")
        .interactive(!args.once)
        .idle_timeout(Duration::from_secs(args.idle))
        .inspector(args.inspector);

    log::debug!("endpoints: {endpoints:?}");
    let client: Rc<dyn HttpClient> = Rc::new(ReqwestClient::new());
    run_terminal_app(config, root(client, endpoints, fetch))
}
