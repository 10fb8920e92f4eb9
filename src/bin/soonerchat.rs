//! Interactive chat application for OpenAI-compatible completion endpoints.
//!
//! # Usage
//!
//! ```bash
//! # Credentials come from ~/.soonerai.env (SOONERAI_API_KEY, optional
//! # SOONERAI_BASE_URL and SOONERAI_MODEL) or from the environment.
//! soonerchat
//!
//! # Keep only the last two exchanges in context
//! soonerchat --max-pairs 2
//!
//! # Override the persona and the model
//! soonerchat --system "You are Squidward." --model llama3.2:3b
//!
//! # Disable colors (useful for piping output)
//! soonerchat --no-color
//! ```
//!
//! # Commands
//!
//! - `:help` - Show available commands
//! - `:reset` - Clear conversation history (the system prompt stays)
//! - `:save [path]` - Save a text transcript
//! - `:quit`, `:exit`, `:q` - Exit the application
//!
//! Set `RUST_LOG=soonerchat=debug` to trace requests on stderr.

use arrrg::CommandLine;
use tracing_subscriber::EnvFilter;

use soonerchat::chat::{
    ChatArgs, ChatConfig, ChatSession, EditorSource, FAREWELL, PlainTextRenderer, Renderer,
};
use soonerchat::{Error, Result, SoonerAi};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (args, _) = ChatArgs::from_command_line_relaxed("soonerchat [OPTIONS]");
    let mut renderer = PlainTextRenderer::with_color(!args.no_color);

    if let Err(err) = run(args, &mut renderer).await {
        eprintln!("Fatal error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: ChatArgs, renderer: &mut dyn Renderer) -> Result<()> {
    let config = ChatConfig::from_args(args)?;
    tracing::debug!(?config, "resolved configuration");

    let client = SoonerAi::with_options(&config.api_key, &config.base_url, config.timeout)?;
    let mut input = EditorSource::new()?;

    // The editor owns Ctrl+C at the prompt; this only fires while a request is in flight.
    ctrlc::set_handler(|| {
        println!("\n{FAREWELL}");
        std::process::exit(0);
    })
    .map_err(|err| Error::input(format!("failed to install interrupt handler: {err}"), None))?;

    renderer.print_banner(&config.model, &client.endpoint());
    let mut session = ChatSession::new(client, config);
    session.run(&mut input, renderer).await
}
