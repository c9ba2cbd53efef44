use std::env;

use anyhow::Result;
use token_handoff_rs::{FormInput, FormUi, HandoffForm, TokenPayload};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal stand-in for the submit button on the hosted login page
struct ConsoleUi;

impl FormUi for ConsoleUi {
    fn disable_submit(&mut self) {
        println!("Submitting...");
    }

    fn apply_saved_style(&mut self) {}

    fn set_submit_label(&mut self, label: &str) {
        println!("{}", label);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "token_handoff_rs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 7 {
        eprintln!(
            "Usage: {} <port> <email> <token> <rToken> <clientID> <clientSecret>",
            args[0]
        );
        eprintln!("  port: loopback port the handoff listener is waiting on");
        eprintln!("  remaining values are sent verbatim, empty strings allowed");
        std::process::exit(1);
    }

    let input = FormInput {
        payload: TokenPayload {
            token: args[3].clone(),
            email: args[2].clone(),
            r_token: args[4].clone(),
            client_id: args[5].clone(),
            client_secret: args[6].clone(),
        },
        port: args[1].clone(),
    };

    let mut form = HandoffForm::new(ConsoleUi);
    if let Err(err) = form.submit(&input).await {
        eprintln!("Handoff failed: {:#}", err);
        eprintln!("Is the listener running on port {}?", input.port);
        std::process::exit(1);
    }

    Ok(())
}
