// Mint an access token for local development
//
// Usage: AUTH_JWT_SECRET=... cargo run --bin issue-token -- --name Ada --email ada@example.com
//
// The identity provider issues tokens in production. This binary signs one
// with the shared secret so the API can be exercised in jwt mode.

use clap::Parser;
use eventhub_control_plane::auth::{JwtConfig, JwtService};
use std::time::Duration;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "issue-token")]
#[command(about = "Sign an EventHub access token with the shared secret")]
struct Args {
    /// Secret shared with the API server
    #[arg(long, env = "AUTH_JWT_SECRET")]
    secret: String,

    /// User ID (a fresh one is generated when omitted)
    #[arg(long)]
    user_id: Option<Uuid>,

    #[arg(long)]
    email: String,

    #[arg(long)]
    name: String,

    /// Token lifetime in seconds
    #[arg(long, env = "AUTH_JWT_ACCESS_TOKEN_LIFETIME", default_value = "900")]
    lifetime: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let service = JwtService::new(JwtConfig {
        secret: args.secret,
        access_token_lifetime: Duration::from_secs(args.lifetime),
    });

    let user_id = args.user_id.unwrap_or_else(Uuid::now_v7);
    let token = service.generate_access_token(user_id, &args.email, &args.name, &[])?;

    eprintln!("user_id: {user_id}");
    println!("{token}");
    Ok(())
}
