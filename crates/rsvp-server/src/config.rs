use rsvp_core::HASH_ITERATIONS;
use rsvp_core::HASH_MEMORY_KIB;
use rsvp_core::HASH_PARALLELISM;

/// Server configuration, from flags or the environment.
#[derive(Debug, Clone, clap::Args)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind: String,
    /// HMAC secret for signing bearer tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
    /// PostgreSQL URL. Without it the server keeps everything in memory.
    #[arg(long, env = "DB_URL")]
    pub db_url: Option<String>,
    /// HTTP worker threads.
    #[arg(long, env = "WORKERS", default_value_t = 4)]
    pub workers: usize,
    /// Argon2 memory cost in KiB.
    #[arg(long, env = "HASH_MEMORY_KIB", default_value_t = HASH_MEMORY_KIB)]
    pub hash_memory_kib: u32,
    /// Argon2 passes.
    #[arg(long, env = "HASH_ITERATIONS", default_value_t = HASH_ITERATIONS)]
    pub hash_iterations: u32,
    /// Argon2 lanes.
    #[arg(long, env = "HASH_PARALLELISM", default_value_t = HASH_PARALLELISM)]
    pub hash_parallelism: u32,
}
