use football_stats::infrastructure::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    football_stats::init_tracing(&config.log_filter);

    if let Err(e) = football_stats::run(config).await {
        error!(error = %e, "football-stats exited with an error");
        std::process::exit(1);
    }
}
