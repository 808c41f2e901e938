//! Basic usage example

use envsettings::EnvSettings;

#[derive(EnvSettings)]
#[allow(dead_code)]
struct Config {
    // Loaded from the HOST environment variable
    #[setting(default = "localhost")]
    pub host: String,

    // Numeric type
    #[setting(default = 8080)]
    pub port: u16,

    // Boolean type
    #[setting(default = false)]
    pub debug: bool,

    // No default: reads yield the absent value until DATABASE_URL is set
    pub database_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("PORT", "3000");
    std::env::set_var("DEBUG", "yes");

    let settings = Config::settings()?;

    println!("Configuration loaded:");
    println!("  Host: {}", settings.get("HOST")?);
    println!("  Port: {}", settings.get("PORT")?);
    println!("  Debug: {}", settings.get("DEBUG")?);
    println!("  Database URL: {}", settings.get("DATABASE_URL")?);

    Ok(())
}
