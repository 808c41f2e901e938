//! Command line overrides layered over the environment.
//!
//! Try:
//!   cargo run --example command_line -- --no-verbose --max-retries 7
//!   cargo run --example command_line -- --host cli.example.com

use envsettings::{CliOverrides, EnvSettings, Layered, ProcessEnv};

#[derive(EnvSettings)]
#[allow(dead_code)]
struct Config {
    #[setting(default = "localhost")]
    pub host: String,

    #[setting(default = 3)]
    pub max_retries: u32,

    // Boolean settings get a --verbose / --no-verbose toggle pair, so an
    // environment-sourced "true" can be overridden back to false.
    #[setting(default = true)]
    pub verbose: bool,
}

fn main() -> anyhow::Result<()> {
    // Pretend the deployment environment already turned verbosity on
    std::env::set_var("VERBOSE", "true");

    let settings = Config::settings()?;
    let cli = CliOverrides::parse(settings, std::env::args().skip(1))?;
    let snapshot = settings.freeze_from(&Layered::new(cli, ProcessEnv))?;

    println!("Effective configuration:");
    for (name, value) in snapshot.iter() {
        println!("  {name} = {value}");
    }

    Ok(())
}
