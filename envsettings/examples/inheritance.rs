//! Schema inheritance: a leaf schema extends a base schema and overrides
//! declarations by name.

use envsettings::EnvSettings;

#[derive(EnvSettings)]
#[allow(dead_code)]
struct BaseConfig {
    #[setting(default = "localhost")]
    pub host: String,

    #[setting(default = 8080)]
    pub port: u16,
}

#[derive(EnvSettings)]
#[setting(extend = BaseConfig)]
#[allow(dead_code)]
struct WorkerConfig {
    // Overrides the inherited default
    #[setting(default = 9090)]
    pub port: u16,

    #[setting(default = 4)]
    pub worker_count: u32,
}

fn main() -> anyhow::Result<()> {
    let base = BaseConfig::settings()?;
    let worker = WorkerConfig::settings()?;

    // The worker schema redeclared PORT, so its default wins there,
    // while the base schema is unaffected.
    println!("base PORT:   {}", base.get("PORT")?);
    println!("worker PORT: {}", worker.get("PORT")?);

    // HOST is inherited unchanged
    println!("worker HOST: {}", worker.get("HOST")?);
    println!("worker WORKER_COUNT: {}", worker.get("WORKER_COUNT")?);

    Ok(())
}
