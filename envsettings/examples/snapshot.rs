//! Live reads versus frozen snapshots.

use envsettings::EnvSettings;

#[derive(EnvSettings)]
#[allow(dead_code)]
struct Config {
    #[setting(default = "localhost")]
    pub host: String,

    #[setting(default = 8080)]
    pub port: u16,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("HOST", "production.example.com");

    let settings = Config::settings()?;

    // Freeze the current state into an immutable bag
    let snapshot = settings.freeze()?;
    println!("frozen HOST: {}", snapshot.get("HOST")?);

    // The environment changes...
    std::env::set_var("HOST", "changed.example.com");

    // ...live reads see the change, the snapshot does not
    println!("live HOST:   {}", settings.get("HOST")?);
    println!("frozen HOST: {}", snapshot.get("HOST")?);

    // Snapshots serialize, handy for handing a config to another component
    println!("snapshot as JSON: {}", serde_json::to_string(&snapshot)?);

    Ok(())
}
