// Target monitor: READ-ONLY view of what the runtime is commanding
//
// Subscribes to the module target and health topics and prints one line
// per actuation sample. Safe to run alongside the real hardware node.
//
// Usage: cargo run --example target_monitor

use quadriga_zenoh_runtime::config::{TOPIC_HEALTH, TOPIC_RT_MODULES};
use quadriga_zenoh_runtime::messages::{ModuleTargets, RuntimeHealth};

const MODULE_NAMES: [&str; 4] = ["FL", "FR", "BL", "BR"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let session = zenoh::open(zenoh::Config::default()).await?;
    let sub_modules = session.declare_subscriber(TOPIC_RT_MODULES).await?;
    let sub_health = session.declare_subscriber(TOPIC_HEALTH).await?;

    println!("Listening on {} and {}", TOPIC_RT_MODULES, TOPIC_HEALTH);

    let mut last_health: Option<RuntimeHealth> = None;

    loop {
        tokio::select! {
            sample = sub_modules.recv_async() => {
                let sample = sample?;
                match serde_json::from_slice::<ModuleTargets>(&sample.payload().to_bytes()) {
                    Ok(targets) => {
                        let line = targets
                            .modules
                            .iter()
                            .zip(MODULE_NAMES)
                            .map(|(t, name)| {
                                format!(
                                    "{} {:7.1}deg {:5.2}m/s",
                                    name,
                                    t.angle_rad.to_degrees(),
                                    t.speed_mps
                                )
                            })
                            .collect::<Vec<_>>()
                            .join("  |  ");
                        println!("{}", line);
                    }
                    Err(e) => eprintln!("Bad targets payload: {}", e),
                }
            }
            sample = sub_health.recv_async() => {
                let sample = sample?;
                if let Ok(health) =
                    serde_json::from_slice::<RuntimeHealth>(&sample.payload().to_bytes())
                {
                    if last_health != Some(health) {
                        println!("health: {:?}", health);
                        last_health = Some(health);
                    }
                }
            }
        }
    }
}
