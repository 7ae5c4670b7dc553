// 50 Hz loop with watchdog
//
// If the pad bridge dies mid-session the runtime must not keep driving
// the last command; stale input collapses to a stop emission (zero
// speeds, steer angles held).

use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{info, warn};

// local imports
use crate::config::{
    CMD_TIMEOUT, DriveParams, LOOP_HZ, TOPIC_CMD_MODE, TOPIC_CMD_PAD, TOPIC_HEALTH, TOPIC_IMU_YAW,
    TOPIC_RT_MODULES,
};
use crate::drive::{DriveShaper, SwerveKinematics};
use crate::messages::{DriveMode, HeadingSample, ModuleTargets, PadState, RuntimeHealth};

pub struct Runtime {
    shaper: DriveShaper,
    kinematics: SwerveKinematics,
    mode: DriveMode,
    latest_pad: Option<PadState>,
    pad_received_at: Instant,
    yaw_rad: f64,
    health: RuntimeHealth,
}

impl Runtime {
    pub fn new(params: &DriveParams) -> Self {
        Self {
            shaper: DriveShaper::new(params),
            kinematics: SwerveKinematics::new(params),
            mode: DriveMode::FieldSwerve,
            latest_pad: None,
            pad_received_at: Instant::now(),
            yaw_rad: 0.0,
            health: RuntimeHealth::InputStale, // Start stale until first pad sample
        }
    }

    /// Process an incoming pad sample
    fn on_pad(&mut self, pad: PadState) {
        self.latest_pad = Some(pad);
        self.pad_received_at = Instant::now();
    }

    /// Process an incoming heading sample. The last yaw is reused until
    /// a fresh one arrives; only the pad is watchdogged.
    fn on_heading(&mut self, heading: HeadingSample) {
        self.yaw_rad = heading.yaw_rad;
    }

    /// Process a mode change. Entering field mode resets the rate
    /// limiters so a tank episode can't seed the smoothed outputs.
    fn on_mode(&mut self, mode: DriveMode) {
        if mode != self.mode {
            info!("Drive mode changed: {:?} -> {:?}", self.mode, mode);
            if mode == DriveMode::FieldSwerve {
                self.shaper.reset();
            }
            self.mode = mode;
        }
    }

    /// Compute module targets based on watchdog state
    fn compute_targets(&mut self, dt: f64) -> ModuleTargets {
        let pad_age = self.pad_received_at.elapsed();

        if pad_age > CMD_TIMEOUT {
            // Watchdog triggered - stop the base
            if self.health != RuntimeHealth::InputStale {
                warn!("Pad input stale ({:?} old), stopping base", pad_age);
            }
            self.health = RuntimeHealth::InputStale;
            self.kinematics.stop()
        } else if let Some(pad) = self.latest_pad {
            self.health = RuntimeHealth::Ok;
            let body = self.shaper.shape(self.mode, &pad, self.yaw_rad, dt);
            self.kinematics.solve(body)
        } else {
            // No pad sample ever received
            self.health = RuntimeHealth::InputStale;
            self.kinematics.stop()
        }
    }
}

pub async fn run(params: DriveParams) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Bad configuration is fatal here, before anything moves.
    params.validate()?;

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Setting up publishers and subscribers...");
    let sub_pad = session.declare_subscriber(TOPIC_CMD_PAD).await?;
    let sub_mode = session.declare_subscriber(TOPIC_CMD_MODE).await?;
    let sub_yaw = session.declare_subscriber(TOPIC_IMU_YAW).await?;
    let pub_modules = session.declare_publisher(TOPIC_RT_MODULES).await?;
    let pub_health = session.declare_publisher(TOPIC_HEALTH).await?;

    let mut runtime = Runtime::new(&params);
    let mut tick = interval(Duration::from_millis(1000 / LOOP_HZ));
    let mut last_tick = Instant::now();

    info!(
        "Runtime started: {}Hz loop, {}ms watchdog timeout",
        LOOP_HZ,
        CMD_TIMEOUT.as_millis()
    );
    info!(
        "Subscribed to: {}, {}, {}",
        TOPIC_CMD_PAD, TOPIC_CMD_MODE, TOPIC_IMU_YAW
    );
    info!("Publishing to: {}, {}", TOPIC_RT_MODULES, TOPIC_HEALTH);

    loop {
        tokio::select! {
            _ = tick.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                // Terminal emission: one stop command, then exit.
                info!("Shutting down, sending stop targets");
                let stop_json = serde_json::to_string(&runtime.kinematics.stop())?;
                pub_modules.put(stop_json).await?;
                break;
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f64();
        last_tick = now;

        // 1. Drain all pending samples (non-blocking), keep latest
        while let Ok(Some(sample)) = sub_pad.try_recv() {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<PadState>(&payload) {
                Ok(pad) => runtime.on_pad(pad),
                Err(e) => warn!("Failed to parse pad sample: {}", e),
            }
        }
        while let Ok(Some(sample)) = sub_mode.try_recv() {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<DriveMode>(&payload) {
                Ok(mode) => runtime.on_mode(mode),
                Err(e) => warn!("Failed to parse mode selection: {}", e),
            }
        }
        while let Ok(Some(sample)) = sub_yaw.try_recv() {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<HeadingSample>(&payload) {
                Ok(heading) => runtime.on_heading(heading),
                Err(e) => warn!("Failed to parse heading sample: {}", e),
            }
        }

        // 2. Compute module targets (includes watchdog logic)
        let targets = runtime.compute_targets(dt);

        // 3. Publish targets
        let targets_json = serde_json::to_string(&targets)?;
        pub_modules.put(targets_json).await?;

        // 4. Publish health
        let health_json = serde_json::to_string(&runtime.health)?;
        pub_health.put(health_json).await?;
    }

    Ok(())
}
