// Keyboard pad bridge: WASD translate, Z/X rotate, T/G triggers, M mode,
// P slow toggle, Q quit. Stands in for a real gamepad bridge node.
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::time::{Duration, Instant};
use tracing::info;

use quadriga_zenoh_runtime::config::{TOPIC_CMD_MODE, TOPIC_CMD_PAD};
use quadriga_zenoh_runtime::messages::{DriveMode, PadState};

const INPUT_TIMEOUT_MS: u64 = 150; // Re-center axes after this much time with no input

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let pub_pad = session.declare_publisher(TOPIC_CMD_PAD).await?;
    let pub_mode = session.declare_publisher(TOPIC_CMD_MODE).await?;

    info!("Controls: WASD=translate, Z/X=rotate, T/G=triggers, M=mode, P=slow, Q=quit");

    enable_raw_mode()?;
    let result = run_bridge(&pub_pad, &pub_mode).await;
    disable_raw_mode()?;

    result
}

async fn run_bridge(
    pub_pad: &zenoh::pubsub::Publisher<'_>,
    pub_mode: &zenoh::pubsub::Publisher<'_>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut pad = PadState::default();
    let mut mode = DriveMode::FieldSwerve;
    let mut last_axis_input = Instant::now();

    pub_mode.put(serde_json::to_string(&mode)?).await?;
    info!("Mode: {:?}", mode);

    loop {
        // Poll for key with 20ms timeout (50Hz effective rate)
        if event::poll(Duration::from_millis(20))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;

                match code {
                    // Translation - update axes and refresh timestamp
                    KeyCode::Char('w') if pressed => {
                        pad.left_y = 1.0;
                        last_axis_input = Instant::now();
                    }
                    KeyCode::Char('s') if pressed => {
                        pad.left_y = -1.0;
                        last_axis_input = Instant::now();
                    }
                    KeyCode::Char('a') if pressed => {
                        pad.left_x = 1.0;
                        last_axis_input = Instant::now();
                    }
                    KeyCode::Char('d') if pressed => {
                        pad.left_x = -1.0;
                        last_axis_input = Instant::now();
                    }

                    // Rotation
                    KeyCode::Char('z') if pressed => {
                        pad.right_x = 1.0;
                        last_axis_input = Instant::now();
                    }
                    KeyCode::Char('x') if pressed => {
                        pad.right_x = -1.0;
                        last_axis_input = Instant::now();
                    }

                    // Triggers (tank throttle)
                    KeyCode::Char('t') if pressed => {
                        pad.right_trigger = 1.0;
                        last_axis_input = Instant::now();
                    }
                    KeyCode::Char('g') if pressed => {
                        pad.left_trigger = 1.0;
                        last_axis_input = Instant::now();
                    }

                    // Precision toggle
                    KeyCode::Char('p') if pressed => {
                        pad.slow = !pad.slow;
                        info!("Slow: {}", pad.slow);
                    }

                    // Drive mode toggle
                    KeyCode::Char('m') if pressed => {
                        mode = match mode {
                            DriveMode::FieldSwerve => DriveMode::PseudoTank,
                            DriveMode::PseudoTank => DriveMode::FieldSwerve,
                        };
                        pub_mode.put(serde_json::to_string(&mode)?).await?;
                        info!("Mode: {:?}", mode);
                    }

                    // Quit
                    KeyCode::Char('q') | KeyCode::Esc if pressed => break,

                    _ => {}
                }
            }
        }

        // Re-center axes if no input for INPUT_TIMEOUT_MS
        if last_axis_input.elapsed() > Duration::from_millis(INPUT_TIMEOUT_MS) {
            pad.left_x = 0.0;
            pad.left_y = 0.0;
            pad.right_x = 0.0;
            pad.left_trigger = 0.0;
            pad.right_trigger = 0.0;
        }

        // Always publish at ~50Hz
        pub_pad.put(serde_json::to_string(&pad)?).await?;
    }

    Ok(())
}
