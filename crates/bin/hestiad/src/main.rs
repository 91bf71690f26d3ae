//! # hestiad — hestia daemon
//!
//! Composition root that wires the integrations onto the in-process host
//! and runs them as a small demo daemon.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize tracing
//! - Construct the in-process host (state store, dispatcher)
//! - Construct integrations, injecting host handles via port traits
//! - Spawn the periodic washer poll and a demo actuation loop
//! - Handle graceful shutdown (SIGINT) and tear the integrations down
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use hestia_adapter_actuator::{ActuatorIntegration, SERVICE_ACTUATE};
use hestia_adapter_virtual::VirtualWasher;
use hestia_adapter_washer::Washer;
use hestia_app::host::{InMemoryStateStore, RecordingDispatcher};
use hestia_app::ports::Integration;
use hestia_domain::entity::{AttributeValue, EntitySnapshot};
use hestia_domain::id::EntityId;
use hestia_domain::time::now;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const DEMO_SENSOR: &str = "sensor.demo_temperature";
const DEMO_FAN: &str = "fan.demo_fan";

/// Rule evaluated by the demo loop: fan speed follows the temperature band.
fn demo_rule() -> serde_json::Value {
    serde_json::json!({
        "sensor_id": DEMO_SENSOR,
        "sensor_values": [30.0, 20.0, 10.0],
        "entity_id": DEMO_FAN,
        "entity_attr": "speed",
        "entity_values": ["high", "med", "low"],
        "delay": 0,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // In-process host
    let store = Arc::new(InMemoryStateStore::default());
    let dispatcher = Arc::new(RecordingDispatcher::default());

    let sensor_id = EntityId::new(DEMO_SENSOR)?;
    let fan_id = EntityId::new(DEMO_FAN)?;
    store.set_state(EntitySnapshot::new(sensor_id.clone(), "21.5", now()));
    store.set_state(
        EntitySnapshot::new(fan_id, "on", now())
            .with_attribute("speed", AttributeValue::String("low".to_string())),
    );

    // Integrations
    let actuator = config.actuator.enabled.then(|| {
        Arc::new(ActuatorIntegration::new(
            Arc::clone(&store),
            Arc::clone(&dispatcher),
        ))
    });
    let washer = config
        .washer
        .enabled
        .then(|| Arc::new(Washer::new(config.washer.name.clone(), VirtualWasher::default())));

    let mut tasks = Vec::new();

    if let Some(actuator) = &actuator {
        let actuator = Arc::clone(actuator);
        let store = Arc::clone(&store);
        let sensor_id = sensor_id.clone();
        tasks.push(tokio::spawn(async move {
            let mut readings = [12.5, 21.5, 32.0, 18.0].into_iter().cycle();
            let mut ticker = tokio::time::interval(Duration::from_secs(60));
            loop {
                ticker.tick().await;
                let reading = readings.next().unwrap_or_default();
                store.set_state(EntitySnapshot::new(
                    sensor_id.clone(),
                    reading.to_string(),
                    now(),
                ));
                if let Err(err) = actuator.handle_service_call(SERVICE_ACTUATE, demo_rule()).await
                {
                    tracing::error!(error = %err, "demo actuation failed");
                }
            }
        }));
    }

    if let Some(washer) = &washer {
        let washer = Arc::clone(washer);
        let period = Duration::from_secs(config.washer.refresh_secs);
        tasks.push(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                washer.refresh().await;
                tracing::debug!(
                    name = washer.name(),
                    available = washer.available(),
                    is_on = washer.is_on(),
                    "washer polled"
                );
            }
        }));
    }

    tracing::info!(
        actuator = actuator.is_some(),
        washer = washer.is_some(),
        "hestiad running, press ctrl-c to stop"
    );
    tokio::signal::ctrl_c().await?;

    for task in tasks {
        task.abort();
    }
    if let Some(actuator) = &actuator {
        actuator.teardown().await?;
    }
    if let Some(washer) = &washer {
        washer.teardown().await?;
    }
    tracing::info!("hestiad stopped");

    Ok(())
}
