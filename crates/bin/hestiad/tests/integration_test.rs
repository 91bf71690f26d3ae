//! End-to-end smoke tests for the full hestiad stack.
//!
//! Each test wires the real integrations onto the in-process host (in-memory
//! state store, recording dispatcher, virtual washer device) and exercises
//! them through the `Integration` service-call surface.

use std::sync::Arc;

use hestia_adapter_actuator::{ActuatorIntegration, SERVICE_ACTUATE};
use hestia_adapter_virtual::VirtualWasher;
use hestia_adapter_washer::Washer;
use hestia_app::host::{InMemoryStateStore, RecordingDispatcher};
use hestia_app::ports::Integration;
use hestia_domain::entity::{AttributeValue, EntitySnapshot};
use hestia_domain::error::HestiaError;
use hestia_domain::id::EntityId;
use hestia_domain::time::now;
use serde_json::json;

fn host_with_fan(
    fan_state: &str,
) -> (Arc<InMemoryStateStore>, Arc<RecordingDispatcher>) {
    let store = Arc::new(InMemoryStateStore::default());
    store.set_state(EntitySnapshot::new(
        EntityId::new("sensor.temperature").unwrap(),
        "25.0",
        now(),
    ));
    store.set_state(
        EntitySnapshot::new(EntityId::new("fan.bedroom").unwrap(), fan_state, now())
            .with_attribute("speed", AttributeValue::String("low".to_string())),
    );
    (store, Arc::new(RecordingDispatcher::default()))
}

fn rule(delay: u64) -> serde_json::Value {
    json!({
        "sensor_id": "sensor.temperature",
        "sensor_values": [30.0, 20.0, 10.0],
        "entity_id": "fan.bedroom",
        "entity_attr": "speed",
        "entity_values": ["high", "med", "low"],
        "delay": delay,
    })
}

#[tokio::test]
async fn should_actuate_fan_through_the_stack() {
    let (store, dispatcher) = host_with_fan("on");
    let actuator = ActuatorIntegration::new(Arc::clone(&store), Arc::clone(&dispatcher));

    actuator
        .handle_service_call(SERVICE_ACTUATE, rule(0))
        .await
        .unwrap();

    let calls = dispatcher.take_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].service, "set_speed");
    assert_eq!(calls[0].data["speed"], "med");
}

#[tokio::test]
async fn should_turn_fan_on_before_setting_speed_when_off() {
    let (store, dispatcher) = host_with_fan("off");
    let actuator = ActuatorIntegration::new(Arc::clone(&store), Arc::clone(&dispatcher));

    actuator
        .handle_service_call(SERVICE_ACTUATE, rule(0))
        .await
        .unwrap();

    let calls = dispatcher.take_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].service, "turn_on");
    assert_eq!(calls[1].service, "set_speed");
}

#[tokio::test(start_paused = true)]
async fn should_coalesce_repeated_requests_for_the_same_target() {
    let (store, dispatcher) = host_with_fan("on");
    let actuator = ActuatorIntegration::new(Arc::clone(&store), Arc::clone(&dispatcher));

    actuator
        .handle_service_call(SERVICE_ACTUATE, rule(5))
        .await
        .unwrap();
    let mut second = rule(5);
    second["entity_values"] = json!(["fast", "mid", "slow"]);
    actuator
        .handle_service_call(SERVICE_ACTUATE, second)
        .await
        .unwrap();

    assert!(dispatcher.calls().is_empty());
    tokio::time::sleep(std::time::Duration::from_secs(6)).await;

    // Only the first request ran; the second was dropped while pending.
    let calls = dispatcher.take_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].data["speed"], "med");
}

#[tokio::test]
async fn should_run_washer_cycle_against_virtual_device() {
    let device = Arc::new(VirtualWasher::default());
    let washer = Washer::new("Washer", Arc::clone(&device));

    washer.refresh().await;
    assert!(washer.available());
    assert!(!washer.is_on());

    washer
        .handle_service_call("set_speed", json!({"speed": "wash"}))
        .await
        .unwrap();
    washer.handle_service_call("turn_on", json!({})).await.unwrap();

    assert_eq!(device.prop("wash_status"), Some(json!(1)));
    assert_eq!(device.prop("DryMode"), Some(json!(0)));

    // The first poll after a command is skipped.
    washer.refresh().await;
    washer.refresh().await;
    assert!(washer.is_on());

    washer.handle_service_call("turn_off", json!({})).await.unwrap();
    assert_eq!(device.prop("wash_status"), Some(json!(0)));
}

#[tokio::test]
async fn should_reject_unknown_service_verbs() {
    let (store, dispatcher) = host_with_fan("on");
    let actuator = ActuatorIntegration::new(store, dispatcher);
    let washer = Washer::new("Washer", VirtualWasher::default());

    let result = actuator.handle_service_call("evaluate", rule(0)).await;
    assert!(matches!(result, Err(HestiaError::NotFound(_))));

    let result = washer.handle_service_call("oscillate", json!({})).await;
    assert!(matches!(result, Err(HestiaError::NotFound(_))));
}
