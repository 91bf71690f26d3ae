//! # hestia-adapter-washer
//!
//! Washer integration. Maps a laundry appliance's property protocol
//! (`get_prop` reads, `set_*` writes over a raw command channel) onto a
//! fan-like entity: on/off derived from the cycle state, wash modes as the
//! speed vocabulary, and a deferred-start offset computed for scheduled
//! modes.
//!
//! All device failures are logged and swallowed at the entity boundary;
//! the service surface never propagates them.
//!
//! ## Dependency rule
//!
//! Depends on `hestia-app` (port traits) and `hestia-domain` only.

mod mode;
mod schedule;
mod status;

pub use mode::WashMode;
pub use schedule::{TARGET_START_HOUR, appoint_offset};
pub use status::{TRACKED_PROPS, WasherSnapshot};

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use hestia_domain::error::{HestiaError, NotFoundError};
use hestia_domain::time::local_time;

use hestia_app::ports::{DeviceError, DeviceTransport, Integration};

/// Property-read command.
pub const CMD_GET_PROP: &str = "get_prop";
const CMD_SET_WASH_PROGRAM: &str = "set_wash_program";
const CMD_SET_DRY_MODE: &str = "SetDryMode";
const CMD_SET_APPOINT_TIME: &str = "set_appoint_time";
const CMD_SET_WASH_ACTION: &str = "set_wash_action";

/// The wash program this integration drives.
pub const WASH_PROGRAM: &str = "goldenwash";
/// Vendor flag arming the dry phase.
pub const DRY_MODE_ON: i64 = 30721;
/// Dry phase disarmed.
pub const DRY_MODE_OFF: i64 = 0;
const WASH_ACTION_START: i64 = 1;
const WASH_ACTION_STOP: i64 = 2;

/// Mutable entity state behind one lock.
struct WasherState {
    mode: WashMode,
    snapshot: Option<WasherSnapshot>,
    skip_update: bool,
}

/// Fan-like washer entity over a device transport.
pub struct Washer<T> {
    name: String,
    device: T,
    inner: Mutex<WasherState>,
}

impl<T: DeviceTransport> Washer<T> {
    /// Create the entity; state is unknown until the first [`refresh`](Self::refresh).
    pub fn new(name: impl Into<String>, device: T) -> Self {
        Self {
            name: name.into(),
            device,
            inner: Mutex::new(WasherState {
                mode: WashMode::default(),
                snapshot: None,
                skip_update: false,
            }),
        }
    }

    /// Display name of the entity.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the last poll succeeded.
    #[must_use]
    pub fn available(&self) -> bool {
        self.lock().snapshot.is_some()
    }

    /// Derived on/off state from the last poll.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.lock()
            .snapshot
            .as_ref()
            .is_some_and(WasherSnapshot::is_on)
    }

    /// The currently selected wash mode.
    #[must_use]
    pub fn speed(&self) -> WashMode {
        self.lock().mode
    }

    /// The fixed speed vocabulary.
    #[must_use]
    pub fn speed_list(&self) -> Vec<&'static str> {
        WashMode::ALL.iter().map(|mode| mode.as_str()).collect()
    }

    /// Read-only attribute bag mirroring the last poll, if any.
    #[must_use]
    pub fn attributes(&self) -> Option<HashMap<String, Value>> {
        self.lock().snapshot.as_ref().map(WasherSnapshot::attributes)
    }

    /// Record the desired mode; no device write happens until the next
    /// turn-on. Unrecognized names fall back to the default mode.
    pub fn set_speed(&self, speed: &str) {
        let mode = WashMode::parse_or_default(speed);
        tracing::debug!(washer = %self.name, %mode, requested = speed, "wash mode selected");
        self.lock().mode = mode;
    }

    /// Poll every tracked property. A transport failure clears the snapshot
    /// (the entity turns unavailable); the refresh right after a successful
    /// command is skipped once.
    pub async fn refresh(&self) {
        if std::mem::take(&mut self.lock().skip_update) {
            return;
        }
        let snapshot = match self.poll().await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::error!(washer = %self.name, error = %err, "status poll failed");
                None
            }
        };
        self.lock().snapshot = snapshot;
    }

    /// Start a cycle according to the selected mode.
    ///
    /// With a `speed` argument this only records the mode (matching the
    /// upstream fan semantics) and reports success. Requires a prior
    /// successful poll; returns `false` on any device failure.
    pub async fn turn_on(&self, speed: Option<&str>) -> bool {
        if let Some(speed) = speed {
            self.set_speed(speed);
            return true;
        }

        let (mode, snapshot) = {
            let state = self.lock();
            (state.mode, state.snapshot.clone())
        };
        let Some(snapshot) = snapshot else {
            tracing::warn!(washer = %self.name, "no status yet, cannot start");
            return false;
        };

        let offset = if mode.scheduled() {
            appoint_offset(local_time())
        } else {
            0
        };
        match self.start_cycle(mode, &snapshot, offset).await {
            Ok(()) => {
                self.lock().skip_update = true;
                true
            }
            Err(err) => {
                tracing::error!(washer = %self.name, error = %err, "failed to start cycle");
                false
            }
        }
    }

    /// Stop the running cycle; `false` on any device failure.
    pub async fn turn_off(&self) -> bool {
        match self.stop_cycle().await {
            Ok(()) => {
                self.lock().skip_update = true;
                true
            }
            Err(err) => {
                tracing::error!(washer = %self.name, error = %err, "failed to stop cycle");
                false
            }
        }
    }

    async fn poll(&self) -> Result<WasherSnapshot, DeviceError> {
        let mut props = HashMap::new();
        for prop in TRACKED_PROPS {
            let response = self.device.send(CMD_GET_PROP, &[Value::from(prop)]).await?;
            props.insert(prop.to_string(), response.into_iter().next());
        }
        Ok(WasherSnapshot::from_props(props))
    }

    /// Align program and dry flag with the mode, then start — deferred via
    /// `set_appoint_time` when the offset is nonzero, immediately otherwise.
    /// Only the final command's acknowledgement decides success.
    async fn start_cycle(
        &self,
        mode: WashMode,
        snapshot: &WasherSnapshot,
        offset: u32,
    ) -> Result<(), DeviceError> {
        if snapshot.program.as_deref() != Some(WASH_PROGRAM) {
            self.command(CMD_SET_WASH_PROGRAM, Value::from(WASH_PROGRAM))
                .await?;
        }

        let dry_flag = if mode.dries() { DRY_MODE_ON } else { DRY_MODE_OFF };
        if snapshot.dry_mode != Some(dry_flag) {
            self.command(CMD_SET_DRY_MODE, Value::from(dry_flag)).await?;
        }

        let (command, arg) = if offset > 0 {
            (CMD_SET_APPOINT_TIME, Value::from(offset))
        } else {
            (CMD_SET_WASH_ACTION, Value::from(WASH_ACTION_START))
        };
        let response = self.command(command, arg).await?;
        Self::require_ack(command, response)
    }

    async fn stop_cycle(&self) -> Result<(), DeviceError> {
        let response = self
            .command(CMD_SET_WASH_ACTION, Value::from(WASH_ACTION_STOP))
            .await?;
        Self::require_ack(CMD_SET_WASH_ACTION, response)
    }

    async fn command(&self, command: &str, arg: Value) -> Result<Vec<Value>, DeviceError> {
        tracing::debug!(washer = %self.name, command, %arg, "sending command");
        self.device.send(command, &[arg]).await
    }

    fn require_ack(command: &str, response: Vec<Value>) -> Result<(), DeviceError> {
        if response.len() == 1 && response[0] == Value::from("ok") {
            Ok(())
        } else {
            Err(DeviceError::Rejected {
                command: command.to_string(),
                response,
            })
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WasherState> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Undecodable washer service payloads.
#[derive(Debug, thiserror::Error)]
enum WasherCallError {
    #[error("set_speed payload is missing the speed field")]
    MissingSpeed,
}

impl<T: DeviceTransport> Integration for Washer<T> {
    fn name(&self) -> &'static str {
        "washer"
    }

    async fn handle_service_call(
        &self,
        service: &str,
        data: serde_json::Value,
    ) -> Result<(), HestiaError> {
        let speed = data.get("speed").and_then(Value::as_str);
        match service {
            "turn_on" => {
                let _ = self.turn_on(speed).await;
                Ok(())
            }
            "turn_off" => {
                let _ = self.turn_off().await;
                Ok(())
            }
            "set_speed" => {
                let speed =
                    speed.ok_or(HestiaError::Payload(Box::new(WasherCallError::MissingSpeed)))?;
                self.set_speed(speed);
                Ok(())
            }
            other => Err(NotFoundError {
                entity: "Service",
                id: other.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    /// Scripted device: serves `get_prop` from a property table, records
    /// every write, acknowledges writes unless told not to.
    struct FakeDevice {
        props: StdMutex<HashMap<String, Value>>,
        sent: StdMutex<Vec<(String, Vec<Value>)>>,
        ack: bool,
        unreachable: bool,
    }

    impl FakeDevice {
        fn idle() -> Self {
            Self::with_props(HashMap::from([
                ("program".to_string(), Value::from(WASH_PROGRAM)),
                ("wash_process".to_string(), Value::from(0)),
                ("wash_status".to_string(), Value::from(0)),
                ("appoint_time".to_string(), Value::from(0)),
                ("DryMode".to_string(), Value::from(0)),
            ]))
        }

        fn with_props(props: HashMap<String, Value>) -> Self {
            Self {
                props: StdMutex::new(props),
                sent: StdMutex::new(Vec::new()),
                ack: true,
                unreachable: false,
            }
        }

        fn writes(&self) -> Vec<(String, Vec<Value>)> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .filter(|(command, _)| command != CMD_GET_PROP)
                .cloned()
                .collect()
        }

        fn reads(&self) -> usize {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .filter(|(command, _)| command == CMD_GET_PROP)
                .count()
        }
    }

    impl DeviceTransport for FakeDevice {
        async fn send(&self, command: &str, args: &[Value]) -> Result<Vec<Value>, DeviceError> {
            if self.unreachable {
                return Err(DeviceError::Unreachable(Box::new(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "timeout",
                ))));
            }
            self.sent
                .lock()
                .unwrap()
                .push((command.to_string(), args.to_vec()));
            if command == CMD_GET_PROP {
                let name = args[0].as_str().unwrap_or_default();
                return Ok(self
                    .props
                    .lock()
                    .unwrap()
                    .get(name)
                    .cloned()
                    .map_or_else(Vec::new, |value| vec![value]));
            }
            if self.ack {
                Ok(vec![Value::from("ok")])
            } else {
                Ok(vec![Value::from("busy")])
            }
        }
    }

    fn snapshot_idle() -> WasherSnapshot {
        WasherSnapshot {
            program: Some(WASH_PROGRAM.to_string()),
            wash_process: Some(0),
            wash_status: Some(0),
            appoint_time: Some(0),
            dry_mode: Some(0),
        }
    }

    #[tokio::test]
    async fn should_populate_snapshot_on_refresh() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);
        assert!(!washer.available());

        washer.refresh().await;

        assert!(washer.available());
        assert_eq!(device.reads(), TRACKED_PROPS.len());
        let attrs = washer.attributes().unwrap();
        assert_eq!(attrs["program"], Value::from(WASH_PROGRAM));
    }

    #[tokio::test]
    async fn should_turn_unavailable_when_poll_fails() {
        let mut device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);
        washer.refresh().await;
        assert!(washer.available());
        drop(washer);

        device.unreachable = true;
        let washer = Washer::new("Washer", &device);
        washer.refresh().await;
        assert!(!washer.available());
        assert!(washer.attributes().is_none());
    }

    #[tokio::test]
    async fn should_map_empty_read_response_to_missing_property() {
        let device = FakeDevice::with_props(HashMap::from([
            ("program".to_string(), Value::from(WASH_PROGRAM)),
            ("wash_status".to_string(), Value::from(0)),
        ]));
        let washer = Washer::new("Washer", &device);

        washer.refresh().await;

        let attrs = washer.attributes().unwrap();
        assert_eq!(attrs["wash_process"], Value::Null);
        assert_eq!(attrs["appoint_time"], Value::Null);
    }

    #[tokio::test]
    async fn should_derive_on_state_from_snapshot() {
        let device = FakeDevice::with_props(HashMap::from([
            ("program".to_string(), Value::from(WASH_PROGRAM)),
            ("wash_process".to_string(), Value::from(3)),
            ("wash_status".to_string(), Value::from(1)),
            ("appoint_time".to_string(), Value::from(0)),
            ("DryMode".to_string(), Value::from(0)),
        ]));
        let washer = Washer::new("Washer", &device);
        assert!(!washer.is_on());

        washer.refresh().await;
        assert!(washer.is_on());
    }

    #[tokio::test]
    async fn should_start_immediately_for_immediate_mode() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);
        washer.refresh().await;
        washer.set_speed("wash");

        assert!(washer.turn_on(None).await);

        let writes = device.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, CMD_SET_WASH_ACTION);
        assert_eq!(writes[0].1, vec![Value::from(WASH_ACTION_START)]);
    }

    #[tokio::test]
    async fn should_align_program_and_dry_flag_before_starting() {
        let device = FakeDevice::with_props(HashMap::from([
            ("program".to_string(), Value::from("dry")),
            ("wash_process".to_string(), Value::from(0)),
            ("wash_status".to_string(), Value::from(0)),
            ("appoint_time".to_string(), Value::from(0)),
            ("DryMode".to_string(), Value::from(0)),
        ]));
        let washer = Washer::new("Washer", &device);
        washer.refresh().await;
        washer.set_speed("wash_dry");

        assert!(washer.turn_on(None).await);

        let writes = device.writes();
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[0].0, CMD_SET_WASH_PROGRAM);
        assert_eq!(writes[0].1, vec![Value::from(WASH_PROGRAM)]);
        assert_eq!(writes[1].0, CMD_SET_DRY_MODE);
        assert_eq!(writes[1].1, vec![Value::from(DRY_MODE_ON)]);
        assert_eq!(writes[2].0, CMD_SET_WASH_ACTION);
    }

    #[tokio::test]
    async fn should_defer_start_with_nonzero_offset() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);

        washer
            .start_cycle(WashMode::ScheduledWash, &snapshot_idle(), 6)
            .await
            .unwrap();

        let writes = device.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, CMD_SET_APPOINT_TIME);
        assert_eq!(writes[0].1, vec![Value::from(6)]);
    }

    #[tokio::test]
    async fn should_start_immediately_when_offset_is_zero() {
        // The 6..=12 effective-hour gap falls back to an immediate start.
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);

        washer
            .start_cycle(WashMode::ScheduledWash, &snapshot_idle(), 0)
            .await
            .unwrap();

        let writes = device.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, CMD_SET_WASH_ACTION);
    }

    #[tokio::test]
    async fn should_fail_turn_on_without_a_snapshot() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);

        assert!(!washer.turn_on(None).await);
        assert!(device.writes().is_empty());
    }

    #[tokio::test]
    async fn should_fail_turn_on_when_device_rejects() {
        let mut device = FakeDevice::idle();
        device.ack = false;
        let washer = Washer::new("Washer", &device);
        washer.refresh().await;
        washer.set_speed("wash");

        assert!(!washer.turn_on(None).await);
    }

    #[tokio::test]
    async fn should_only_record_mode_when_speed_is_passed_to_turn_on() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);

        assert!(washer.turn_on(Some("wash_dry")).await);
        assert_eq!(washer.speed(), WashMode::WashDry);
        assert!(device.writes().is_empty());
    }

    #[tokio::test]
    async fn should_stop_cycle_on_turn_off() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);

        assert!(washer.turn_off().await);

        let writes = device.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, CMD_SET_WASH_ACTION);
        assert_eq!(writes[0].1, vec![Value::from(WASH_ACTION_STOP)]);
    }

    #[tokio::test]
    async fn should_skip_one_refresh_after_successful_command() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);
        washer.refresh().await;
        let reads_after_first = device.reads();

        washer.set_speed("wash");
        assert!(washer.turn_on(None).await);

        washer.refresh().await;
        assert_eq!(device.reads(), reads_after_first);

        washer.refresh().await;
        assert_eq!(device.reads(), reads_after_first * 2);
    }

    #[tokio::test]
    async fn should_fall_back_to_default_mode_for_unknown_speed() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);
        washer.set_speed("wash_dry");

        washer.set_speed("turbo");
        assert_eq!(washer.speed(), WashMode::ScheduledWash);
    }

    #[tokio::test]
    async fn should_handle_entity_service_calls() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);
        washer.refresh().await;

        washer
            .handle_service_call("set_speed", serde_json::json!({"speed": "wash"}))
            .await
            .unwrap();
        assert_eq!(washer.speed(), WashMode::Wash);

        washer
            .handle_service_call("turn_on", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(device.writes().last().unwrap().0, CMD_SET_WASH_ACTION);

        washer
            .handle_service_call("turn_off", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(
            device.writes().last().unwrap().1,
            vec![Value::from(WASH_ACTION_STOP)]
        );
    }

    #[tokio::test]
    async fn should_reject_set_speed_without_speed_field() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);
        let result = washer
            .handle_service_call("set_speed", serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(HestiaError::Payload(_))));
    }

    #[tokio::test]
    async fn should_reject_unknown_service_verb() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);
        let result = washer
            .handle_service_call("oscillate", serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(HestiaError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_expose_the_full_speed_list() {
        let device = FakeDevice::idle();
        let washer = Washer::new("Washer", &device);
        assert_eq!(
            washer.speed_list(),
            vec!["wash", "wash_dry", "scheduled_wash", "scheduled_wash_dry"]
        );
    }
}
