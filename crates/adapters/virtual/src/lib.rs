//! # hestia-adapter-virtual
//!
//! Simulated washer device for testing and demonstration purposes. Speaks
//! the same property protocol as the real appliance: `get_prop` reads from
//! an in-memory table; writes mutate the table and answer `["ok"]`.
//!
//! ## Dependency rule
//!
//! Depends on `hestia-app` (port traits) only.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use hestia_app::ports::{DeviceError, DeviceTransport};

/// In-memory washer: an idle machine on the `goldenwash` program.
pub struct VirtualWasher {
    props: Mutex<HashMap<String, Value>>,
}

impl Default for VirtualWasher {
    fn default() -> Self {
        Self {
            props: Mutex::new(HashMap::from([
                ("program".to_string(), Value::from("goldenwash")),
                ("wash_process".to_string(), Value::from(0)),
                ("wash_status".to_string(), Value::from(0)),
                ("appoint_time".to_string(), Value::from(0)),
                ("DryMode".to_string(), Value::from(0)),
            ])),
        }
    }
}

impl VirtualWasher {
    /// Current value of one property (test/demo helper).
    #[must_use]
    pub fn prop(&self, name: &str) -> Option<Value> {
        self.lock().get(name).cloned()
    }

    /// Overwrite one property (test/demo helper).
    pub fn set_prop(&self, name: impl Into<String>, value: Value) {
        self.lock().insert(name.into(), value);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.props
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn handle_write(&self, command: &str, arg: Option<&Value>) -> Vec<Value> {
        let mut props = self.lock();
        match (command, arg) {
            ("set_wash_program", Some(program)) => {
                props.insert("program".to_string(), program.clone());
            }
            ("SetDryMode", Some(flag)) => {
                props.insert("DryMode".to_string(), flag.clone());
            }
            ("set_appoint_time", Some(hours)) => {
                // Arming a deferred start also marks the machine active.
                props.insert("appoint_time".to_string(), hours.clone());
                props.insert("wash_status".to_string(), Value::from(1));
            }
            ("set_wash_action", Some(action)) if action.as_i64() == Some(1) => {
                props.insert("wash_status".to_string(), Value::from(1));
                props.insert("wash_process".to_string(), Value::from(1));
            }
            ("set_wash_action", Some(action)) if action.as_i64() == Some(2) => {
                props.insert("wash_status".to_string(), Value::from(0));
                props.insert("wash_process".to_string(), Value::from(0));
                props.insert("appoint_time".to_string(), Value::from(0));
            }
            // Unknown command: no acknowledgement, callers treat it as a
            // rejection.
            _ => return Vec::new(),
        }
        vec![Value::from("ok")]
    }
}

impl DeviceTransport for VirtualWasher {
    async fn send(&self, command: &str, args: &[Value]) -> Result<Vec<Value>, DeviceError> {
        if command == "get_prop" {
            let name = args.first().and_then(Value::as_str).unwrap_or_default();
            return Ok(self.prop(name).map_or_else(Vec::new, |value| vec![value]));
        }
        Ok(self.handle_write(command, args.first()))
    }
}
