//! Rule execution — read the sensor, pick the band, drive the target.

use chrono::Timelike;

use hestia_domain::entity::{AttributeValue, EntitySnapshot};
use hestia_domain::error::HestiaError;
use hestia_domain::service::ServiceCall;
use hestia_domain::time::local_time;

use hestia_app::ports::{ServiceDispatcher, StateStore};

use crate::resolver::{alt_window_active, resolve};
use crate::rule::ThresholdRule;

/// Executes threshold rules against the host's state store and dispatcher.
pub struct RuleExecutor<S, D> {
    pub(crate) store: S,
    pub(crate) dispatcher: D,
}

impl<S, D> RuleExecutor<S, D>
where
    S: StateStore,
    D: ServiceDispatcher,
{
    /// Create a new executor.
    pub fn new(store: S, dispatcher: D) -> Self {
        Self { store, dispatcher }
    }

    /// Execute one rule now.
    ///
    /// Missing or non-numeric sensor state and missing target entities abort
    /// the rule after an error log — no call is made and no error surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Dispatch`] when the host rejects an issued
    /// service call.
    pub async fn execute(&self, rule: &ThresholdRule) -> Result<(), HestiaError> {
        self.execute_at(rule, local_time().hour()).await
    }

    async fn execute_at(&self, rule: &ThresholdRule, hour: u32) -> Result<(), HestiaError> {
        let Some(value) = self.read_sensor(rule).await else {
            return Ok(());
        };

        let Some(entity) = self.store.get_state(&rule.entity_id).await else {
            tracing::error!(entity = %rule.entity_id, "target entity has no state");
            return Ok(());
        };

        // Inside the alternate window only the threshold list switches;
        // the output list stays the primary one.
        let thresholds = match &rule.alt_sensor_values {
            Some(alt) if alt_window_active(hour, rule.alt_time_range) => alt.as_slice(),
            _ => rule.sensor_values.as_slice(),
        };

        match resolve(value, thresholds, &rule.entity_values) {
            Some(to_value) => self.apply(rule, &entity, value, to_value).await,
            None => self.fall_below(rule, &entity, value).await,
        }
    }

    /// The sensor entered a band: make sure the target carries its value.
    async fn apply(
        &self,
        rule: &ThresholdRule,
        entity: &EntitySnapshot,
        value: f64,
        to_value: &serde_json::Value,
    ) -> Result<(), HestiaError> {
        let from_value = match &rule.entity_attr {
            Some(attr) => entity
                .attribute(attr)
                .map_or(serde_json::Value::Null, AttributeValue::to_json),
            None => serde_json::Value::String(entity.state.clone()),
        };

        if entity.is_off() {
            tracing::warn!(entity = %entity.friendly_name(), "target is off, turning on");
            self.dispatcher
                .call_service(ServiceCall::turn_on(&rule.entity_id))
                .await?;
        }

        if from_value == *to_value {
            tracing::debug!(
                sensor = %rule.sensor_id,
                value,
                entity = %entity.friendly_name(),
                current = %from_value,
                "already at target value"
            );
            return Ok(());
        }

        let Some(attr) = rule.target_attr() else {
            tracing::error!(entity = %rule.entity_id, "rule has no target attribute");
            return Ok(());
        };
        tracing::warn!(
            sensor = %rule.sensor_id,
            value,
            entity = %entity.friendly_name(),
            from = %from_value,
            to = %to_value,
            service = %rule.service_name(),
            "actuating"
        );
        self.dispatcher
            .call_service(ServiceCall::set_attribute(
                &rule.entity_id,
                rule.service_name(),
                attr,
                to_value.clone(),
            ))
            .await
    }

    /// The sensor sits below every band: turn-off semantics.
    async fn fall_below(
        &self,
        rule: &ThresholdRule,
        entity: &EntitySnapshot,
        value: f64,
    ) -> Result<(), HestiaError> {
        if entity.is_off() {
            tracing::debug!(
                sensor = %rule.sensor_id,
                value,
                entity = %entity.friendly_name(),
                "below all thresholds, already off"
            );
            return Ok(());
        }
        tracing::warn!(
            sensor = %rule.sensor_id,
            value,
            entity = %entity.friendly_name(),
            state = %entity.state,
            "below all thresholds, turning off"
        );
        self.dispatcher
            .call_service(ServiceCall::turn_off(&rule.entity_id))
            .await
    }

    async fn read_sensor(&self, rule: &ThresholdRule) -> Option<f64> {
        let Some(sensor) = self.store.get_state(&rule.sensor_id).await else {
            tracing::error!(sensor = %rule.sensor_id, "sensor has no state");
            return None;
        };
        let value = match &rule.sensor_attr {
            Some(attr) => sensor.attribute_as_f64(attr),
            None => sensor.state_as_f64(),
        };
        if value.is_none() {
            tracing::error!(
                sensor = %rule.sensor_id,
                attr = rule.sensor_attr.as_deref().unwrap_or(""),
                state = %sensor.state,
                "sensor value is not numeric"
            );
        }
        value
    }
}
