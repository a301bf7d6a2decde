//! Save strings and per-action records
//!
//! A save string is `"<device id>:<payload>"`, split on the first `:`.
//! Records are parsed whole before anything is applied, so a broken record
//! never leaves an action half-restored.

use crate::bind::Bind;
use crate::store::{BindSaveData, BindStore};

use super::{assign, BindManager, BindSlot};

/// Split a save string into device id and payload
fn parse_bind_save(data: &str) -> Option<(&str, &str)> {
    data.split_once(':')
}

impl<S: BindStore> BindManager<S> {
    /// Device id and payload for `bind`.
    ///
    /// The device named by the bind wins; otherwise the first attached
    /// device that can encode it. With neither, the canonical form.
    fn save_parts(&self, bind: &Bind) -> (String, String) {
        let own = self
            .devices
            .get(bind.device_id())
            .and_then(|device| device.save_bind(bind))
            .map(|payload| (bind.device_id().to_string(), payload));
        own.or_else(|| {
            self.devices
                .iter()
                .find_map(|(id, device)| device.save_bind(bind).map(|p| (id.clone(), p)))
        })
        .unwrap_or_else(|| (bind.device_id().to_string(), bind.payload()))
    }

    /// `"<device id>:<payload>"` for `bind`
    pub fn get_bind_save_string(&self, bind: &Bind) -> String {
        let (device, payload) = self.save_parts(bind);
        format!("{}:{}", device, payload)
    }

    /// Decode a save string with the attached device it names
    pub fn load_bind_from_save_string(&self, data: &str) -> Option<Bind> {
        let (device, payload) = parse_bind_save(data)?;
        self.devices.get(device)?.load_bind(payload)
    }

    /// Restore an action's binds and repeat options from the store.
    ///
    /// Returns false when nothing usable was persisted; the caller then
    /// applies defaults. Strings for devices that aren't attached (or that
    /// fail to decode) are kept in place as pending entries for later.
    pub(super) fn load_action_binds(&mut self, action: &str) -> bool {
        let Some(value) = self.store.get(action) else {
            return false;
        };
        let data: BindSaveData = match serde_json::from_value(value) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Ignoring saved binds for {}: {}", action, e);
                return false;
            }
        };

        let mut slots: Vec<BindSlot> = Vec::with_capacity(data.binds.len());
        for entry in &data.binds {
            if let Some(bind) = self.load_bind_from_save_string(entry) {
                if !slots.contains(&BindSlot::Live(bind)) {
                    slots.push(BindSlot::Live(bind));
                }
                continue;
            }
            match parse_bind_save(entry) {
                Some((device, payload)) if !device.is_empty() => {
                    tracing::debug!("Keeping {} for {} until its device attaches", entry, action);
                    slots.push(BindSlot::Pending {
                        device: device.to_string(),
                        payload: payload.to_string(),
                    });
                }
                _ => tracing::warn!("Dropping malformed bind {:?} for {}", entry, action),
            }
        }

        for bind in slots.iter().filter_map(BindSlot::live) {
            assign(&mut self.binds, bind, action);
        }
        if let Some(entry) = self.find_action_mut(action) {
            entry.binds = slots;
            if let Some(repeat) = data.repeat {
                entry.repeat = repeat;
            }
        }
        true
    }

    /// Write one action's record, live and pending entries in list order
    pub(super) fn save_action_binds(&mut self, action: &str) {
        let binds: Vec<String> = self
            .find_action(action)
            .map(|data| {
                data.binds
                    .iter()
                    .map(|slot| match slot {
                        BindSlot::Live(bind) => self.get_bind_save_string(bind),
                        BindSlot::Pending { device, payload } => format!("{}:{}", device, payload),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let data = BindSaveData {
            binds,
            repeat: self.get_repeat_options_for(action),
        };
        match serde_json::to_value(&data) {
            Ok(value) => self.store.set(action, value),
            Err(e) => tracing::warn!("Failed to serialize binds for {}: {}", action, e),
        }
    }

    /// Persist every registered action into the store
    pub fn save(&mut self) {
        let ids: Vec<String> = self.actions.iter().map(|(id, _)| id.clone()).collect();
        for id in &ids {
            self.save_action_binds(id);
        }
        tracing::debug!("Saved binds for {} actions", ids.len());
    }
}
