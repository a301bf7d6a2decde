//! Bind registry and dispatch
//!
//! [`BindManager`] owns every registered action, the category list, the
//! attached devices and the many-to-many mapping between binds and actions.
//! It is an explicit context object: the host constructs one at startup,
//! feeds it press events and frame ticks from its main thread, and drops it
//! at shutdown. Nothing in here is thread-safe and nothing needs to be.
//!
//! Each action keeps its own ordered bind list. An entry is either a live
//! bind or a persisted payload waiting for its device; detaching a device
//! turns its entries into payloads in place, so reattaching restores the
//! list exactly. The bind → actions map is the reverse index used for
//! dispatch and is kept in step with the live entries.
//!
//! Every operation that changes which actions or binds exist cancels the
//! running key repeats first, so a repeat never fires for an action that
//! was removed or rebound while its key was held.

mod dispatch;
mod persist;

use indexmap::IndexMap;

use crate::action::{ActionId, BindableAction, RepeatOptions};
use crate::bind::{Bind, Device, DeviceId, KeyboardDevice};
use crate::category::Category;
use crate::config::InputConfig;
use crate::events::{InvokeBindEvent, Listeners, PressBindEvent};
use crate::store::{BindStore, MemoryStore};

/// One entry of an action's bind list
#[derive(Debug, Clone, PartialEq, Eq)]
enum BindSlot {
    Live(Bind),
    /// Payload for a device that isn't attached
    Pending { device: DeviceId, payload: String },
}

impl BindSlot {
    fn live(&self) -> Option<Bind> {
        match self {
            BindSlot::Live(bind) => Some(*bind),
            BindSlot::Pending { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
struct ActionData {
    definition: BindableAction,
    repeat: RepeatOptions,
    binds: Vec<BindSlot>,
}

impl ActionData {
    fn has_live(&self, bind: &Bind) -> bool {
        self.binds.iter().any(|slot| slot.live().as_ref() == Some(bind))
    }
}

/// Central registry of actions, categories, devices and binds
pub struct BindManager<S = MemoryStore> {
    binds: IndexMap<Bind, Vec<ActionId>>,
    devices: IndexMap<DeviceId, Box<dyn Device>>,
    actions: Vec<(ActionId, ActionData)>,
    categories: Vec<Category>,
    repeating: Vec<(ActionId, f32)>,
    repeat_scheduled: bool,
    invoke_listeners: Listeners<InvokeBindEvent>,
    press_listeners: Listeners<PressBindEvent>,
    config: InputConfig,
    store: S,
}

impl BindManager<MemoryStore> {
    /// Manager with default config and an in-memory store
    pub fn new() -> Self {
        Self::with_store(InputConfig::default(), MemoryStore::new())
    }
}

impl Default for BindManager<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BindStore> BindManager<S> {
    /// Create a manager that restores and persists binds through `store`.
    ///
    /// Starts with the `Global`, `Play` and `Editor` categories and the
    /// keyboard device attached.
    pub fn with_store(config: InputConfig, store: S) -> Self {
        let mut manager = Self {
            binds: IndexMap::new(),
            devices: IndexMap::new(),
            actions: Vec::new(),
            categories: Vec::new(),
            repeating: Vec::new(),
            repeat_scheduled: false,
            invoke_listeners: Listeners::new(),
            press_listeners: Listeners::new(),
            config,
            store,
        };
        manager.add_category(Category::GLOBAL);
        manager.add_category(Category::PLAY);
        manager.add_category(Category::EDITOR);
        manager.attach_device(Box::new(KeyboardDevice));
        manager
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ------------------------------------------------------------------
    // Devices
    // ------------------------------------------------------------------

    /// Register a device, replacing any device with the same id, and
    /// resolve the binds that were waiting for it.
    ///
    /// Pending payloads for the device are cleared whether or not they
    /// decode; ones that fail are logged and dropped.
    pub fn attach_device(&mut self, device: Box<dyn Device>) {
        self.stop_all_repeats();
        let id = device.id().to_string();
        self.detach_device(&id);
        tracing::debug!("Attached device {}", id);

        for (action, data) in &mut self.actions {
            let live: Vec<Bind> = data.binds.iter().filter_map(BindSlot::live).collect();
            let mut kept = Vec::with_capacity(data.binds.len());
            for slot in data.binds.drain(..) {
                let payload = match slot {
                    BindSlot::Pending { device: owner, payload } if owner == id => payload,
                    other => {
                        kept.push(other);
                        continue;
                    }
                };
                let Some(bind) = device.load_bind(&payload) else {
                    tracing::warn!("Dropping undecodable bind {}:{} for {}", id, payload, action);
                    continue;
                };
                if live.contains(&bind) || kept.contains(&BindSlot::Live(bind)) {
                    continue;
                }
                assign(&mut self.binds, bind, action);
                kept.push(BindSlot::Live(bind));
            }
            data.binds = kept;
        }

        self.devices.insert(id, device);
    }

    /// Turn every live bind the device encodes into a pending payload and
    /// unregister the device. Returns the removed device, if any.
    ///
    /// Without an attached device of that id, the binds whose own device
    /// id matches are parked with their canonical payload.
    pub fn detach_device(&mut self, id: &str) -> Option<Box<dyn Device>> {
        self.stop_all_repeats();
        let removed = self.devices.shift_remove(id);

        for (action, data) in &mut self.actions {
            for slot in &mut data.binds {
                let Some(bind) = slot.live() else {
                    continue;
                };
                let payload = match &removed {
                    Some(device) => device.save_bind(&bind),
                    None => (bind.device_id() == id).then(|| bind.payload()),
                };
                let Some(payload) = payload else {
                    continue;
                };
                *slot = BindSlot::Pending {
                    device: id.to_string(),
                    payload,
                };
                unassign(&mut self.binds, &bind, action);
            }
        }

        if removed.is_some() {
            tracing::debug!("Detached device {}", id);
        }
        removed
    }

    pub fn has_device(&self, id: &str) -> bool {
        self.devices.contains_key(id)
    }

    /// Persisted payloads of `action` waiting for `device` to be attached
    pub fn deviceless_binds(&self, device: &str, action: &str) -> Vec<&str> {
        self.find_action(action)
            .map(|data| {
                data.binds
                    .iter()
                    .filter_map(|slot| match slot {
                        BindSlot::Pending { device: owner, payload } if owner == device => {
                            Some(payload.as_str())
                        }
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Register an action after the action `after` (or at the end when
    /// `after` is empty or unknown). Restores persisted binds, or applies
    /// the declared defaults when nothing was persisted.
    ///
    /// Returns false if an action with the same id is already registered.
    pub fn register_bindable(&mut self, action: BindableAction, after: &str) -> bool {
        self.stop_all_repeats();
        if self.find_action(action.id()).is_some() {
            tracing::debug!("Action {} is already registered", action.id());
            return false;
        }

        let id = action.id().to_string();
        let category = action.category().clone();
        let entry = (
            id.clone(),
            ActionData {
                definition: action,
                repeat: self.config.repeat,
                binds: Vec::new(),
            },
        );
        match self.actions.iter().position(|(a, _)| !after.is_empty() && a == after) {
            Some(ix) => self.actions.insert(ix + 1, entry),
            None => self.actions.push(entry),
        }

        self.add_category(category);
        if !self.load_action_binds(&id) {
            let defaults = self
                .get_bindable(&id)
                .map(|a| a.defaults().to_vec())
                .unwrap_or_default();
            for bind in defaults {
                self.add_bind_to(&id, bind);
            }
        }
        tracing::debug!("Registered action {}", id);
        true
    }

    /// Unbind and forget an action, pending payloads included.
    /// Unknown ids are ignored.
    pub fn remove_bindable(&mut self, action: &str) {
        self.stop_all_repeats();
        self.remove_all_binds_from(action);
        self.actions.retain(|(id, _)| id != action);
    }

    pub fn get_bindable(&self, action: &str) -> Option<&BindableAction> {
        self.find_action(action).map(|data| &data.definition)
    }

    /// All actions in registration order
    pub fn get_all_bindables(&self) -> Vec<&BindableAction> {
        self.actions.iter().map(|(_, data)| &data.definition).collect()
    }

    /// Actions directly in `category`, or also in its subcategories when `sub`
    pub fn get_bindables_in(&self, category: &Category, sub: bool) -> Vec<&BindableAction> {
        self.actions
            .iter()
            .map(|(_, data)| &data.definition)
            .filter(|action| {
                if sub {
                    action.category().has_parent(category)
                } else {
                    action.category() == category
                }
            })
            .collect()
    }

    /// Actions currently assigned to `bind`
    pub fn get_bindables_for(&self, bind: &Bind) -> Vec<&BindableAction> {
        self.binds
            .get(bind)
            .map(|actions| {
                actions
                    .iter()
                    .filter_map(|id| self.get_bindable(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `None` for unknown or non-repeatable actions
    pub fn get_repeat_options_for(&self, action: &str) -> Option<RepeatOptions> {
        self.find_action(action)
            .filter(|data| data.definition.is_repeatable())
            .map(|data| data.repeat)
    }

    pub fn set_repeat_options_for(&mut self, action: &str, options: RepeatOptions) {
        self.stop_all_repeats();
        if let Some(data) = self.find_action_mut(action) {
            data.repeat = options;
        }
    }

    fn find_action(&self, action: &str) -> Option<&ActionData> {
        find_action(&self.actions, action)
    }

    fn find_action_mut(&mut self, action: &str) -> Option<&mut ActionData> {
        self.actions
            .iter_mut()
            .find(|(id, _)| id == action)
            .map(|(_, data)| data)
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub fn get_all_categories(&self) -> &[Category] {
        &self.categories
    }

    /// Add a category, adding its missing parents first.
    ///
    /// A subcategory is inserted after its parent's last existing
    /// descendant, so every parent is followed by its whole subtree.
    /// Top-level categories are appended. The empty category is never listed.
    pub fn add_category(&mut self, category: impl Into<Category>) {
        let category = category.into();
        self.stop_all_repeats();
        if category.is_empty() || self.categories.contains(&category) {
            return;
        }

        let index = match category.parent() {
            Some(parent) => {
                self.add_category(parent.clone());
                let start = self
                    .categories
                    .iter()
                    .position(|c| *c == parent)
                    .map_or(self.categories.len(), |ix| ix + 1);
                start
                    + self.categories[start..]
                        .iter()
                        .take_while(|c| c.has_parent(&parent))
                        .count()
            }
            None => self.categories.len(),
        };
        tracing::debug!("Adding category {} at {}", category, index);
        self.categories.insert(index, category);
    }

    /// Remove a category, its subcategories, and every action in them
    pub fn remove_category(&mut self, category: &Category) {
        self.stop_all_repeats();
        let doomed: Vec<ActionId> = self
            .get_bindables_in(category, true)
            .into_iter()
            .map(|action| action.id().to_string())
            .collect();
        for action in doomed {
            self.remove_bindable(&action);
        }
        self.categories.retain(|c| !c.has_parent(category));
    }

    // ------------------------------------------------------------------
    // Binds
    // ------------------------------------------------------------------

    /// Append `bind` to the action's list. No-op for unknown actions or
    /// binds the action already has.
    pub fn add_bind_to(&mut self, action: &str, bind: Bind) {
        self.stop_all_repeats();
        let Some(data) = self.find_action_mut(action) else {
            tracing::debug!("Not binding {} to unknown action {}", bind, action);
            return;
        };
        if data.has_live(&bind) {
            return;
        }
        data.binds.push(BindSlot::Live(bind));
        assign(&mut self.binds, bind, action);
        tracing::debug!("Bound {} to {}", bind, action);
    }

    /// Unassign `bind` from `action`; the bind's entry goes away with its last action
    pub fn remove_bind_from(&mut self, action: &str, bind: &Bind) {
        self.stop_all_repeats();
        if let Some(data) = self.find_action_mut(action) {
            data.binds.retain(|slot| slot.live().as_ref() != Some(bind));
        }
        unassign(&mut self.binds, bind, action);
    }

    /// Drop every live bind of `action`. Pending payloads stay.
    pub fn remove_all_binds_from(&mut self, action: &str) {
        self.stop_all_repeats();
        if let Some(data) = self.find_action_mut(action) {
            data.binds.retain(|slot| slot.live().is_none());
        }
        for actions in self.binds.values_mut() {
            actions.retain(|a| a != action);
        }
        self.binds.retain(|_, actions| !actions.is_empty());
    }

    /// Live binds of `action`, in the order they were added to it
    pub fn get_binds_for(&self, action: &str) -> Vec<Bind> {
        self.find_action(action)
            .map(|data| data.binds.iter().filter_map(BindSlot::live).collect())
            .unwrap_or_default()
    }

    pub fn reset_binds_to_default(&mut self, action: &str) {
        self.stop_all_repeats();
        self.remove_all_binds_from(action);
        let defaults = self
            .get_bindable(action)
            .map(|a| a.defaults().to_vec())
            .unwrap_or_default();
        for bind in defaults {
            self.add_bind_to(action, bind);
        }
    }

    /// True if the action's binds equal its defaults, in order
    pub fn has_default_binds(&self, action: &str) -> bool {
        match self.get_bindable(action) {
            Some(bindable) => self.get_binds_for(action) == bindable.defaults(),
            None => false,
        }
    }

    /// Whether any action is bound to exactly this input
    pub fn is_bound(&self, bind: &Bind) -> bool {
        self.binds.contains_key(bind)
    }
}

fn find_action<'a>(actions: &'a [(ActionId, ActionData)], id: &str) -> Option<&'a ActionData> {
    actions
        .iter()
        .find(|(action, _)| action == id)
        .map(|(_, data)| data)
}

fn assign(binds: &mut IndexMap<Bind, Vec<ActionId>>, bind: Bind, action: &str) {
    let actions = binds.entry(bind).or_default();
    if !actions.iter().any(|a| a == action) {
        actions.push(action.to_string());
    }
}

fn unassign(binds: &mut IndexMap<Bind, Vec<ActionId>>, bind: &Bind, action: &str) {
    if let Some(actions) = binds.get_mut(bind) {
        actions.retain(|a| a != action);
        if actions.is_empty() {
            binds.shift_remove(bind);
        }
    }
}
