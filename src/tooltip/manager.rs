//! Registry of tooltip attachments.
//!
//! Hosts report enter/leave per binding and timer expiry per timer handle.
//! The manager keeps the mapping back to the owning controller so callers
//! only need to forward every [`HostEvent`] to [`TooltipManager::dispatch`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::host::{BindingId, HostEvent, HostSurface};
use crate::tooltip::attachment::Attachment;
use crate::tooltip::controller::{ControllerState, TooltipController, Transition};
use crate::tooltip::options::{ConfigPatch, TooltipOptions};
use crate::tooltip::placement::PlacementConfig;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TooltipId(pub u64);

impl fmt::Display for TooltipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tooltip#{}", self.0)
    }
}

#[derive(Debug)]
struct Entry {
    controller: TooltipController,
    binding: BindingId,
}

/// Owns every attached tooltip controller.
#[derive(Debug, Default)]
pub struct TooltipManager {
    placement: PlacementConfig,
    entries: BTreeMap<TooltipId, Entry>,
    by_binding: HashMap<BindingId, TooltipId>,
    next_id: u64,
}

impl TooltipManager {
    pub fn new(placement: PlacementConfig) -> Self {
        Self {
            placement,
            ..Self::default()
        }
    }

    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Validate `options`, bind enter/leave on the host and start tracking
    /// the attachment.
    pub fn attach<H: HostSurface + ?Sized>(
        &mut self,
        host: &mut H,
        attachment: Attachment,
        options: TooltipOptions,
    ) -> Result<TooltipId> {
        let controller = TooltipController::new(attachment, options, self.placement)?;
        let binding = host.bind_enter_leave(&attachment.target())?;

        self.next_id += 1;
        let id = TooltipId(self.next_id);
        self.by_binding.insert(binding, id);
        self.entries.insert(id, Entry { controller, binding });
        tracing::debug!(%id, %binding, kind = attachment.kind(), "tooltip attached");
        Ok(id)
    }

    /// Hide the tooltip if visible, unbind it and forget it.
    pub fn detach<H: HostSurface + ?Sized>(&mut self, host: &mut H, id: TooltipId) -> Result<()> {
        let mut entry = self
            .entries
            .remove(&id)
            .ok_or_else(|| Error::invalid(format!("{} is not attached", id)))?;
        entry.controller.dismiss(host);
        host.unbind(entry.binding);
        self.by_binding.remove(&entry.binding);
        tracing::debug!(%id, "tooltip detached");
        Ok(())
    }

    pub fn reconfigure(&mut self, id: TooltipId, patch: ConfigPatch) -> Result<()> {
        self.entries
            .get_mut(&id)
            .ok_or_else(|| Error::invalid(format!("{} is not attached", id)))?
            .controller
            .reconfigure(patch)
    }

    /// Route one host notification to its controller.
    ///
    /// Returns the resulting transition, or an empty list when no attachment
    /// owns the binding or timer.
    pub fn dispatch<H: HostSurface + ?Sized>(&mut self, host: &mut H, event: HostEvent) -> Vec<(TooltipId, Transition)> {
        match event {
            HostEvent::Enter(binding) => self
                .entry_for_binding(binding)
                .map(|(id, entry)| (id, entry.controller.on_enter(host)))
                .into_iter()
                .collect(),
            HostEvent::Leave(binding) => self
                .entry_for_binding(binding)
                .map(|(id, entry)| (id, entry.controller.on_leave(host)))
                .into_iter()
                .collect(),
            HostEvent::TimerFired(timer) => self
                .entries
                .iter_mut()
                .filter(|(_, entry)| entry.controller.owns_timer(timer))
                .map(|(&id, entry)| (id, entry.controller.on_timeout(host, timer)))
                .collect(),
        }
    }

    /// Dispatch a batch of notifications in order.
    pub fn dispatch_all<H, I>(&mut self, host: &mut H, events: I) -> Vec<(TooltipId, Transition)>
    where
        H: HostSurface + ?Sized,
        I: IntoIterator<Item = HostEvent>,
    {
        events
            .into_iter()
            .flat_map(|event| self.dispatch(host, event))
            .collect()
    }

    fn entry_for_binding(&mut self, binding: BindingId) -> Option<(TooltipId, &mut Entry)> {
        let id = *self.by_binding.get(&binding)?;
        self.entries.get_mut(&id).map(|entry| (id, entry))
    }

    pub fn controller(&self, id: TooltipId) -> Option<&TooltipController> {
        self.entries.get(&id).map(|e| &e.controller)
    }

    pub fn state(&self, id: TooltipId) -> Option<&ControllerState> {
        self.controller(id).map(|c| c.state())
    }

    pub fn binding(&self, id: TooltipId) -> Option<BindingId> {
        self.entries.get(&id).map(|e| e.binding)
    }

    pub fn ids(&self) -> impl Iterator<Item = TooltipId> + '_ {
        self.entries.keys().copied()
    }

    pub fn visible_count(&self) -> usize {
        self.entries.values().filter(|e| e.controller.is_visible()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
