use log::debug;

use crate::{
    build_stabilizer, Landmark, StabilizationConfig, Stabilizer, StabilizerError, Viewport,
};

/// One independent stabilizer per detection slot (e.g. one per tracked face).
///
/// Slots are built lazily on their first update and never share state.
pub struct StabilizerSet {
    config: StabilizationConfig,
    slots: Vec<Option<Box<dyn Stabilizer>>>,
    passthrough: Vec<Landmark>,
}

impl StabilizerSet {
    pub fn new(config: StabilizationConfig) -> Result<Self, StabilizerError> {
        config.validate()?;
        Ok(Self {
            config,
            slots: Vec::new(),
            passthrough: Vec::new(),
        })
    }

    pub fn config(&self) -> &StabilizationConfig {
        &self.config
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut Box<dyn Stabilizer>, StabilizerError> {
        if slot >= self.slots.len() {
            self.slots.resize_with(slot + 1, || None);
        }
        let entry = &mut self.slots[slot];
        let stabilizer = match entry.take() {
            Some(stabilizer) => stabilizer,
            None => {
                debug!("Creating {:?} stabilizer for slot {}", self.config.kind, slot);
                build_stabilizer(&self.config)?
            }
        };
        Ok(entry.insert(stabilizer))
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Turns stabilization on or off at runtime.
    ///
    /// History gathered before disabling is stale once re-enabled, so every
    /// slot is reset on the way back on.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.config.enabled {
            self.reset_all();
        }
        debug!("Stabilization {}", if enabled { "enabled" } else { "disabled" });
        self.config.enabled = enabled;
    }

    fn pass_through(&mut self, landmarks: &[Landmark]) -> &[Landmark] {
        self.passthrough.clear();
        self.passthrough.extend_from_slice(landmarks);
        &self.passthrough
    }

    pub fn update(
        &mut self,
        slot: usize,
        landmarks: &[Landmark],
        viewport: Viewport,
    ) -> Result<&[Landmark], StabilizerError> {
        if !self.config.enabled {
            return Ok(self.pass_through(landmarks));
        }
        Ok(self.slot_mut(slot)?.update(landmarks, viewport))
    }

    pub fn update_at(
        &mut self,
        slot: usize,
        landmarks: &[Landmark],
        viewport: Viewport,
        timestamp: f64,
    ) -> Result<&[Landmark], StabilizerError> {
        if !self.config.enabled {
            return Ok(self.pass_through(landmarks));
        }
        Ok(self.slot_mut(slot)?.update_at(landmarks, viewport, timestamp))
    }

    /// Resets the slot's stabilizer after its detection was lost.
    pub fn mark_lost(&mut self, slot: usize) {
        if let Some(Some(stabilizer)) = self.slots.get_mut(slot) {
            stabilizer.reset();
        }
    }

    pub fn reset_all(&mut self) {
        debug!("Resetting all {} stabilizer slots", self.slots.len());
        for stabilizer in self.slots.iter_mut().flatten() {
            stabilizer.reset();
        }
    }

    pub fn get(&self, slot: usize) -> Option<&dyn Stabilizer> {
        self.slots.get(slot)?.as_deref()
    }

    /// Number of slots with a live stabilizer.
    pub fn active_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
