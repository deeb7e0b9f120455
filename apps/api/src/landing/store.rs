use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::landing::element::{ElementKind, Payload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MountOutcome {
    /// First mount: a default single-entry payload was written.
    Seeded,
    /// The element was initialized before, possibly emptied since.
    Existing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutElement {
    pub id: String,
    pub payload: Payload,
}

/// Flat map from element id to payload. Each id is owned by exactly one
/// element on the canvas, so writes are last-writer-wins with no merging.
///
/// Presence in the map doubles as the initialized flag: an element the user
/// emptied stays in the map with an empty payload and is never re-seeded.
#[derive(Debug, Default)]
pub struct LayoutStore {
    elements: HashMap<String, Payload>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, id: &str) -> Option<&Payload> {
        self.elements.get(id)
    }

    /// Replaces the whole payload for `id`.
    pub fn write(&mut self, id: &str, payload: Payload) {
        debug!("Layout element {id} now holds {} entries", payload.len());
        self.elements.insert(id.to_string(), payload);
    }

    /// Seeds `id` with the kind's default payload unless it was initialized
    /// before. Returns what the element holds afterwards.
    pub fn mount(
        &mut self,
        id: &str,
        kind: ElementKind,
    ) -> Result<(MountOutcome, Payload), AppError> {
        if let Some(existing) = self.elements.get(id) {
            ensure_kind(id, existing.kind(), kind)?;
            return Ok((MountOutcome::Existing, existing.clone()));
        }
        let payload = kind.default_payload();
        self.write(id, payload.clone());
        info!("Seeded layout element {id} as {kind:?}");
        Ok((MountOutcome::Seeded, payload))
    }

    /// Writes a user edit to a mounted element. The payload must keep the
    /// element's kind. Kinds that need distinct values reject repeats. Any
    /// rejection leaves the stored payload untouched.
    pub fn commit(&mut self, id: &str, payload: Payload) -> Result<(), AppError> {
        let stored = self
            .elements
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Layout element {id} is not mounted")))?;
        ensure_kind(id, stored.kind(), payload.kind())?;

        let duplicates = payload.duplicates();
        if !duplicates.is_empty() {
            warn!("Rejected commit to layout element {id}: duplicate values {duplicates:?}");
            return Err(AppError::DuplicateValue(duplicates));
        }
        if payload.is_empty() {
            debug!("Layout element {id} emptied by user");
        }
        self.write(id, payload);
        Ok(())
    }

    /// All elements, ordered by id.
    pub fn snapshot(&self) -> Vec<LayoutElement> {
        let mut elements: Vec<LayoutElement> = self
            .elements
            .iter()
            .map(|(id, payload)| LayoutElement {
                id: id.clone(),
                payload: payload.clone(),
            })
            .collect();
        elements.sort_by(|a, b| a.id.cmp(&b.id));
        elements
    }
}

fn ensure_kind(id: &str, stored: ElementKind, requested: ElementKind) -> Result<(), AppError> {
    if stored != requested {
        warn!("Layout element {id} holds {stored:?}, not {requested:?}");
        return Err(AppError::KindMismatch(format!(
            "layout element {id} holds {stored:?}, not {requested:?}"
        )));
    }
    Ok(())
}
