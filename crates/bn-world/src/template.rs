//! Spawnable templates and their recycling pools.

use bn_core::{EntityId, TemplateId};

use crate::{WorldError, WorldResult};

/// What a spawned entity starts as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub name:  String,
    pub tag:   String,
    pub layer: u8,
}

/// Registered templates plus, per template, the despawned entities waiting to
/// be reused.
#[derive(Default, Debug)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
    pools:     Vec<Vec<EntityId>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name:  impl Into<String>,
        tag:   impl Into<String>,
        layer: u8,
    ) -> WorldResult<TemplateId> {
        if layer >= 32 {
            return Err(WorldError::LayerOutOfRange(u32::from(layer)));
        }
        let id = TemplateId(self.templates.len() as u16);
        self.templates.push(Template { name: name.into(), tag: tag.into(), layer });
        self.pools.push(Vec::new());
        Ok(id)
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.get(id.index())
    }

    /// Resolve a template by name.
    pub fn find(&self, name: &str) -> WorldResult<TemplateId> {
        self.templates
            .iter()
            .position(|t| t.name == name)
            .map(|i| TemplateId(i as u16))
            .ok_or_else(|| WorldError::UnknownTemplate(name.to_owned()))
    }

    /// Pop a pooled entity of `id`, if any.
    pub(crate) fn reuse(&mut self, id: TemplateId) -> Option<EntityId> {
        self.pools.get_mut(id.index())?.pop()
    }

    pub(crate) fn recycle(&mut self, id: TemplateId, entity: EntityId) {
        if let Some(pool) = self.pools.get_mut(id.index()) {
            pool.push(entity);
        }
    }

    /// Entities currently waiting in `id`'s pool.
    pub fn pooled(&self, id: TemplateId) -> usize {
        self.pools.get(id.index()).map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
