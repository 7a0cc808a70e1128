use super::DrawCmd;

/// Recorded draw stream for one frame.
///
/// Commands are painted in insertion order (back-to-front). A canvas keeps one
/// list as its backbuffer: stimuli push into it, presenting consumes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// An empty list presents as an all-black frame.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.items.iter()
    }
}
