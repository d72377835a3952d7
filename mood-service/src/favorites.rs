use dashmap::DashSet;

/// Movie ids the user marked as favorite during this session. Never persisted.
#[derive(Debug, Default)]
pub struct FavoriteSet {
    ids: DashSet<u32>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`; returns whether it is a favorite afterwards
    pub fn toggle(&self, id: u32) -> bool {
        if self.ids.remove(&id).is_some() {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Favorite ids in ascending order
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.ids.iter().map(|id| *id).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
