/// Holds one piece of fetched data and whether it must be fetched again.
#[derive(Debug, Clone)]
pub struct FetchSlot<T> {
    value: Option<T>,
    stale: bool,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self {
            value: None,
            stale: false,
        }
    }
}

impl<T> FetchSlot<T> {
    pub fn needs_fetch(&self) -> bool {
        self.value.is_none() || self.stale
    }

    pub fn fill(&mut self, value: T) {
        self.value = Some(value);
        self.stale = false;
    }

    /// Keeps the current value on display until the refetch lands.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}
