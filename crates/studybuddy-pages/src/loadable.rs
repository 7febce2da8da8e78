//! Loading state for page data

use serde::Serialize;

/// Page data plus whether its first fetch is still outstanding.
/// Pages start out loading, the way a freshly mounted view does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loadable<T> {
    loading: bool,
    data: T,
}

impl<T: Default> Loadable<T> {
    pub fn new() -> Self {
        Self {
            loading: true,
            data: T::default(),
        }
    }
}

impl<T: Default> Default for Loadable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn begin(&mut self) {
        self.loading = true;
    }

    pub fn finish(&mut self, data: T) {
        self.data = data;
        self.loading = false;
    }

    /// Stop loading and keep whatever was there
    pub fn fail(&mut self) {
        self.loading = false;
    }
}
