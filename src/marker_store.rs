use crate::marker::{BoxCorners, Marker, PixelCoord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Undone {
    PendingCorner(PixelCoord),
    Marker(Marker),
}

#[derive(Clone, Debug, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
    pending_corner: Option<PixelCoord>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn pending_corner(&self) -> Option<PixelCoord> {
        self.pending_corner
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.markers.iter().filter(|marker| marker.is_point()).count()
    }

    pub fn box_count(&self) -> usize {
        self.markers.iter().filter(|marker| marker.is_box()).count()
    }

    pub fn add_point(&mut self, coord: PixelCoord) {
        self.markers.push(Marker::Point(coord));
    }

    pub fn click_box(&mut self, coord: PixelCoord) -> Option<&Marker> {
        match self.pending_corner.take() {
            None => {
                self.pending_corner = Some(coord);
                None
            }
            Some(first) => {
                self.markers
                    .push(Marker::Box(BoxCorners::from_corners(first, coord)));
                self.markers.last()
            }
        }
    }

    pub fn cancel_pending(&mut self) -> Option<PixelCoord> {
        self.pending_corner.take()
    }

    pub fn undo_last(&mut self) -> Option<Undone> {
        if let Some(corner) = self.pending_corner.take() {
            return Some(Undone::PendingCorner(corner));
        }
        self.markers.pop().map(Undone::Marker)
    }

    pub fn clear_all(&mut self) {
        self.markers.clear();
        self.pending_corner = None;
    }

    pub fn remove(&mut self, index: usize) -> Option<Marker> {
        if index >= self.markers.len() {
            return None;
        }
        Some(self.markers.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::{MarkerStore, Undone};
    use crate::marker::{BoxCorners, Marker, PixelCoord};

    #[test]
    fn undo_removes_markers_in_reverse_order() {
        let mut store = MarkerStore::new();
        store.add_point(PixelCoord::new(1, 1));
        store.add_point(PixelCoord::new(2, 2));
        store.click_box(PixelCoord::new(10, 10));
        store.click_box(PixelCoord::new(0, 0));

        assert_eq!(
            store.undo_last(),
            Some(Undone::Marker(Marker::Box(BoxCorners::from_corners(
                PixelCoord::new(0, 0),
                PixelCoord::new(10, 10),
            ))))
        );
        assert_eq!(
            store.undo_last(),
            Some(Undone::Marker(Marker::Point(PixelCoord::new(2, 2))))
        );
        assert_eq!(
            store.undo_last(),
            Some(Undone::Marker(Marker::Point(PixelCoord::new(1, 1))))
        );
        assert_eq!(store.undo_last(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn box_needs_two_clicks_and_normalizes() {
        let mut store = MarkerStore::new();
        assert!(store.click_box(PixelCoord::new(80, 90)).is_none());
        assert!(store.is_empty());
        assert_eq!(store.pending_corner(), Some(PixelCoord::new(80, 90)));

        let committed = store.click_box(PixelCoord::new(20, 30)).copied();
        let Some(Marker::Box(corners)) = committed else {
            panic!("second click should commit a box");
        };
        assert!(corners.min.x <= corners.max.x);
        assert!(corners.min.y <= corners.max.y);
        assert_eq!(corners.min, PixelCoord::new(20, 30));
        assert_eq!(store.len(), 1);
        assert_eq!(store.pending_corner(), None);
    }

    #[test]
    fn cancel_after_first_corner_leaves_store_unchanged() {
        let mut store = MarkerStore::new();
        store.add_point(PixelCoord::new(5, 5));
        store.click_box(PixelCoord::new(10, 10));

        assert_eq!(
            store.undo_last(),
            Some(Undone::PendingCorner(PixelCoord::new(10, 10)))
        );
        assert_eq!(store.markers(), &[Marker::Point(PixelCoord::new(5, 5))]);
        assert_eq!(store.box_count(), 0);
    }

    #[test]
    fn clear_all_drops_pending_corner() {
        let mut store = MarkerStore::new();
        store.add_point(PixelCoord::new(1, 2));
        store.click_box(PixelCoord::new(3, 4));
        store.clear_all();

        assert!(store.is_empty());
        assert_eq!(store.pending_corner(), None);
        assert_eq!(store.undo_last(), None);
    }

    #[test]
    fn remove_by_index_ignores_out_of_range() {
        let mut store = MarkerStore::new();
        store.add_point(PixelCoord::new(1, 1));
        store.add_point(PixelCoord::new(2, 2));

        assert_eq!(store.remove(5), None);
        assert_eq!(store.remove(0), Some(Marker::Point(PixelCoord::new(1, 1))));
        assert_eq!(store.point_count(), 1);
    }
}
