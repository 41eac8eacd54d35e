use std::sync::mpsc::SyncSender;

use super::cell::Terrain;

/// Emitted whenever the grid changes, so a renderer on the other end of the
/// channel can replay the mutations at its own pace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridEvent {
    Initial {
        terrain: Terrain,
        width: u16,
        height: u16,
    },
    Update {
        coord: (u16, u16),
        new: Terrain,
    },
}

pub struct Grid {
    data: Box<[Terrain]>,
    width: u16,
    height: u16,
    sender: Option<SyncSender<GridEvent>>,
}

impl Grid {
    pub fn new(
        width: u16,
        height: u16,
        terrain: Terrain,
        sender: Option<SyncSender<GridEvent>>,
    ) -> Self {
        let data = vec![terrain; width as usize * height as usize].into_boxed_slice();
        if let Some(s) = &sender {
            let _ = s.send(GridEvent::Initial {
                terrain,
                width,
                height,
            });
        }
        Grid {
            data,
            width,
            height,
            sender,
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn in_bounds(&self, coord: (u16, u16)) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        y as usize * self.width as usize + x as usize
    }

    pub fn set(&mut self, coord: (u16, u16), terrain: Terrain) {
        let idx = self.ravel_index(coord.0, coord.1);
        let old = self.data[idx];
        if old != terrain {
            self.data[idx] = terrain;
            if let Some(sender) = &self.sender {
                let _ = sender.send(GridEvent::Update {
                    coord,
                    new: terrain,
                });
            }
        }
    }

    /// Drops the event sender, disconnecting the channel once no other
    /// senders remain. Further mutations go unobserved.
    pub fn take_sender(&mut self) -> Option<SyncSender<GridEvent>> {
        self.sender.take()
    }
}

impl std::ops::Index<(u16, u16)> for Grid {
    type Output = Terrain;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indexing() {
        let mut grid = Grid::new(5, 3, Terrain::Wall, None);
        grid.set((4, 2), Terrain::Water);
        assert_eq!(grid[(4, 2)], Terrain::Water);
        assert_eq!(grid[(0, 0)], Terrain::Wall);
    }

    #[test]
    fn test_bounds() {
        let grid = Grid::new(5, 3, Terrain::Wall, None);
        assert!(grid.in_bounds((4, 2)));
        assert!(!grid.in_bounds((5, 2)));
        assert!(!grid.in_bounds((4, 3)));
    }

    #[test]
    fn test_events_emitted_for_real_changes_only() {
        let (tx, rx) = std::sync::mpsc::sync_channel(16);
        let mut grid = Grid::new(2, 2, Terrain::Wall, Some(tx));
        assert_eq!(
            rx.try_recv(),
            Ok(GridEvent::Initial {
                terrain: Terrain::Wall,
                width: 2,
                height: 2
            })
        );

        grid.set((1, 1), Terrain::Grass);
        assert_eq!(
            rx.try_recv(),
            Ok(GridEvent::Update {
                coord: (1, 1),
                new: Terrain::Grass
            })
        );

        // Setting a cell to the terrain it already has is not an update.
        grid.set((1, 1), Terrain::Grass);
        assert!(rx.try_recv().is_err());

        grid.take_sender();
        grid.set((0, 0), Terrain::Grass);
        assert!(rx.try_recv().is_err());
    }
}
