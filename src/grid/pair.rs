use super::*;

/// Which side of the pair a grid currently plays.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// Read side of the next sweep.
    Previous,
    /// Write side of the next sweep.
    Current,
}

/// Two same-shape grids addressed by role.
/// Swapping roles flips an index, no cell data moves.
#[derive(Clone, Debug)]
pub struct GridPair {
    grids: [Grid; 2],
    current: usize,
}

impl GridPair {
    pub fn try_new(size: usize) -> SolverResult<Self> {
        let a = Grid::try_new(size)?;
        let b = Grid::try_new(size)?;
        Ok(GridPair {
            grids: [a, b],
            current: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.grids[0].size()
    }

    pub fn get(&self, role: Role) -> &Grid {
        match role {
            Role::Current => &self.grids[self.current],
            Role::Previous => &self.grids[1 - self.current],
        }
    }

    pub fn previous(&self) -> &Grid {
        self.get(Role::Previous)
    }

    pub fn current(&self) -> &Grid {
        self.get(Role::Current)
    }

    /// Borrow `(previous, current)`, the read and write side of a sweep.
    pub fn split_mut(&mut self) -> (&Grid, &mut Grid) {
        let (a, b) = self.grids.split_at_mut(1);
        if self.current == 0 {
            (&b[0], &mut a[0])
        } else {
            (&a[0], &mut b[0])
        }
    }

    /// Both grids regardless of role, for initialization.
    pub fn grids_mut(&mut self) -> impl Iterator<Item = &mut Grid> {
        self.grids.iter_mut()
    }

    /// The just-written grid becomes the read side.
    pub fn flip(&mut self) {
        self.current = 1 - self.current;
    }

    /// Give up the pair, keeping the grid playing `role`.
    pub fn into_role(self, role: Role) -> Grid {
        let GridPair {
            grids: [a, b],
            current,
        } = self;
        match (role, current) {
            (Role::Current, 0) | (Role::Previous, 1) => a,
            _ => b,
        }
    }

    /// Copy current into previous, roles stay put.
    pub fn copy_back(&mut self, chunk_size: usize) {
        let (previous, current) = {
            let (a, b) = self.grids.split_at_mut(1);
            if self.current == 0 {
                (&mut b[0], &a[0])
            } else {
                (&mut a[0], &b[0])
            }
        };
        previous.copy_from(current, chunk_size);
    }
}
