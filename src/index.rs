use std::fmt;

use uuid::Uuid; //identifies the matrix an index was taken from

/// Row of a [`RecipeMatrix`](crate::matrix::RecipeMatrix), i.e. an item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemIx {
    matrix: Uuid,
    row: usize,
}

/// Column of a [`RecipeMatrix`](crate::matrix::RecipeMatrix), i.e. a recipe or pseudo-recipe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeIx {
    matrix: Uuid,
    col: usize,
}

impl ItemIx {
    pub(crate) fn new(matrix: Uuid, row: usize) -> Self {
        Self { matrix, row }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn matrix_id(&self) -> Uuid {
        self.matrix
    }
}

impl RecipeIx {
    pub(crate) fn new(matrix: Uuid, col: usize) -> Self {
        Self { matrix, col }
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn matrix_id(&self) -> Uuid {
        self.matrix
    }
}

impl fmt::Display for ItemIx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "i{}", self.row)
    }
}

impl fmt::Display for RecipeIx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x{}", self.col)
    }
}
