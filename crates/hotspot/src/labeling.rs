//! Binary masks and 4-connected component labeling.
//!
//! Labeling is the classic two-pass algorithm: the first raster scan assigns
//! provisional labels and records equivalences in a union-find forest, the
//! second resolves every pixel to a compact label. Labels are numbered
//! `1..=count` in order of first appearance in row-major scan; background
//! is 0.

use mineral_common::Raster;

/// Boolean raster, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    pub data: Vec<bool>,
    pub width: usize,
    pub height: usize,
}

impl BinaryMask {
    /// `true` where `score >= threshold`. NaN samples are never set.
    pub fn threshold(score: &Raster, threshold: f32) -> Self {
        Self {
            data: score.data.iter().map(|&v| v >= threshold).collect(),
            width: score.width,
            height: score.height,
        }
    }

    pub fn from_rows(rows: &[&[bool]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let data = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self {
            data,
            width,
            height,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.data[row * self.width + col]
    }

    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// (row, col) of every set pixel in row-major order.
    pub fn set_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(move |(i, _)| (i / width, i % width))
    }
}

/// Per-pixel component labels.
#[derive(Debug, Clone)]
pub struct ComponentLabels {
    pub labels: Vec<u32>,
    pub width: usize,
    pub height: usize,
    pub count: usize,
}

impl ComponentLabels {
    pub fn get(&self, row: usize, col: usize) -> u32 {
        if row >= self.height || col >= self.width {
            return 0;
        }
        self.labels[row * self.width + col]
    }

    /// Pixel count of each component, indexed by `label - 1`.
    pub fn component_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.count];
        for &l in &self.labels {
            if l > 0 {
                sizes[l as usize - 1] += 1;
            }
        }
        sizes
    }
}

/// Union-find over provisional labels. Index 0 is the background and is
/// never merged.
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            // path halving
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) -> u32 {
        let ra = self.find(a);
        let rb = self.find(b);
        let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[child as usize] = root;
        root
    }
}

/// Label the 4-connected components of `mask`.
pub fn label_components(mask: &BinaryMask) -> ComponentLabels {
    let (width, height) = (mask.width, mask.height);
    let mut labels = vec![0u32; width * height];
    let mut forest = UnionFind::new();

    // Pass 1: provisional labels
    for row in 0..height {
        for col in 0..width {
            let i = row * width + col;
            if !mask.data[i] {
                continue;
            }

            let up = if row > 0 { labels[i - width] } else { 0 };
            let left = if col > 0 { labels[i - 1] } else { 0 };

            labels[i] = match (up, left) {
                (0, 0) => forest.make_set(),
                (l, 0) | (0, l) => l,
                (u, l) if u == l => u,
                (u, l) => forest.union(u, l),
            };
        }
    }

    // Pass 2: resolve roots and renumber in first-appearance order
    let mut compact = vec![0u32; forest.parent.len()];
    let mut count = 0u32;
    for label in labels.iter_mut() {
        if *label == 0 {
            continue;
        }
        let root = forest.find(*label) as usize;
        if compact[root] == 0 {
            count += 1;
            compact[root] = count;
        }
        *label = compact[root];
    }

    ComponentLabels {
        labels,
        width,
        height,
        count: count as usize,
    }
}
