/// Luby sequence scaled by `base`.
struct Luby {
    base: usize,
    uv: (isize, isize),
}

impl Luby {
    fn new(base: usize) -> Self {
        Self { base, uv: (1, 1) }
    }
}

impl Iterator for Luby {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let (u, v) = self.uv;
        // Knuth's formulation, see https://oeis.org/A182105.
        self.uv = if u & -u == v { (u + 1, 1) } else { (u, 2 * v) };
        Some(self.base * v as usize)
    }
}

/// Restart schedule: the i-th restart happens after `base * luby(i)`
/// conflicts counted since the previous one.
pub struct Restarts {
    luby: Luby,
    threshold: usize,
    conflicts: usize,
    restarts: usize,
}

impl Restarts {
    pub fn new(base: usize) -> Self {
        let mut luby = Luby::new(base);
        let threshold = luby.next().unwrap_or(base);
        Self {
            luby,
            threshold,
            conflicts: 0,
            restarts: 0,
        }
    }

    pub fn conflict(&mut self) {
        self.conflicts += 1;
    }

    /// `true` once the current interval is used up; starts the next interval.
    pub fn due(&mut self) -> bool {
        if self.conflicts < self.threshold {
            return false;
        }
        self.conflicts = 0;
        self.restarts += 1;
        self.threshold = self.luby.next().unwrap_or(self.threshold);
        true
    }

    pub fn count(&self) -> usize {
        self.restarts
    }
}
