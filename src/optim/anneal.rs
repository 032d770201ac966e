/// Learning rate that shrinks by a constant factor after every epoch.
///
/// `rate(epoch) = initial * factor^epoch`, epoch counted from 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annealing {
    pub initial: f64,
    pub factor: f64,
}

impl Annealing {
    pub fn new(initial: f64, factor: f64) -> Annealing {
        Annealing { initial, factor }
    }

    /// Endless iterator of per-epoch rates.
    pub fn rates(&self) -> Rates {
        Rates { next: self.initial, factor: self.factor }
    }
}

pub struct Rates {
    next: f64,
    factor: f64,
}

impl Iterator for Rates {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let rate = self.next;
        self.next *= self.factor;
        Some(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_decay_geometrically() {
        let rates: Vec<f64> = Annealing::new(1.0, 0.5).rates().take(4).collect();
        assert_eq!(rates, vec![1.0, 0.5, 0.25, 0.125]);
    }

    #[test]
    fn factor_one_keeps_rate_constant() {
        assert!(Annealing::new(0.3, 1.0).rates().take(10).all(|r| r == 0.3));
    }
}
