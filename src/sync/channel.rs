/// Shared "something changed, please refetch" flag.
///
/// Mutation controllers toggle it on success; the query controller is the
/// only reader that acts on it. The flag carries no count - consumers respond
/// to the value having changed since they last looked, never to the value
/// itself, so a burst of toggles between two observations collapses into a
/// single "refresh is due". That is the intended contract: nobody cares how
/// many writes queued the refresh.
#[derive(Debug, Default)]
pub struct RefreshSignal {
    updated: bool,
}

impl RefreshSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag. Pure signal, no payload.
    pub fn toggle(&mut self) {
        self.updated = !self.updated;
    }

    pub fn updated(&self) -> bool {
        self.updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_the_flag() {
        let mut signal = RefreshSignal::new();
        assert!(!signal.updated());
        signal.toggle();
        assert!(signal.updated());
        signal.toggle();
        assert!(!signal.updated());
    }
}
