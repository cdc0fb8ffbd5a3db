//! Per-frame click ownership.
//!
//! The menu layer runs first each frame and may claim the press edge; after
//! that, windows are offered the edge from the top of the z-order down and the
//! first one to act claims it so nothing underneath reacts to the same click.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameInputArbiter {
    menu_claimed_click: bool,
    window_claimed_click: bool,
}

impl FrameInputArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear both claims. Called once per frame before any consumer runs.
    pub fn reset_frame(&mut self) {
        self.menu_claimed_click = false;
        self.window_claimed_click = false;
    }

    pub fn claim_for_menu(&mut self) {
        self.menu_claimed_click = true;
    }

    pub fn claim_for_window(&mut self) {
        self.window_claimed_click = true;
    }

    pub fn menu_claimed(&self) -> bool {
        self.menu_claimed_click
    }

    pub fn window_claimed(&self) -> bool {
        self.window_claimed_click
    }

    /// Whether this frame's press edge is still unowned.
    pub fn click_available(&self) -> bool {
        !self.menu_claimed_click && !self.window_claimed_click
    }

    /// Claim the click for a window if nobody owns it yet.
    ///
    /// Returns `false` when the edge was already claimed this frame, in which
    /// case the caller must not act on it.
    pub fn try_claim_for_window(&mut self) -> bool {
        if !self.click_available() {
            return false;
        }
        self.claim_for_window();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_window_claim_wins() {
        let mut arb = FrameInputArbiter::new();
        assert!(arb.click_available());
        assert!(arb.try_claim_for_window());
        assert!(!arb.try_claim_for_window());
        assert!(arb.window_claimed());
    }

    #[test]
    fn menu_claim_blocks_windows() {
        let mut arb = FrameInputArbiter::new();
        arb.claim_for_menu();
        assert!(!arb.try_claim_for_window());
        assert!(!arb.window_claimed());
    }

    #[test]
    fn reset_clears_claims() {
        let mut arb = FrameInputArbiter::new();
        arb.claim_for_menu();
        arb.claim_for_window();
        arb.reset_frame();
        assert!(arb.click_available());
        assert!(!arb.menu_claimed());
    }
}
