//! Focus — which pane receives keys, cycled with Tab / Shift+Tab.
//!
//! The input and the result pane are always in the cycle; the log pane joins
//! it only while open.

use crate::action::ComponentId;

const ALWAYS: [ComponentId; 2] = [ComponentId::QueryBar, ComponentId::ResultPanel];

pub struct FocusRing {
    focused: ComponentId,
    log_open: bool,
}

impl FocusRing {
    pub fn new() -> Self {
        Self {
            focused: ComponentId::QueryBar,
            log_open: false,
        }
    }

    pub fn current(&self) -> ComponentId {
        self.focused
    }

    fn cycle(&self) -> Vec<ComponentId> {
        let mut panes = ALWAYS.to_vec();
        if self.log_open {
            panes.push(ComponentId::LogPanel);
        }
        panes
    }

    fn step(&mut self, forward: bool) -> ComponentId {
        let panes = self.cycle();
        let pos = panes.iter().position(|&p| p == self.focused).unwrap_or(0);
        let next = if forward {
            (pos + 1) % panes.len()
        } else {
            (pos + panes.len() - 1) % panes.len()
        };
        self.focused = panes[next];
        self.focused
    }

    pub fn next(&mut self) -> ComponentId {
        self.step(true)
    }

    pub fn prev(&mut self) -> ComponentId {
        self.step(false)
    }

    /// Focus `id` if it is currently in the cycle.
    pub fn set(&mut self, id: ComponentId) {
        if self.cycle().contains(&id) {
            self.focused = id;
        }
    }

    /// Opening the log focuses it; closing it hands focus back to the input.
    pub fn set_log_open(&mut self, open: bool) {
        self.log_open = open;
        if open {
            self.focused = ComponentId::LogPanel;
        } else if self.focused == ComponentId::LogPanel {
            self.focused = ComponentId::QueryBar;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_both_ways() {
        let mut ring = FocusRing::new();
        assert_eq!(ring.current(), ComponentId::QueryBar);
        assert_eq!(ring.next(), ComponentId::ResultPanel);
        assert_eq!(ring.next(), ComponentId::QueryBar);
        assert_eq!(ring.prev(), ComponentId::ResultPanel);
    }

    #[test]
    fn test_log_pane_joins_only_while_open() {
        let mut ring = FocusRing::new();
        ring.set(ComponentId::LogPanel);
        assert_eq!(ring.current(), ComponentId::QueryBar);

        ring.set_log_open(true);
        assert_eq!(ring.current(), ComponentId::LogPanel);
        assert_eq!(ring.next(), ComponentId::QueryBar);
        assert_eq!(ring.prev(), ComponentId::LogPanel);

        ring.set_log_open(false);
        assert_eq!(ring.current(), ComponentId::QueryBar);
        ring.set(ComponentId::ResultPanel);
        ring.set_log_open(false);
        assert_eq!(ring.current(), ComponentId::ResultPanel);
    }
}
