//! Transient on-screen notice
//!
//! Every `show` bumps a generation counter and hands back a ticket. The hide
//! timer presents that ticket; a ticket from an older `show` is ignored, so a
//! newer toast always gets its full duration.

/// Current toast contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toast {
    message: String,
    visible: bool,
    generation: u64,
}

/// Proof of a particular `show`, redeemed by its hide timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTicket {
    pub generation: u64,
    pub hide_after_ms: u32,
}

impl Toast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replace the message and make it visible
    pub fn show(&mut self, message: &str, duration_ms: u32) -> ToastTicket {
        self.generation += 1;
        self.message.clear();
        self.message.push_str(message);
        self.visible = true;
        log::debug!("toast #{} \"{}\"", self.generation, self.message);
        ToastTicket {
            generation: self.generation,
            hide_after_ms: duration_ms,
        }
    }

    /// Hide if `ticket` belongs to the latest `show`. Returns whether it did.
    pub fn hide(&mut self, ticket: ToastTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.visible = false;
        true
    }
}
