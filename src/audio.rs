use std::io::{self, Write};

use tracing::trace;

use crate::events::GameEvent;

/// Receives gameplay events and turns them into sound, however the front end
/// likes.
pub trait AudioHook {
    fn play(&mut self, event: GameEvent) -> io::Result<()>;
}

/// Rings the terminal bell for the events worth hearing. Pellet chomps are
/// silent; a bell per pellet would be unbearable.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioHook for TerminalBell<W> {
    fn play(&mut self, event: GameEvent) -> io::Result<()> {
        trace!(?event, "sound event");
        match event {
            GameEvent::PelletEaten => Ok(()),
            GameEvent::PowerPelletEaten
            | GameEvent::GhostCaptured(_)
            | GameEvent::PlayerCaptured => {
                self.out.write_all(b"\x07")?;
                self.out.flush()
            }
        }
    }
}
