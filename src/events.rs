use crate::ghost::GhostKind;

/// Discrete things that happened during a tick. The front end maps these to
/// sounds; the core does not care whether anything plays.
///
/// Front ends that use generic hook names can map them one to one:
/// `CollectiblePelletEaten` is `PelletEaten`, `AdversaryCaptured` is
/// `GhostCaptured`, and `PowerPelletEaten` and `PlayerCaptured` keep their
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A regular pellet was eaten.
    PelletEaten,
    /// A power pellet was eaten and the power countdown (re)started.
    PowerPelletEaten,
    /// A powered player caught this ghost; it has been sent home.
    GhostCaptured(GhostKind),
    /// An unpowered player touched a ghost; the session is over.
    PlayerCaptured,
}
