use super::state::Coordinate;

/// Outcome of a collision test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    NoCollision,
    /// The expected next letter was reached
    CorrectLetter,
    /// A letter other than the expected one was reached
    WrongLetter,
    /// The snake left its half of the field or bit itself
    CollisionFatal,
}

impl Verdict {
    /// Whether the verdict hands the race to the opponent
    pub fn is_loss(&self) -> bool {
        matches!(self, Verdict::WrongLetter | Verdict::CollisionFatal)
    }
}

/// Resolve a hit against a letter list.
///
/// Scans `coords[progress..]` for the lowest index satisfying `is_hit`. A hit on
/// `progress` is correct. A hit on a later slot holding the same letter as
/// `progress` is also correct: the two slots are swapped so the consumed
/// coordinate now sits at `progress`. Only slots below `swappable` can take
/// part in a swap; anything else is a wrong letter.
pub(crate) fn resolve_hit(
    coords: &mut [Coordinate],
    letter_at: impl Fn(usize) -> Option<char>,
    progress: usize,
    swappable: usize,
    is_hit: impl Fn(Coordinate) -> bool,
) -> Verdict {
    let Some(offset) = coords
        .get(progress..)
        .and_then(|rest| rest.iter().position(|c| is_hit(*c)))
    else {
        return Verdict::NoCollision;
    };

    let hit = progress + offset;
    if hit == progress {
        return Verdict::CorrectLetter;
    }

    let expected = letter_at(progress);
    if hit < swappable && expected.is_some() && letter_at(hit) == expected {
        coords.swap(progress, hit);
        return Verdict::CorrectLetter;
    }

    Verdict::WrongLetter
}
