//! Random (theme, difficulty) selection.

use crate::{Difficulty, PromptTable, Theme};
use rand::Rng;
use rand::seq::IteratorRandom;
use strum::IntoEnumIterator;

/// Outcome of a roll: the classification plus its resolved instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roll {
    /// Selected theme
    pub theme: Theme,
    /// Selected difficulty
    pub difficulty: Difficulty,
    /// Instruction text for the pair
    pub instruction: &'static str,
}

/// Roll with the thread-local generator.
pub fn roll() -> Roll {
    roll_with(&mut rand::thread_rng())
}

/// Roll with a caller-supplied generator.
///
/// Theme and difficulty are drawn independently and uniformly. Never fails:
/// the prompt table covers the full cross product.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use twain_core::{PromptTable, roll_with};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let roll = roll_with(&mut rng);
/// assert_eq!(roll.instruction, PromptTable::instruction(roll.theme, roll.difficulty));
/// ```
pub fn roll_with<R: Rng + ?Sized>(rng: &mut R) -> Roll {
    let theme = Theme::iter().choose(rng).unwrap_or(Theme::Communication);
    let difficulty = Difficulty::iter().choose(rng).unwrap_or(Difficulty::Light);
    Roll {
        theme,
        difficulty,
        instruction: PromptTable::instruction(theme, difficulty),
    }
}
